pub mod company;
pub mod rbac;
pub mod user;
