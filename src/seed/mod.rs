pub mod catalog;
pub mod provisioner;
pub mod store;

pub use catalog::SeedCatalog;
pub use provisioner::{GrantPolicy, SeedProvisioner, SeedSummary};
pub use store::{PgSeedStore, SeedStore};
