// src/seed/store.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::{CompanyRepository, RbacRepository, UserRepository};
use crate::models::company::{Company, Warehouse};
use crate::models::rbac::{Module, Permission, Role};
use crate::models::user::User;
use crate::seed::catalog::{CompanySpec, ModuleSpec};

/// As operações de persistência que o provisioner precisa: upserts por chave
/// natural e a substituição transacional dos vínculos cargo-permissão.
/// Os testes implementam este trait em memória.
#[async_trait]
pub trait SeedStore: Send + Sync {
    async fn upsert_company(&self, spec: &CompanySpec) -> Result<Company, AppError>;

    async fn upsert_warehouse(
        &self,
        company_id: i64,
        name: &str,
        address: &str,
    ) -> Result<Warehouse, AppError>;

    async fn upsert_module(&self, spec: &ModuleSpec) -> Result<Module, AppError>;

    async fn upsert_permission(
        &self,
        code: &str,
        description: &str,
        module_id: i64,
    ) -> Result<Permission, AppError>;

    async fn upsert_role(&self, name: &str, description: Option<&str>) -> Result<Role, AppError>;

    /// Apaga todos os vínculos do cargo e insere o conjunto declarado.
    /// Retorna quantos vínculos foram gravados.
    async fn replace_role_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> Result<u64, AppError>;

    async fn upsert_user(
        &self,
        company_id: i64,
        username: &str,
        password_hash: &str,
        full_name: &str,
        email: Option<&str>,
    ) -> Result<User, AppError>;

    async fn upsert_user_role(&self, user_id: i64, role_id: i64) -> Result<(), AppError>;
}

// A implementação de produção, por cima dos repositórios sqlx.
#[derive(Clone)]
pub struct PgSeedStore {
    pool: PgPool,
    companies: CompanyRepository,
    rbac: RbacRepository,
    users: UserRepository,
}

impl PgSeedStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            companies: CompanyRepository::new(pool.clone()),
            rbac: RbacRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl SeedStore for PgSeedStore {
    async fn upsert_company(&self, spec: &CompanySpec) -> Result<Company, AppError> {
        self.companies.upsert_company(spec).await
    }

    async fn upsert_warehouse(
        &self,
        company_id: i64,
        name: &str,
        address: &str,
    ) -> Result<Warehouse, AppError> {
        self.companies.upsert_warehouse(company_id, name, address).await
    }

    async fn upsert_module(&self, spec: &ModuleSpec) -> Result<Module, AppError> {
        self.rbac
            .upsert_module(&spec.code, &spec.name, spec.position, &spec.base_path)
            .await
    }

    async fn upsert_permission(
        &self,
        code: &str,
        description: &str,
        module_id: i64,
    ) -> Result<Permission, AppError> {
        self.rbac.upsert_permission(code, description, module_id).await
    }

    async fn upsert_role(&self, name: &str, description: Option<&str>) -> Result<Role, AppError> {
        self.rbac.upsert_role(name, description).await
    }

    async fn replace_role_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> Result<u64, AppError> {
        // Delete + insert na MESMA transação: uma falha no meio não pode
        // deixar o cargo sem nenhuma permissão.
        let mut tx = self.pool.begin().await?;

        self.rbac.delete_role_permissions(&mut *tx, role_id).await?;
        let written = self
            .rbac
            .assign_permissions(&mut *tx, role_id, permission_ids)
            .await?;

        tx.commit().await?;

        Ok(written)
    }

    async fn upsert_user(
        &self,
        company_id: i64,
        username: &str,
        password_hash: &str,
        full_name: &str,
        email: Option<&str>,
    ) -> Result<User, AppError> {
        self.users
            .upsert_user(company_id, username, password_hash, full_name, email)
            .await
    }

    async fn upsert_user_role(&self, user_id: i64, role_id: i64) -> Result<(), AppError> {
        self.users.upsert_user_role(user_id, role_id).await
    }
}
