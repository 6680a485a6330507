// src/seed/provisioner.rs
//
// O coração do seed: oito fases estritamente lineares, cada uma dependendo
// dos ids produzidos pela anterior. Nenhuma fase relê o banco — os mapas
// chave-natural -> id são construídos em processo e passados adiante.
// Tudo é idempotente: rodar de novo converge para o mesmo estado final.

use std::collections::HashMap;

use serde::Serialize;

use crate::common::error::AppError;
use crate::models::user::User;
use crate::seed::catalog::SeedCatalog;
use crate::seed::store::SeedStore;

/// O que fazer com um código de permissão que aparece num grant mas não
/// existe no catálogo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrantPolicy {
    /// Aborta o seed inteiro. É o comportamento seguro e o padrão,
    /// consistente com o tratamento de módulos e cargos pendurados.
    #[default]
    Strict,
    /// Loga um aviso e descarta o código (comportamento histórico).
    Tolerant,
}

/// Resumo do que foi gravado, para o operador conferir.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub company_id: i64,
    pub modules: usize,
    pub permissions: usize,
    pub roles: usize,
    pub grants: u64,
    pub admin_username: String,
}

pub struct SeedProvisioner<S: SeedStore> {
    store: S,
    policy: GrantPolicy,
    bcrypt_cost: u32,
}

impl<S: SeedStore> SeedProvisioner<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: GrantPolicy::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_policy(mut self, policy: GrantPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Executa o provisionamento completo. Qualquer erro aborta a execução;
    /// não há rollback compensatório — cada fase é idempotente, então basta
    /// corrigir a causa e rodar tudo de novo.
    pub async fn provision(&self, catalog: &SeedCatalog) -> Result<SeedSummary, AppError> {
        // 1. Empresa (chave: RUC)
        let company = self.store.upsert_company(&catalog.company).await?;
        tracing::info!("✅ Empresa provisionada: {} ({})", company.legal_name, company.ruc);

        // 2. Almacén padrão (chave composta: empresa + nome).
        // Sem endereço na empresa, gravamos o marcador "—" em vez de falhar.
        let address = company.address.as_deref().unwrap_or("—");
        self.store
            .upsert_warehouse(company.id, &catalog.warehouse.name, address)
            .await?;

        // 3. Módulos, na ordem declarada
        let modules = self.seed_modules(catalog).await?;

        // 4. Permissões (cada uma resolve o seu módulo dono ou aborta)
        let permissions = self.seed_permissions(catalog, &modules).await?;

        // 5. Cargos
        let roles = self.seed_roles(catalog).await?;

        // 6. Reconciliação cargo <-> permissões (delete + insert por cargo)
        let grants = self.reconcile_grants(catalog, &roles, &permissions).await?;

        // 7 e 8. Usuário admin + vínculo com o cargo administrativo
        let admin = self.seed_admin(catalog, company.id, &roles).await?;

        Ok(SeedSummary {
            company_id: company.id,
            modules: modules.len(),
            permissions: permissions.len(),
            roles: roles.len(),
            grants,
            admin_username: admin.username,
        })
    }

    async fn seed_modules(
        &self,
        catalog: &SeedCatalog,
    ) -> Result<HashMap<String, i64>, AppError> {
        let mut ids = HashMap::new();
        for spec in &catalog.modules {
            let module = self.store.upsert_module(spec).await?;
            ids.insert(module.code, module.id);
        }
        tracing::info!("✅ {} módulos provisionados", ids.len());
        Ok(ids)
    }

    async fn seed_permissions(
        &self,
        catalog: &SeedCatalog,
        modules: &HashMap<String, i64>,
    ) -> Result<HashMap<String, i64>, AppError> {
        let mut ids = HashMap::new();
        for spec in &catalog.permissions {
            // Referência pendurada no catálogo é erro de configuração: para tudo.
            let module_id =
                modules
                    .get(&spec.module)
                    .copied()
                    .ok_or_else(|| AppError::ModuleNotFound {
                        permission: spec.code.clone(),
                        module: spec.module.clone(),
                    })?;

            let permission = self
                .store
                .upsert_permission(&spec.code, &spec.description, module_id)
                .await?;
            ids.insert(permission.code, permission.id);
        }
        tracing::info!("✅ {} permissões provisionadas", ids.len());
        Ok(ids)
    }

    async fn seed_roles(&self, catalog: &SeedCatalog) -> Result<HashMap<String, i64>, AppError> {
        let mut ids = HashMap::new();
        for spec in &catalog.roles {
            let role = self
                .store
                .upsert_role(&spec.name, spec.description.as_deref())
                .await?;
            ids.insert(role.name, role.id);
        }
        tracing::info!("✅ {} cargos provisionados", ids.len());
        Ok(ids)
    }

    /// Para cada cargo do catálogo, substitui o conjunto inteiro de
    /// permissões pelo declarado. Vínculos de execuções anteriores que não
    /// estão mais no catálogo não sobrevivem.
    async fn reconcile_grants(
        &self,
        catalog: &SeedCatalog,
        roles: &HashMap<String, i64>,
        permissions: &HashMap<String, i64>,
    ) -> Result<u64, AppError> {
        let mut total = 0u64;

        for grant in &catalog.grants {
            let role_id = roles
                .get(&grant.role)
                .copied()
                .ok_or_else(|| AppError::RoleNotFound(grant.role.clone()))?;

            let mut permission_ids = Vec::with_capacity(grant.permissions.len());
            for code in &grant.permissions {
                match permissions.get(code) {
                    Some(id) => permission_ids.push(*id),
                    None => match self.policy {
                        GrantPolicy::Strict => {
                            return Err(AppError::UnresolvedPermission {
                                role: grant.role.clone(),
                                permission: code.clone(),
                            });
                        }
                        GrantPolicy::Tolerant => {
                            tracing::warn!(
                                "⚠️ Permissão '{}' do cargo '{}' não existe no catálogo; descartada",
                                code,
                                grant.role
                            );
                        }
                    },
                }
            }

            total += self
                .store
                .replace_role_permissions(role_id, &permission_ids)
                .await?;
        }

        tracing::info!("✅ {} vínculos cargo-permissão gravados", total);
        Ok(total)
    }

    async fn seed_admin(
        &self,
        catalog: &SeedCatalog,
        company_id: i64,
        roles: &HashMap<String, i64>,
    ) -> Result<User, AppError> {
        let role_id = roles
            .get(&catalog.admin.role)
            .copied()
            .ok_or_else(|| AppError::RoleNotFound(catalog.admin.role.clone()))?;

        // O hashing é pesado de CPU; sai da thread do runtime.
        let password = catalog.admin.password.clone();
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let user = self
            .store
            .upsert_user(
                company_id,
                &catalog.admin.username,
                &password_hash,
                &catalog.admin.full_name,
                catalog.admin.email.as_deref(),
            )
            .await?;

        self.store.upsert_user_role(user.id, role_id).await?;
        tracing::info!(
            "✅ Usuário '{}' provisionado com o cargo {}",
            user.username,
            catalog.admin.role
        );

        Ok(user)
    }
}
