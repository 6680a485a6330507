// tests/helpers/mod.rs
//
// Implementação em memória do SeedStore, para exercitar o provisioner sem
// um Postgres de verdade. Reproduz a semântica dos upserts por chave
// natural e do replace transacional dos vínculos.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use facturador_backend::common::error::AppError;
use facturador_backend::models::company::{Company, Warehouse};
use facturador_backend::models::rbac::{Module, Permission, Role};
use facturador_backend::models::user::User;
use facturador_backend::seed::SeedStore;
use facturador_backend::seed::catalog::{CompanySpec, ModuleSpec};

#[derive(Clone, Default)]
pub struct MemStore {
    state: Arc<Mutex<MemState>>,
}

#[derive(Default)]
struct MemState {
    next_id: i64,
    companies: Vec<Company>,
    warehouses: Vec<Warehouse>,
    modules: Vec<Module>,
    permissions: Vec<Permission>,
    roles: Vec<Role>,
    role_permissions: Vec<(i64, i64)>,
    users: Vec<User>,
    user_roles: Vec<(i64, i64)>,
}

impl MemState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Contagem de linhas por tabela, para as asserções de idempotência.
#[derive(Debug, PartialEq, Eq)]
pub struct Counts {
    pub companies: usize,
    pub warehouses: usize,
    pub modules: usize,
    pub permissions: usize,
    pub roles: usize,
    pub role_permissions: usize,
    pub users: usize,
    pub user_roles: usize,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> Counts {
        let state = self.state.lock().unwrap();
        Counts {
            companies: state.companies.len(),
            warehouses: state.warehouses.len(),
            modules: state.modules.len(),
            permissions: state.permissions.len(),
            roles: state.roles.len(),
            role_permissions: state.role_permissions.len(),
            users: state.users.len(),
            user_roles: state.user_roles.len(),
        }
    }

    /// Códigos de permissão de um cargo, ordenados.
    pub fn role_permission_codes(&self, role_name: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let Some(role) = state.roles.iter().find(|r| r.name == role_name) else {
            return Vec::new();
        };

        let mut codes: Vec<String> = state
            .role_permissions
            .iter()
            .filter(|(role_id, _)| *role_id == role.id)
            .filter_map(|(_, permission_id)| {
                state
                    .permissions
                    .iter()
                    .find(|p| p.id == *permission_id)
                    .map(|p| p.code.clone())
            })
            .collect();
        codes.sort();
        codes
    }

    /// Nomes dos cargos de um usuário (com repetições, se houver).
    pub fn user_role_names(&self, username: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let Some(user) = state.users.iter().find(|u| u.username == username) else {
            return Vec::new();
        };

        state
            .user_roles
            .iter()
            .filter(|(user_id, _)| *user_id == user.id)
            .filter_map(|(_, role_id)| {
                state
                    .roles
                    .iter()
                    .find(|r| r.id == *role_id)
                    .map(|r| r.name.clone())
            })
            .collect()
    }

    pub fn find_user(&self, username: &str) -> Option<User> {
        let state = self.state.lock().unwrap();
        state.users.iter().find(|u| u.username == username).cloned()
    }

    pub fn find_warehouse(&self, name: &str) -> Option<Warehouse> {
        let state = self.state.lock().unwrap();
        state.warehouses.iter().find(|w| w.name == name).cloned()
    }
}

#[async_trait]
impl SeedStore for MemStore {
    async fn upsert_company(&self, spec: &CompanySpec) -> Result<Company, AppError> {
        let mut state = self.state.lock().unwrap();

        if let Some(company) = state.companies.iter_mut().find(|c| c.ruc == spec.ruc) {
            company.legal_name = spec.legal_name.clone();
            company.trade_name = spec.trade_name.clone();
            company.address = spec.address.clone();
            company.ubigeo = spec.ubigeo.clone();
            company.email = spec.email.clone();
            company.phone = spec.phone.clone();
            company.is_active = true;
            return Ok(company.clone());
        }

        let id = state.next_id();
        let company = Company {
            id,
            ruc: spec.ruc.clone(),
            legal_name: spec.legal_name.clone(),
            trade_name: spec.trade_name.clone(),
            address: spec.address.clone(),
            ubigeo: spec.ubigeo.clone(),
            email: spec.email.clone(),
            phone: spec.phone.clone(),
            is_active: true,
            created_at: Utc::now(),
        };
        state.companies.push(company.clone());
        Ok(company)
    }

    async fn upsert_warehouse(
        &self,
        company_id: i64,
        name: &str,
        address: &str,
    ) -> Result<Warehouse, AppError> {
        let mut state = self.state.lock().unwrap();

        if let Some(warehouse) = state
            .warehouses
            .iter_mut()
            .find(|w| w.company_id == company_id && w.name == name)
        {
            warehouse.address = Some(address.to_string());
            warehouse.is_active = true;
            return Ok(warehouse.clone());
        }

        let id = state.next_id();
        let warehouse = Warehouse {
            id,
            company_id,
            name: name.to_string(),
            address: Some(address.to_string()),
            is_active: true,
        };
        state.warehouses.push(warehouse.clone());
        Ok(warehouse)
    }

    async fn upsert_module(&self, spec: &ModuleSpec) -> Result<Module, AppError> {
        let mut state = self.state.lock().unwrap();

        if let Some(module) = state.modules.iter_mut().find(|m| m.code == spec.code) {
            module.name = spec.name.clone();
            module.position = spec.position;
            module.base_path = spec.base_path.clone();
            module.is_active = true;
            return Ok(module.clone());
        }

        let id = state.next_id();
        let module = Module {
            id,
            code: spec.code.clone(),
            name: spec.name.clone(),
            position: spec.position,
            base_path: spec.base_path.clone(),
            is_active: true,
        };
        state.modules.push(module.clone());
        Ok(module)
    }

    async fn upsert_permission(
        &self,
        code: &str,
        description: &str,
        module_id: i64,
    ) -> Result<Permission, AppError> {
        let mut state = self.state.lock().unwrap();

        if let Some(permission) = state.permissions.iter_mut().find(|p| p.code == code) {
            permission.description = description.to_string();
            permission.module_id = module_id;
            return Ok(permission.clone());
        }

        let id = state.next_id();
        let permission = Permission {
            id,
            code: code.to_string(),
            description: description.to_string(),
            module_id,
        };
        state.permissions.push(permission.clone());
        Ok(permission)
    }

    async fn upsert_role(&self, name: &str, description: Option<&str>) -> Result<Role, AppError> {
        let mut state = self.state.lock().unwrap();

        if let Some(role) = state.roles.iter_mut().find(|r| r.name == name) {
            role.description = description.map(str::to_string);
            role.is_active = true;
            return Ok(role.clone());
        }

        let id = state.next_id();
        let role = Role {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            is_active: true,
        };
        state.roles.push(role.clone());
        Ok(role)
    }

    async fn replace_role_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> Result<u64, AppError> {
        let mut state = self.state.lock().unwrap();

        // Delete total...
        state.role_permissions.retain(|(r, _)| *r != role_id);

        // ...e reinsere, pulando duplicatas (ON CONFLICT DO NOTHING).
        let mut written = 0u64;
        for permission_id in permission_ids {
            let pair = (role_id, *permission_id);
            if !state.role_permissions.contains(&pair) {
                state.role_permissions.push(pair);
                written += 1;
            }
        }
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
        let mut state = self.state.lock().unwrap();

        if let Some(user) = state.users.iter_mut().find(|u| u.username == username) {
            user.company_id = company_id;
            user.password_hash = password_hash.to_string();
            user.full_name = full_name.to_string();
            user.email = email.map(str::to_string);
            user.is_active = true;
            return Ok(user.clone());
        }

        let id = state.next_id();
        let user = User {
            id,
            company_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            full_name: full_name.to_string(),
            email: email.map(str::to_string),
            is_active: true,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn upsert_user_role(&self, user_id: i64, role_id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();

        let pair = (user_id, role_id);
        if !state.user_roles.contains(&pair) {
            state.user_roles.push(pair);
        }
        Ok(())
    }
}
