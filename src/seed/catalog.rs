// src/seed/catalog.rs
//
// O catálogo de provisionamento: a especificação declarativa do estado
// canônico do banco (empresa, almacén, módulos, permissões, cargos e o
// usuário administrador). O provisioner recebe um `SeedCatalog` injetado,
// então os testes podem usar fixtures mínimas e um deploy pode carregar
// um catálogo alternativo em JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySpec {
    pub ruc: String,
    pub legal_name: String,
    pub trade_name: Option<String>,
    pub address: Option<String>,
    pub ubigeo: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseSpec {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub code: String,
    pub name: String,
    pub position: i32,
    pub base_path: String,
}

impl ModuleSpec {
    pub fn new(code: &str, name: &str, position: i32, base_path: &str) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            position,
            base_path: base_path.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionSpec {
    pub code: String,
    pub description: String,
    /// Código do módulo dono. Deve existir na lista de módulos do catálogo.
    pub module: String,
}

impl PermissionSpec {
    pub fn new(code: &str, description: &str, module: &str) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            module: module.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSpec {
    pub name: String,
    pub description: Option<String>,
}

impl RoleSpec {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
        }
    }
}

/// Quais códigos de permissão um cargo deve ter. A reconciliação substitui
/// o conjunto inteiro a cada execução (nada de diffs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleGrants {
    pub role: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserSpec {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: Option<String>,
    /// Cargo que o administrador deve ter ao final do seed.
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCatalog {
    pub company: CompanySpec,
    pub warehouse: WarehouseSpec,
    pub modules: Vec<ModuleSpec>,
    pub permissions: Vec<PermissionSpec>,
    pub roles: Vec<RoleSpec>,
    pub grants: Vec<RoleGrants>,
    pub admin: AdminUserSpec,
}

impl SeedCatalog {
    /// O catálogo padrão do sistema: 7 módulos, a matriz completa de
    /// permissões e os 4 cargos com os seus conjuntos.
    pub fn default_catalog() -> Self {
        let modules = vec![
            ModuleSpec::new("SEGURIDAD", "Seguridad", 1, "/seguridad"),
            ModuleSpec::new("MAESTROS", "Maestros", 2, "/maestros"),
            ModuleSpec::new("INVENTARIO", "Inventario", 3, "/inventario"),
            ModuleSpec::new("COMPRAS", "Compras", 4, "/compras"),
            ModuleSpec::new("VENTAS", "Ventas", 5, "/ventas"),
            ModuleSpec::new("SUNAT", "SUNAT", 6, "/sunat"),
            ModuleSpec::new("REPORTES", "Reportes", 7, "/reportes"),
        ];

        let permissions = vec![
            // Seguridad
            PermissionSpec::new("USUARIO_VER", "Ver usuarios", "SEGURIDAD"),
            PermissionSpec::new("USUARIO_CREAR", "Crear usuarios", "SEGURIDAD"),
            PermissionSpec::new("USUARIO_EDITAR", "Editar usuarios", "SEGURIDAD"),
            PermissionSpec::new("USUARIO_DESACTIVAR", "Desactivar usuarios", "SEGURIDAD"),
            PermissionSpec::new("ROL_VER", "Ver roles", "SEGURIDAD"),
            PermissionSpec::new("ROL_EDITAR", "Editar roles", "SEGURIDAD"),
            PermissionSpec::new("AUDIT_VER", "Ver auditoría", "SEGURIDAD"),
            // Maestros
            PermissionSpec::new("CLIENTE_VER", "Ver clientes", "MAESTROS"),
            PermissionSpec::new("CLIENTE_CREAR", "Crear clientes", "MAESTROS"),
            PermissionSpec::new("CLIENTE_EDITAR", "Editar clientes", "MAESTROS"),
            PermissionSpec::new("PROVEEDOR_VER", "Ver proveedores", "MAESTROS"),
            PermissionSpec::new("PROVEEDOR_CREAR", "Crear proveedores", "MAESTROS"),
            PermissionSpec::new("PROVEEDOR_EDITAR", "Editar proveedores", "MAESTROS"),
            PermissionSpec::new("PRODUCTO_VER", "Ver productos", "MAESTROS"),
            PermissionSpec::new("PRODUCTO_CREAR", "Crear productos", "MAESTROS"),
            PermissionSpec::new("PRODUCTO_EDITAR", "Editar productos", "MAESTROS"),
            // Inventario
            PermissionSpec::new("STOCK_VER", "Ver stock", "INVENTARIO"),
            PermissionSpec::new("KARDEX_VER", "Ver kardex", "INVENTARIO"),
            PermissionSpec::new("STOCK_AJUSTAR", "Ajustar stock", "INVENTARIO"),
            PermissionSpec::new("MOVIMIENTO_VER", "Ver movimientos inventario", "INVENTARIO"),
            // Compras
            PermissionSpec::new("COMPRA_VER", "Ver compras", "COMPRAS"),
            PermissionSpec::new("COMPRA_CREAR", "Crear compras", "COMPRAS"),
            PermissionSpec::new("COMPRA_CONFIRMAR", "Confirmar compras", "COMPRAS"),
            PermissionSpec::new("COMPRA_ANULAR", "Anular compras", "COMPRAS"),
            // Ventas
            PermissionSpec::new("COMPROBANTE_VER", "Ver comprobantes", "VENTAS"),
            PermissionSpec::new("COMPROBANTE_CREAR", "Crear comprobantes", "VENTAS"),
            PermissionSpec::new("COMPROBANTE_CONFIRMAR", "Confirmar comprobantes", "VENTAS"),
            PermissionSpec::new("COMPROBANTE_ANULAR", "Anular comprobantes", "VENTAS"),
            PermissionSpec::new("PAGO_REGISTRAR", "Registrar pagos", "VENTAS"),
            // SUNAT
            PermissionSpec::new("SUNAT_ENVIAR", "Enviar a SUNAT", "SUNAT"),
            PermissionSpec::new("SUNAT_REENVIAR", "Reenviar a SUNAT", "SUNAT"),
            PermissionSpec::new("SUNAT_VER_CDR", "Ver CDR", "SUNAT"),
            // Reportes
            PermissionSpec::new("REPORTES_VER", "Ver reportes", "REPORTES"),
            PermissionSpec::new("REPORTES_EXPORTAR", "Exportar reportes", "REPORTES"),
        ];

        // ADMIN recebe a matriz inteira.
        let all_codes: Vec<String> = permissions.iter().map(|p| p.code.clone()).collect();

        let grants = vec![
            RoleGrants {
                role: "ADMIN".into(),
                permissions: all_codes,
            },
            RoleGrants {
                role: "VENTAS".into(),
                permissions: vec![
                    "CLIENTE_VER".into(),
                    "CLIENTE_CREAR".into(),
                    "CLIENTE_EDITAR".into(),
                    "COMPROBANTE_VER".into(),
                    "COMPROBANTE_CREAR".into(),
                    "COMPROBANTE_CONFIRMAR".into(),
                    "COMPROBANTE_ANULAR".into(),
                    "PAGO_REGISTRAR".into(),
                    "SUNAT_ENVIAR".into(),
                    "SUNAT_REENVIAR".into(),
                    "SUNAT_VER_CDR".into(),
                    "REPORTES_VER".into(),
                ],
            },
            RoleGrants {
                role: "ALMACEN".into(),
                permissions: vec![
                    "PRODUCTO_VER".into(),
                    "PRODUCTO_CREAR".into(),
                    "PRODUCTO_EDITAR".into(),
                    "STOCK_VER".into(),
                    "KARDEX_VER".into(),
                    "STOCK_AJUSTAR".into(),
                    "MOVIMIENTO_VER".into(),
                    "COMPRA_VER".into(),
                    "COMPRA_CREAR".into(),
                    "COMPRA_CONFIRMAR".into(),
                    "COMPRA_ANULAR".into(),
                ],
            },
            RoleGrants {
                role: "CONTADOR".into(),
                permissions: vec![
                    "COMPROBANTE_VER".into(),
                    "SUNAT_VER_CDR".into(),
                    "REPORTES_VER".into(),
                    "REPORTES_EXPORTAR".into(),
                    "AUDIT_VER".into(),
                ],
            },
        ];

        Self {
            company: CompanySpec {
                ruc: "20123456789".into(),
                legal_name: "Mi Empresa S.A.C.".into(),
                trade_name: Some("Mi Empresa".into()),
                address: Some("Lima, Perú".into()),
                ubigeo: Some("150101".into()),
                email: Some("admin@miempresa.com".into()),
                phone: Some("999999999".into()),
            },
            warehouse: WarehouseSpec {
                name: "Almacén Principal".into(),
            },
            modules,
            permissions,
            roles: vec![
                RoleSpec::new("ADMIN", "Acceso total"),
                RoleSpec::new("VENTAS", "Ventas + clientes + SUNAT"),
                RoleSpec::new("ALMACEN", "Productos + stock + compras"),
                RoleSpec::new("CONTADOR", "Reportes + lectura SUNAT"),
            ],
            grants,
            admin: AdminUserSpec {
                username: "admin".into(),
                password: "Admin123*".into(), // troque depois do primeiro login
                full_name: "Administrador".into(),
                email: Some("admin@miempresa.com".into()),
                role: "ADMIN".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_catalog_has_expected_counts() {
        let catalog = SeedCatalog::default_catalog();
        assert_eq!(catalog.modules.len(), 7);
        assert_eq!(catalog.permissions.len(), 34);
        assert_eq!(catalog.roles.len(), 4);
        assert_eq!(catalog.grants.len(), 4);
    }

    #[test]
    fn every_permission_points_to_a_declared_module() {
        let catalog = SeedCatalog::default_catalog();
        let modules: HashSet<&str> = catalog.modules.iter().map(|m| m.code.as_str()).collect();

        for permission in &catalog.permissions {
            assert!(
                modules.contains(permission.module.as_str()),
                "permissão {} aponta para módulo inexistente {}",
                permission.code,
                permission.module
            );
        }
    }

    #[test]
    fn every_grant_references_declared_roles_and_permissions() {
        let catalog = SeedCatalog::default_catalog();
        let roles: HashSet<&str> = catalog.roles.iter().map(|r| r.name.as_str()).collect();
        let permissions: HashSet<&str> =
            catalog.permissions.iter().map(|p| p.code.as_str()).collect();

        for grant in &catalog.grants {
            assert!(roles.contains(grant.role.as_str()));
            for code in &grant.permissions {
                assert!(
                    permissions.contains(code.as_str()),
                    "cargo {} concede permissão inexistente {}",
                    grant.role,
                    code
                );
            }
        }
    }

    #[test]
    fn admin_role_is_declared_and_gets_the_whole_matrix() {
        let catalog = SeedCatalog::default_catalog();
        assert!(catalog.roles.iter().any(|r| r.name == catalog.admin.role));

        let admin_grant = catalog
            .grants
            .iter()
            .find(|g| g.role == "ADMIN")
            .expect("ADMIN sem grants");
        assert_eq!(admin_grant.permissions.len(), catalog.permissions.len());
    }

    #[test]
    fn natural_keys_are_unique_within_the_catalog() {
        let catalog = SeedCatalog::default_catalog();

        let mut codes = HashSet::new();
        for module in &catalog.modules {
            assert!(codes.insert(&module.code), "módulo duplicado: {}", module.code);
        }

        let mut codes = HashSet::new();
        for permission in &catalog.permissions {
            assert!(
                codes.insert(&permission.code),
                "permissão duplicada: {}",
                permission.code
            );
        }

        let mut names = HashSet::new();
        for role in &catalog.roles {
            assert!(names.insert(&role.name), "cargo duplicado: {}", role.name);
        }
    }
}
