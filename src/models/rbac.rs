// src/models/rbac.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// O que sai do banco (Tabela modules)
// `position` define a ordem do menu no frontend; não é imposta pelo banco.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub position: i32,
    pub base_path: String,
    pub is_active: bool,
}

// O que sai do banco (Tabela permissions)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: i64,
    pub code: String,
    pub description: String,
    pub module_id: i64,
}

// O que sai do banco (Tabela roles)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}
