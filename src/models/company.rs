// src/models/company.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---
// 1. Company (A "Empresa")
// ---
// A conta emissora, identificada pelo RUC (chave natural do upsert).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub ruc: String,
    pub legal_name: String,
    pub trade_name: Option<String>,
    pub address: Option<String>,
    pub ubigeo: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// ---
// 2. Warehouse (O "Almacén")
// ---
// Local físico de estoque. A unicidade é composta: (company_id, name).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
}
