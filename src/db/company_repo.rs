// src/db/company_repo.rs

use sqlx::PgPool;

use crate::common::error::AppError;
use crate::models::company::{Company, Warehouse};
use crate::seed::catalog::CompanySpec;

// Repositório da empresa emissora e dos seus almacéns.
#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria ou atualiza a empresa, usando o RUC como chave natural.
    /// Reaplicar o seed nunca cria uma segunda linha.
    pub async fn upsert_company(&self, spec: &CompanySpec) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (ruc, legal_name, trade_name, address, ubigeo, email, phone, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
            ON CONFLICT (ruc) DO UPDATE
                SET legal_name = EXCLUDED.legal_name,
                    trade_name = EXCLUDED.trade_name,
                    address    = EXCLUDED.address,
                    ubigeo     = EXCLUDED.ubigeo,
                    email      = EXCLUDED.email,
                    phone      = EXCLUDED.phone,
                    is_active  = TRUE
            RETURNING id, ruc, legal_name, trade_name, address, ubigeo, email, phone, is_active, created_at
            "#,
        )
        .bind(&spec.ruc)
        .bind(&spec.legal_name)
        .bind(&spec.trade_name)
        .bind(&spec.address)
        .bind(&spec.ubigeo)
        .bind(&spec.email)
        .bind(&spec.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }

    /// Cria ou atualiza um almacén. A chave natural é composta:
    /// (company_id, name), igual ao UNIQUE da tabela.
    pub async fn upsert_warehouse(
        &self,
        company_id: i64,
        name: &str,
        address: &str,
    ) -> Result<Warehouse, AppError> {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            INSERT INTO warehouses (company_id, name, address, is_active)
            VALUES ($1, $2, $3, TRUE)
            ON CONFLICT (company_id, name) DO UPDATE
                SET address   = EXCLUDED.address,
                    is_active = TRUE
            RETURNING id, company_id, name, address, is_active
            "#,
        )
        .bind(company_id)
        .bind(name)
        .bind(address)
        .fetch_one(&self.pool)
        .await?;

        Ok(warehouse)
    }
}
