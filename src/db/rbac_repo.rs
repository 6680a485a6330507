// src/db/rbac_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::common::error::AppError;
use crate::models::rbac::{Module, Permission, Role};

#[derive(Clone)]
pub struct RbacRepository {
    pool: PgPool,
}

impl RbacRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Módulo (chave natural: code)
    pub async fn upsert_module(
        &self,
        code: &str,
        name: &str,
        position: i32,
        base_path: &str,
    ) -> Result<Module, AppError> {
        let module = sqlx::query_as::<_, Module>(
            r#"
            INSERT INTO modules (code, name, position, base_path, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            ON CONFLICT (code) DO UPDATE
                SET name      = EXCLUDED.name,
                    position  = EXCLUDED.position,
                    base_path = EXCLUDED.base_path,
                    is_active = TRUE
            RETURNING id, code, name, position, base_path, is_active
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(position)
        .bind(base_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(module)
    }

    // 2. Permissão (chave natural: code). O módulo dono já deve existir.
    pub async fn upsert_permission(
        &self,
        code: &str,
        description: &str,
        module_id: i64,
    ) -> Result<Permission, AppError> {
        let permission = sqlx::query_as::<_, Permission>(
            r#"
            INSERT INTO permissions (code, description, module_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (code) DO UPDATE
                SET description = EXCLUDED.description,
                    module_id   = EXCLUDED.module_id
            RETURNING id, code, description, module_id
            "#,
        )
        .bind(code)
        .bind(description)
        .bind(module_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(permission)
    }

    // 3. Cargo (chave natural: name)
    pub async fn upsert_role(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Role, AppError> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (name, description, is_active)
            VALUES ($1, $2, TRUE)
            ON CONFLICT (name) DO UPDATE
                SET description = EXCLUDED.description,
                    is_active   = TRUE
            RETURNING id, name, description, is_active
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(role)
    }

    /// Limpa todos os vínculos de um cargo. Roda dentro da mesma transação
    /// que `assign_permissions`, senão um erro no meio deixaria o cargo vazio.
    pub async fn delete_role_permissions<'e, E>(
        &self,
        executor: E,
        role_id: i64,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
            .bind(role_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // 4. Vincular Cargo <-> Permissão
    pub async fn assign_permissions<'e, E>(
        &self,
        executor: E,
        role_id: i64,
        permission_ids: &[i64],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Inserção em massa usando UNNEST para performance.
        // ON CONFLICT DO NOTHING: duplicatas na lista não quebram o lote.
        let result = sqlx::query(
            r#"
            INSERT INTO role_permissions (role_id, permission_id)
            SELECT $1, unnest($2::bigint[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(permission_ids)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
