// src/db/user_repo.rs

use sqlx::PgPool;

use crate::common::error::AppError;
use crate::models::user::User;

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria ou atualiza o usuário pelo username. Numa reaplicação do seed o
    /// hash é substituído — a senha volta a ser a do catálogo.
    pub async fn upsert_user(
        &self,
        company_id: i64,
        username: &str,
        password_hash: &str,
        full_name: &str,
        email: Option<&str>,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (company_id, username, password_hash, full_name, email, is_active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            ON CONFLICT (username) DO UPDATE
                SET company_id    = EXCLUDED.company_id,
                    password_hash = EXCLUDED.password_hash,
                    full_name     = EXCLUDED.full_name,
                    email         = EXCLUDED.email,
                    is_active     = TRUE
            RETURNING id, company_id, username, password_hash, full_name, email, is_active, created_at
            "#,
        )
        .bind(company_id)
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Atribui um cargo a um usuário (tabela-ponte). Se o par já existe,
    /// não faz nada — rodar o seed duas vezes não duplica o vínculo.
    pub async fn upsert_user_role(&self, user_id: i64, role_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
