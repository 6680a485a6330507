// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::seed::GrantPolicy;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar, quem chamou decide.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self { db_pool })
    }
}

// Configuração do shell HTTP. Os padrões vêm do ambiente de dev
// (Vite em 5173, API em 4000).
pub struct ServerConfig {
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4000);

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        Self { port, cors_origin }
    }
}

// Configuração do seed. Nada aqui muda o ALGORITMO de provisionamento,
// só os seus parâmetros: custo do bcrypt, senha inicial do admin, política
// para códigos de permissão não resolvidos e um catálogo alternativo.
pub struct SeedConfig {
    pub bcrypt_cost: u32,
    pub admin_password: Option<String>,
    pub policy: GrantPolicy,
    pub catalog_path: Option<PathBuf>,
}

impl SeedConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bcrypt_cost = match env::var("SEED_BCRYPT_COST") {
            Ok(raw) => raw.parse().context("SEED_BCRYPT_COST inválido")?,
            // Custo moderado, adequado para dev. Produção sobe via env.
            Err(_) => 10,
        };

        let policy = match env::var("SEED_GRANTS_POLICY").as_deref() {
            Ok("tolerant") => GrantPolicy::Tolerant,
            Ok("strict") | Err(_) => GrantPolicy::Strict,
            Ok(other) => anyhow::bail!("SEED_GRANTS_POLICY inválida: {other}"),
        };

        Ok(Self {
            bcrypt_cost,
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            policy,
            catalog_path: env::var("SEED_CATALOG").ok().map(PathBuf::from),
        })
    }
}
