// src/bin/seed.rs
//
// Seed one-shot do banco: leva o esquema ao estado canônico declarado no
// catálogo (empresa, almacén, módulos, permissões, cargos e usuário admin).
// Roda uma vez por ambiente; reaplicar converge para o mesmo estado.

use anyhow::Context;

use facturador_backend::config::{AppState, SeedConfig};
use facturador_backend::seed::{PgSeedStore, SeedCatalog, SeedProvisioner};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Qualquer erro fatal: loga e sai com status diferente de zero.
    if let Err(e) = run().await {
        tracing::error!("❌ Erro no seed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = SeedConfig::from_env()?;
    let state = AppState::new().await?;

    sqlx::migrate!()
        .run(&state.db_pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados")?;

    // Catálogo: o padrão embutido, ou um arquivo JSON apontado por SEED_CATALOG.
    let mut catalog = match &config.catalog_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Falha ao ler o catálogo {}", path.display()))?;
            serde_json::from_str::<SeedCatalog>(&raw)
                .with_context(|| format!("Catálogo inválido em {}", path.display()))?
        }
        None => SeedCatalog::default_catalog(),
    };

    // A senha inicial do admin pode vir do ambiente.
    if let Some(password) = &config.admin_password {
        catalog.admin.password = password.clone();
    }

    let provisioner = SeedProvisioner::new(PgSeedStore::new(state.db_pool.clone()))
        .with_policy(config.policy)
        .with_bcrypt_cost(config.bcrypt_cost);

    let summary = provisioner.provision(&catalog).await?;

    tracing::info!(
        "✅ Seed concluído: {} módulos, {} permissões, {} cargos, {} vínculos",
        summary.modules,
        summary.permissions,
        summary.roles,
        summary.grants
    );

    // Credencial inicial, ecoada uma única vez para o operador.
    println!("➡️ Usuário: {}", summary.admin_username);
    println!("➡️ Password: {}", catalog.admin.password);

    Ok(())
}
