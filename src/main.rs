// src/main.rs

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::get,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use facturador_backend::config::{AppState, ServerConfig};

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let server = ServerConfig::from_env();

    // CORS: "*" libera tudo (dev), senão só a origem configurada, com credenciais.
    let cors = if server.cors_origin == "*" {
        CorsLayer::permissive()
    } else {
        let origin = server
            .cors_origin
            .parse::<HeaderValue>()
            .expect("CORS_ORIGIN inválida");

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(true)
    };

    let app = Router::new()
        .route("/health", get(|| async { Json(json!({ "ok": true })) }))
        .layer(cors)
        .with_state(app_state);

    // Inicia o servidor
    let addr = format!("0.0.0.0:{}", server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
