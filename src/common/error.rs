use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// As três primeiras variantes são erros de integridade do catálogo de seed:
// uma referência pendurada na especificação aborta a execução inteira.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Módulo '{module}' não encontrado para a permissão '{permission}'")]
    ModuleNotFound { permission: String, module: String },

    #[error("Cargo '{0}' não encontrado")]
    RoleNotFound(String),

    #[error("Permissão '{permission}' do cargo '{role}' não existe no catálogo")]
    UnresolvedPermission { role: String, permission: String },

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // Erros de integridade do catálogo: a requisição (ou o seed) pediu
            // algo que a especificação não declara.
            AppError::ModuleNotFound { .. }
            | AppError::RoleNotFound(_)
            | AppError::UnresolvedPermission { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }

            // Todos os outros erros (DatabaseError, BcryptError, InternalServerError)
            // viram 500. O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
