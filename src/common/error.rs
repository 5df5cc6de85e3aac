use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Falhas do motor de validação dos campos configuráveis: campo -> código do erro
    #[error("Dados extras inválidos")]
    CustomDataValidationError(HashMap<String, String>),

    #[error("O campo dados_extras deve ser um objeto JSON")]
    CustomDataJson,

    #[error("Agregado não encontrado")]
    AgregadoNotFound,

    #[error("Esporádico não encontrado")]
    EsporadicoNotFound,

    #[error("Campo de configuração não encontrado")]
    CampoNotFound,

    #[error("Lead não encontrado")]
    LeadNotFound,

    #[error("Lembrete não encontrado")]
    LembreteNotFound,

    #[error("Nenhum campo selecionado para exportação")]
    ExportSemCampos,

    #[error("Reordenação inválida: {0}")]
    ReordenacaoInvalida(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de E/S no armazenamento local")]
    LocalStoreIo(#[from] std::io::Error),

    // Blob local ilegível. O arquivo anterior fica intacto; nada é resetado.
    #[error("Armazenamento local corrompido: {0}")]
    LocalStoreCorrupted(String),

    #[error("Erro de serialização")]
    SerializationError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            // Mesmo formato para os campos configuráveis, com códigos no lugar de mensagens.
            AppError::CustomDataValidationError(details) => {
                let body = Json(json!({
                    "error": "Um ou mais campos extras são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::CustomDataJson => (
                StatusCode::BAD_REQUEST,
                "O campo dados_extras deve ser um objeto JSON.".to_string(),
            ),
            AppError::AgregadoNotFound => {
                (StatusCode::NOT_FOUND, "Agregado não encontrado.".to_string())
            }
            AppError::EsporadicoNotFound => {
                (StatusCode::NOT_FOUND, "Esporádico não encontrado.".to_string())
            }
            AppError::CampoNotFound => (
                StatusCode::NOT_FOUND,
                "Campo de configuração não encontrado.".to_string(),
            ),
            AppError::LeadNotFound => (StatusCode::NOT_FOUND, "Lead não encontrado.".to_string()),
            AppError::LembreteNotFound => {
                (StatusCode::NOT_FOUND, "Lembrete não encontrado.".to_string())
            }
            AppError::ExportSemCampos => (
                StatusCode::BAD_REQUEST,
                "Selecione pelo menos um campo para exportar.".to_string(),
            ),
            AppError::ReordenacaoInvalida(motivo) => (StatusCode::BAD_REQUEST, motivo),
            AppError::UniqueConstraintViolation(mensagem) => (StatusCode::CONFLICT, mensagem),

            // Todos os outros erros (banco, armazenamento local, serialização) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
