// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Mensagem genérica do erro de posse: não confirma se o código existe.
pub const CONTACT_ADMIN: &str = "Contact admin";

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    // Falha de validação dos campos do payload (validator)
    #[error("Erro de validação")]
    InvalidPayload(#[from] validator::ValidationErrors),

    // Regra de negócio violada (ex: "Invalid Date")
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    NotFound(String),

    // O registro existe, mas pertence a outro cliente
    #[error("Contact admin")]
    AuthorizationMismatch,

    #[error("{0}")]
    UniqueConstraintViolation(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPayload(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthorizationMismatch => StatusCode::FORBIDDEN,
            AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Os payloads são camelCase no JSON; o validator reporta o nome do campo em Rust.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::InvalidPayload(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(camel_case(&field), messages);
                }
                let body = Json(json!({
                    "error": "Bad Request! Consult the documentation",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::UniqueConstraintViolation(msg) => msg,
            AppError::AuthorizationMismatch => CONTACT_ADMIN.to_string(),

            // Todos os outros erros viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe só o genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
