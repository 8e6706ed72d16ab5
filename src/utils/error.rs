use actix_web::{http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Erros expostos pela camada de dados.
///
/// Cada variante tem um status HTTP e uma mensagem estável; o detalhe do
/// driver fica só no log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("user not found")]
    NotFound,

    #[error("email already registered")]
    Conflict,

    #[error("{0}")]
    ValidationFailed(String),

    #[error("store unavailable")]
    StoreUnavailable(#[source] sqlx::Error),
}

/// Corpo JSON de erro: `{"status": "error", "error": "..."}`
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationFailed(msg.into())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return AppError::NotFound;
        }

        match err.as_database_error().map(|db_err| db_err.kind()) {
            Some(ErrorKind::UniqueViolation) => AppError::Conflict,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => {
                log::warn!("⚠️  Constraint rejected input: {}", err);
                AppError::validation("invalid user data")
            }
            _ => {
                log::error!("❌ Store error: {}", err);
                AppError::StoreUnavailable(err)
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            status: "error".to_string(),
            error: self.to_string(),
        })
    }
}

/// Handler para `web::JsonConfig`: corpo malformado vira `ValidationFailed`
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    log::warn!("⚠️  Rejected JSON body: {}", err);
    AppError::validation(err.to_string()).into()
}

/// Handler para `web::PathConfig`: id não numérico vira `ValidationFailed`
pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &HttpRequest,
) -> actix_web::Error {
    log::warn!("⚠️  Rejected path: {}", err);
    AppError::validation(format!("invalid user id: {}", err)).into()
}

/// Erros de configuração lidos do ambiente
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}
