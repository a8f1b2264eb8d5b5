use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum VoltError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing session token")]
    MissingToken,

    #[error("invalid or expired session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("lead {0} not found")]
    LeadNotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("geo lookup request failed: {0}")]
    GeoUpstream(#[from] reqwest::Error),

    #[error("geo lookup returned status {0}")]
    GeoStatus(StatusCode),
}

impl IntoResponse for VoltError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            VoltError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody {
                    code: "VALIDATION".to_string(),
                    message: msg,
                },
            ),
            // Unknown email and wrong password must be indistinguishable.
            VoltError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Invalid credentials.".to_string(),
                },
            ),
            VoltError::MissingToken | VoltError::InvalidToken(_) => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Invalid or missing session token.".to_string(),
                },
            ),
            VoltError::LeadNotFound(id) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: format!("Lead {id} not found."),
                },
            ),
            VoltError::Database(ref e) => {
                error!(error = %e, "database failure");
                internal_error()
            }
            VoltError::Json(ref e) => {
                error!(error = %e, "serialization failure");
                internal_error()
            }
            VoltError::PasswordHash(ref e) => {
                error!(error = %e, "password hashing failure");
                internal_error()
            }
            VoltError::UrlParse(ref e) => {
                error!(error = %e, "URL construction failure");
                internal_error()
            }
            VoltError::GeoUpstream(ref e) => {
                error!(error = %e, "geo upstream request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorBody {
                        code: "BAD_GATEWAY".to_string(),
                        message: "Geographic lookup service is unavailable.".to_string(),
                    },
                )
            }
            VoltError::GeoStatus(code) => {
                error!(status = %code, "geo upstream returned error status");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorBody {
                        code: "BAD_GATEWAY".to_string(),
                        message: "Geographic lookup service is unavailable.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

fn internal_error() -> (StatusCode, ApiErrorBody) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiErrorBody {
            code: "INTERNAL_ERROR".to_string(),
            message: "An internal server error occurred.".to_string(),
        },
    )
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
