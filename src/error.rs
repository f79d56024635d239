use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// SQLite primary result codes.
const SQLITE_BUSY: i64 = 5;
const SQLITE_LOCKED: i64 = 6;
const SQLITE_CANTOPEN: i64 = 14;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if is_unavailable(&err) {
            AppError::StorageUnavailable(err.to_string())
        } else {
            AppError::Query(err.to_string())
        }
    }
}

fn is_unavailable(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => true,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .and_then(|code| code.parse::<i64>().ok())
            // extended codes carry the primary code in the low byte
            .map(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED | SQLITE_CANTOPEN))
            .unwrap_or(false),
        _ => false,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request failed: {}", self);

        let (status, error_message) = match self {
            AppError::StorageUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable")
            }
            AppError::Query(_) => (StatusCode::INTERNAL_SERVER_ERROR, "query failed"),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
