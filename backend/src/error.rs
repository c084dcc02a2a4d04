use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Failure of a task operation.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Malformed body, wrong id for the operation, or a missing required field.
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Task with Id {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl TaskError {
    pub fn invalid(message: impl Into<String>) -> Self {
        TaskError::InvalidRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            TaskError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            TaskError::Storage(e) => tracing::error!(error = %e, "storage failure"),
            other => tracing::debug!(%status, "request rejected: {}", other),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_http_status() {
        assert_eq!(TaskError::invalid("bad").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(TaskError::NotFound(1).status_code(), StatusCode::NOT_FOUND);
        let storage = TaskError::from(StoreError::Database(sqlx::Error::PoolClosed));
        assert_eq!(storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_are_readable() {
        assert_eq!(TaskError::NotFound(12).to_string(), "Task with Id 12 not found");
        assert_eq!(
            TaskError::invalid("Descricao or Titulo is required").to_string(),
            "Descricao or Titulo is required"
        );
    }
}
