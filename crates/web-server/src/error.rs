use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use relevancy::error::RelevancyError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Search error: {0}")]
    Search(#[from] RelevancyError),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Lets handlers bubble up `validator` failures with `?`.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(DbError::NotFound) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Candidate not found" }),
            ),
            AppError::Database(DbError::DuplicateEmail(email)) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("A candidate with email '{email}' already exists.") }),
            ),
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal database error occurred" }),
                )
            }
            // A rejected search still answers with an (empty) result set.
            AppError::Search(search_err) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": search_err.to_string(), "results": [] }),
            ),
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::Database(DbError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_email_maps_to_400() {
        let response =
            AppError::Database(DbError::DuplicateEmail("a@example.com".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn empty_query_maps_to_400() {
        let response = AppError::Search(RelevancyError::EmptyQuery).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_failure_maps_to_400() {
        let response = AppError::Validation("name must not be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
