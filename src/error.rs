use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use thiserror::Error;

use crate::models::{FieldError, Message};
use crate::store::StoreError;

pub const NOT_FOUND_MSG: &str = "Link not found";

/// Failures a request handler can answer with.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", NOT_FOUND_MSG)]
    NotFound,

    #[error("{msg}")]
    Rejected { status: StatusCode, msg: String },

    #[error(transparent)]
    Store(StoreError),
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(err) => err.into(),
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(Message::new(msg))).into_response()
            }
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(Message::new(NOT_FOUND_MSG))).into_response()
            }
            ApiError::Rejected { status, msg } => {
                (status, Json(Message::new(msg))).into_response()
            }
            ApiError::Store(err) => {
                error!("{err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
            }
        }
    }
}

/// Failures that keep the service from starting or serving.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("database unavailable: {0}")]
    Database(#[from] sqlx::Error),

    #[error("could not bind listener: {0}")]
    Bind(std::io::Error),

    #[error("server error: {0}")]
    Server(#[from] hyper::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> String {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn not_found_is_json_message() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, r#"{"msg":"Link not found"}"#);
    }

    #[tokio::test]
    async fn store_validation_maps_to_bad_request() {
        let err: ApiError = StoreError::Validation(FieldError::Missing("url")).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await, r#"{"msg":"url is required"}"#);
    }

    #[tokio::test]
    async fn rejected_keeps_its_status() {
        let err = ApiError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            msg: "Expected request with `Content-Type: application/json`".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body_of(response).await.starts_with(r#"{"msg":"Expected"#));
    }

    #[tokio::test]
    async fn database_errors_are_not_leaked() {
        let err: ApiError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await, "Server Error");
    }
}
