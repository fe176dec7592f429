use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pizza_restaurant_service::StoreError;

use crate::models::{ApiErrorResponse, ApiErrorsResponse};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("Bad request: {0:?}")]
    BadRequest(Vec<String>),
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) | StoreError::Validation(_) => {
                ApiError::BadRequest(vec![err.to_string()])
            }
            StoreError::Database(_) | StoreError::Connection(_) => {
                tracing::error!(error = %err, "store failure");
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::RestaurantNotFound => (
                StatusCode::NOT_FOUND,
                Json(ApiErrorResponse {
                    error: "Restaurant not found".to_string(),
                }),
            )
                .into_response(),
            ApiError::BadRequest(errors) => {
                (StatusCode::BAD_REQUEST, Json(ApiErrorsResponse { errors })).into_response()
            }
            ApiError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorsResponse { errors: vec![msg] }),
            )
                .into_response(),
        }
    }
}
