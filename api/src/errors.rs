use crate::store::StoreError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// Missing or unknown caller identity.
    Unauthenticated(&'static str),
    /// Registration with an email that is already taken.
    Conflict(&'static str),
    NotFound,
    Forbidden,
    ValidationError(String),
    Store(StoreError),
    InternalError(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(_) | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Every error leaves as `{"detail": "..."}`, the shape the bundled
/// frontend reads. Store and internal failures are logged and replaced by a
/// generic message so nothing about the backend leaks to the caller.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Unauthenticated(msg) | ApiError::Conflict(msg) => msg.to_owned(),
            ApiError::NotFound => "Not found".to_owned(),
            ApiError::Forbidden => "Not allowed".to_owned(),
            ApiError::ValidationError(msg) => msg,
            ApiError::Store(err) => {
                error!("Data store error: {}", err);
                "Database error".to_owned()
            }
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                "Internal server error".to_owned()
            }
        };

        (
            status,
            Json(serde_json::json!({
              "detail": detail
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        let cases = [
            (ApiError::Unauthenticated("x"), StatusCode::UNAUTHORIZED),
            (ApiError::Conflict("x"), StatusCode::BAD_REQUEST),
            (ApiError::NotFound, StatusCode::NOT_FOUND),
            (ApiError::Forbidden, StatusCode::FORBIDDEN),
            (
                ApiError::ValidationError("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Store(StoreError::Decode("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
