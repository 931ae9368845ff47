use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roomescape::service::ServiceError;
use serde_json::json;
use tracing::error;

/// サービス層エラーをHTTPレスポンスへ変換するラッパー
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::InUse { .. } => StatusCode::CONFLICT,
            ServiceError::Integrity(_) | ServiceError::DataAccess(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!("内部エラー: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError(ServiceError::Validation {
                    field: "name",
                    reason: "blank".to_owned(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError(ServiceError::NotFound {
                    entity: "time",
                    id: 1,
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError(ServiceError::InUse {
                    entity: "time",
                    id: 1,
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError(ServiceError::Integrity("broken".to_owned())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
