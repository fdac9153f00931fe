use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::error::Error;

/// Unified error type that renders as a JSON
/// `{"error": {"kind": "...", "message": "..."}}` response with an
/// appropriate HTTP status code. Only the kind and the human-readable
/// message cross the wire, never internal state.
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "error": { "kind": self.kind, "message": self.message } })),
        )
            .into_response()
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let status = match &e {
            Error::Validation(_) | Error::EmptyInput(_) => StatusCode::BAD_REQUEST,
            // The upstream's own status is forwarded verbatim when it sent one.
            Error::UpstreamFetch {
                status, ..
            } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Error::DivisionByZero(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::StoreWrite(_) | Error::StoreQuery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
        };
        Self {
            status,
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal",
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let err = ApiError::from(Error::Validation("bad date".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.kind, "validation");
    }

    #[test]
    fn test_empty_input_maps_to_400() {
        let err = ApiError::from(Error::EmptyInput("price samples"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.kind, "empty_input");
    }

    #[test]
    fn test_upstream_status_is_forwarded_verbatim() {
        let err = ApiError::from(Error::UpstreamFetch {
            status: Some(429),
            message: "rate limited".into(),
        });
        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.kind, "upstream_fetch");
    }

    #[test]
    fn test_transport_failure_maps_to_502() {
        let err = ApiError::from(Error::UpstreamFetch {
            status: None,
            message: "connection refused".into(),
        });
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_division_by_zero_maps_to_422() {
        let err = ApiError::from(Error::DivisionByZero("zero baseline"));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(Error::NotFound("no coins".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_errors_map_to_500() {
        assert_eq!(
            ApiError::from(Error::StoreWrite("disk full".into())).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(Error::StoreQuery("timeout".into())).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
