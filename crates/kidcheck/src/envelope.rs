//! Uniform `{success, data | error}` response body shared by every API route.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// `200 OK` carrying `data`.
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// Failure envelope with the given status and display message.
pub fn fail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::failure(message))).into_response()
}

/// Name of the first blank required field, if any.
pub fn first_blank(fields: &[(&'static str, &str)]) -> Option<&'static str> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_error_field() {
        let body = serde_json::to_value(ApiResponse::success(json!({ "total": 1 })))
            .expect("serializes");
        assert_eq!(body, json!({ "success": true, "data": { "total": 1 } }));
    }

    #[test]
    fn failure_omits_data_field() {
        let body = serde_json::to_value(ApiResponse::<()>::failure("Request not found"))
            .expect("serializes");
        assert_eq!(
            body,
            json!({ "success": false, "error": "Request not found" })
        );
    }

    #[test]
    fn first_blank_names_offending_field() {
        assert_eq!(first_blank(&[("email", "jo@x.com"), ("password", " ")]), Some("password"));
        assert_eq!(first_blank(&[("email", "jo@x.com")]), None);
    }

    #[test]
    fn fail_sets_status() {
        let response = fail(StatusCode::BAD_REQUEST, "User already exists");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
