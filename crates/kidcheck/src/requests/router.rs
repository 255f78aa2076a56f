use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, warn};

use super::domain::{NewCheckinRequest, RequestId, RequestKind, RequestStatus, StatusUpdate};
use super::ledger::{LedgerError, RequestLedger};
use crate::envelope::{fail, first_blank, ok};

const LIST_FAILED: &str = "Failed to get requests";
const GET_FAILED: &str = "Failed to get request";
const CREATE_FAILED: &str = "Failed to create request";
const UPDATE_FAILED: &str = "Failed to update request";
const DELETE_FAILED: &str = "Failed to delete request";
const STATS_FAILED: &str = "Failed to get stats";
const DELETED: &str = "Request deleted successfully";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequestsQuery {
    #[serde(default)]
    pub parent_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub child_name: String,
    #[serde(default)]
    pub child_grade: Option<String>,
    pub parent_email: String,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub request_message: Option<String>,
}

impl CreateRequestPayload {
    fn missing_field(&self) -> Option<&'static str> {
        first_blank(&[
            ("type", self.kind.as_str()),
            ("childName", self.child_name.as_str()),
            ("parentEmail", self.parent_email.as_str()),
        ])
    }
}

impl From<CreateRequestPayload> for NewCheckinRequest {
    fn from(payload: CreateRequestPayload) -> Self {
        NewCheckinRequest {
            kind: RequestKind::from(payload.kind),
            child_name: payload.child_name,
            child_grade: payload.child_grade.unwrap_or_default(),
            parent_email: payload.parent_email,
            parent_name: payload.parent_name.unwrap_or_default(),
            message: payload.request_message.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateRequestPayload {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteRequestPayload {
    pub id: String,
}

/// Router exposing the `/api/requests` family of endpoints.
pub fn request_router(ledger: Arc<RequestLedger>) -> Router {
    Router::new()
        .route("/api/requests", get(list_handler).post(create_handler))
        .route("/api/requests/stats", get(stats_handler))
        .route("/api/requests/update", post(update_handler))
        .route("/api/requests/delete", post(delete_handler))
        .route("/api/requests/:id", get(get_handler))
        .with_state(ledger)
}

pub(crate) async fn list_handler(
    State(ledger): State<Arc<RequestLedger>>,
    query: Result<Query<ListRequestsQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(%rejection, "rejected request listing query");
            return fail(StatusCode::BAD_REQUEST, LIST_FAILED);
        }
    };

    let listing = match query.parent_email.as_deref() {
        Some(email) if !email.trim().is_empty() => ledger.list_by_parent_email(email),
        _ => ledger.list_all(),
    };
    match listing {
        Ok(requests) => ok(requests),
        Err(err) => unavailable(err, LIST_FAILED),
    }
}

pub(crate) async fn get_handler(
    State(ledger): State<Arc<RequestLedger>>,
    Path(id): Path<String>,
) -> Response {
    match ledger.find_by_id(&RequestId(id)) {
        Ok(Some(request)) => ok(request),
        Ok(None) => fail(
            StatusCode::NOT_FOUND,
            LedgerError::RequestNotFound.to_string(),
        ),
        Err(err) => unavailable(err, GET_FAILED),
    }
}

pub(crate) async fn create_handler(
    State(ledger): State<Arc<RequestLedger>>,
    payload: Result<Json<CreateRequestPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!(%rejection, "rejected request creation payload");
            return fail(StatusCode::BAD_REQUEST, CREATE_FAILED);
        }
    };
    if let Some(field) = payload.missing_field() {
        warn!(field, "request creation payload missing required field");
        return fail(StatusCode::BAD_REQUEST, CREATE_FAILED);
    }

    match ledger.create(payload.into()) {
        Ok(request) => ok(request),
        Err(err) => unavailable(err, CREATE_FAILED),
    }
}

pub(crate) async fn update_handler(
    State(ledger): State<Arc<RequestLedger>>,
    payload: Result<Json<UpdateRequestPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!(%rejection, "rejected request update payload");
            return fail(StatusCode::BAD_REQUEST, UPDATE_FAILED);
        }
    };
    if let Some(field) = first_blank(&[("status", payload.status.as_str())]) {
        warn!(field, "request update payload missing required field");
        return fail(StatusCode::BAD_REQUEST, UPDATE_FAILED);
    }

    let update = StatusUpdate {
        status: RequestStatus::from(payload.status),
        feedback: payload.feedback,
    };
    match ledger.update(&RequestId(payload.id), update) {
        Ok(request) => ok(request),
        Err(err @ LedgerError::RequestNotFound) => fail(StatusCode::BAD_REQUEST, err.to_string()),
        Err(err) => unavailable(err, UPDATE_FAILED),
    }
}

pub(crate) async fn delete_handler(
    State(ledger): State<Arc<RequestLedger>>,
    payload: Result<Json<DeleteRequestPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!(%rejection, "rejected request deletion payload");
            return fail(StatusCode::BAD_REQUEST, DELETE_FAILED);
        }
    };

    match ledger.delete(&RequestId(payload.id)) {
        Ok(true) => ok(DELETED),
        Ok(false) => fail(
            StatusCode::BAD_REQUEST,
            LedgerError::RequestNotFound.to_string(),
        ),
        Err(err) => unavailable(err, DELETE_FAILED),
    }
}

pub(crate) async fn stats_handler(State(ledger): State<Arc<RequestLedger>>) -> Response {
    match ledger.stats() {
        Ok(stats) => ok(stats),
        Err(err) => unavailable(err, STATS_FAILED),
    }
}

fn unavailable(err: LedgerError, message: &'static str) -> Response {
    error!(error = %err, "{message}");
    fail(StatusCode::INTERNAL_SERVER_ERROR, message)
}
