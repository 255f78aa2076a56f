use std::sync::Arc;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::clock::ManualClock;
use crate::requests::domain::{NewCheckinRequest, RequestKind};
use crate::requests::{CreateRequestPayload, RequestLedger};

pub(super) fn new_request(child_name: &str, parent_email: &str) -> NewCheckinRequest {
    NewCheckinRequest {
        kind: RequestKind::Checkin,
        child_name: child_name.to_string(),
        child_grade: "3".to_string(),
        parent_email: parent_email.to_string(),
        parent_name: "Jo".to_string(),
        message: "Running ten minutes late".to_string(),
    }
}

pub(super) fn create_payload(child_name: &str) -> CreateRequestPayload {
    CreateRequestPayload {
        kind: "checkin".to_string(),
        child_name: child_name.to_string(),
        child_grade: Some("3".to_string()),
        parent_email: "jo@x.com".to_string(),
        parent_name: Some("Jo".to_string()),
        request_message: Some("Dropping off after the dentist".to_string()),
    }
}

pub(super) fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::starting_at(
        Utc.with_ymd_and_hms(2025, 9, 2, 7, 45, 0)
            .single()
            .expect("valid timestamp"),
    ))
}

pub(super) fn build_ledger() -> (Arc<RequestLedger>, Arc<ManualClock>) {
    let clock = clock();
    let ledger = Arc::new(RequestLedger::with_clock(clock.clone()));
    (ledger, clock)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
