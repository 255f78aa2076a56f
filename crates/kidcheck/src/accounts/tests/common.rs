use std::sync::Arc;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::accounts::domain::{AccountKind, Registration};
use crate::accounts::{AccountDirectory, RegisterPayload};
use crate::clock::ManualClock;

pub(super) fn registration(email: &str) -> Registration {
    Registration {
        name: "Jo".to_string(),
        email: email.to_string(),
        password: "p1".to_string(),
        child_name: "Kid".to_string(),
        kind: AccountKind::Parent,
    }
}

pub(super) fn staff_registration(email: &str) -> Registration {
    Registration {
        name: "Ms. Rivera".to_string(),
        email: email.to_string(),
        password: "front-office".to_string(),
        child_name: String::new(),
        kind: AccountKind::Staff,
    }
}

pub(super) fn register_payload(email: &str) -> RegisterPayload {
    RegisterPayload {
        name: "Jo".to_string(),
        email: email.to_string(),
        password: "p1".to_string(),
        child_name: Some("Kid".to_string()),
        user_type: "parent".to_string(),
    }
}

pub(super) fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::starting_at(
        Utc.with_ymd_and_hms(2025, 9, 2, 7, 45, 0)
            .single()
            .expect("valid timestamp"),
    ))
}

pub(super) fn build_directory() -> (Arc<AccountDirectory>, Arc<ManualClock>) {
    let clock = clock();
    let directory = Arc::new(AccountDirectory::with_clock(clock.clone()));
    (directory, clock)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
