use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, warn};

use super::directory::{AccountDirectory, DirectoryError};
use super::domain::{AccountKind, Registration};
use crate::envelope::{fail, first_blank, ok};

const REGISTRATION_FAILED: &str = "Registration failed";
const LOGIN_FAILED: &str = "Login failed";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub child_name: Option<String>,
    pub user_type: String,
}

impl RegisterPayload {
    fn missing_field(&self) -> Option<&'static str> {
        first_blank(&[
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("userType", self.user_type.as_str()),
        ])
    }
}

impl From<RegisterPayload> for Registration {
    fn from(payload: RegisterPayload) -> Self {
        Registration {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            child_name: payload.child_name.unwrap_or_default(),
            kind: AccountKind::from(payload.user_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
    pub user_type: String,
}

impl LoginPayload {
    fn missing_field(&self) -> Option<&'static str> {
        first_blank(&[
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("userType", self.user_type.as_str()),
        ])
    }
}

/// Router exposing `/api/auth/register` and `/api/auth/login`.
pub fn account_router(directory: Arc<AccountDirectory>) -> Router {
    Router::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .with_state(directory)
}

pub(crate) async fn register_handler(
    State(directory): State<Arc<AccountDirectory>>,
    payload: Result<Json<RegisterPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!(%rejection, "rejected registration payload");
            return fail(StatusCode::BAD_REQUEST, REGISTRATION_FAILED);
        }
    };
    if let Some(field) = payload.missing_field() {
        warn!(field, "registration payload missing required field");
        return fail(StatusCode::BAD_REQUEST, REGISTRATION_FAILED);
    }

    match directory.register(payload.into()) {
        Ok(account) => ok(account.profile()),
        Err(err @ DirectoryError::DuplicateAccount) => {
            fail(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err) => {
            error!(error = %err, "registration failed");
            fail(StatusCode::INTERNAL_SERVER_ERROR, REGISTRATION_FAILED)
        }
    }
}

pub(crate) async fn login_handler(
    State(directory): State<Arc<AccountDirectory>>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!(%rejection, "rejected login payload");
            return fail(StatusCode::BAD_REQUEST, LOGIN_FAILED);
        }
    };
    if let Some(field) = payload.missing_field() {
        warn!(field, "login payload missing required field");
        return fail(StatusCode::BAD_REQUEST, LOGIN_FAILED);
    }

    let kind = AccountKind::from(payload.user_type);
    match directory.login(&payload.email, &payload.password, &kind) {
        Ok(Some(account)) => ok(account.profile()),
        Ok(None) => fail(StatusCode::BAD_REQUEST, INVALID_CREDENTIALS),
        Err(err) => {
            error!(error = %err, "login failed");
            fail(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED)
        }
    }
}
