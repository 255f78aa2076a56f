use crate::infra::AppState;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use kidcheck::accounts::{account_router, AccountDirectory};
use kidcheck::envelope::fail;
use kidcheck::requests::{request_router, RequestLedger};
use serde_json::json;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::error;

const NOT_FOUND: &str = "Not found";

/// Full HTTP surface. Expects an `Extension<AppState>` layer.
pub(crate) fn with_checkin_routes(
    directory: Arc<AccountDirectory>,
    ledger: Arc<RequestLedger>,
) -> Router {
    account_router(directory)
        .merge(request_router(ledger))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/", get(index_endpoint))
        .fallback(static_asset_endpoint)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn index_endpoint(Extension(state): Extension<AppState>) -> Response {
    serve_file(state.public_dir.join("index.html")).await
}

pub(crate) async fn static_asset_endpoint(
    Extension(state): Extension<AppState>,
    uri: Uri,
) -> Response {
    if uri.path().starts_with("/api/") {
        return fail(StatusCode::NOT_FOUND, NOT_FOUND);
    }

    match resolve_asset(&state.public_dir, uri.path()) {
        Some(path) => serve_file(path).await,
        None => fail(StatusCode::NOT_FOUND, NOT_FOUND),
    }
}

/// Map a request path onto the public directory, refusing anything but plain segments.
fn resolve_asset(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    if relative.as_os_str().is_empty()
        || relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

async fn serve_file(path: PathBuf) -> Response {
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.essence_str().to_string())],
                bytes,
            )
                .into_response()
        }
        Err(err) if err.kind() == ErrorKind::NotFound => fail(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(err) => {
            error!(error = %err, path = %path.display(), "failed to read static asset");
            fail(StatusCode::NOT_FOUND, NOT_FOUND)
        }
    }
}
