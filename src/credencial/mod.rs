pub mod centers;
pub mod geo;
pub mod handlers;

use anyhow::Result;
use axum::{
    extract::Extension,
    response::Json,
    routing::{get, post},
    Router,
};
use centers::CenterDirectory;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;

use crate::qr::QrKeys;

pub mod built_info {
    #![allow(clippy::needless_raw_string_hashes)]
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "",
};

/// Process-wide immutable state shared by the handlers. The field catalogs
/// live as statics in [`crate::qr::catalog`]; this carries the key material
/// and the JRV center directory, both loaded once at startup.
#[derive(Debug)]
pub struct AppState {
    pub keys: QrKeys,
    pub centers: CenterDirectory,
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health::health, handlers::login::login),
    info(
        title = "credencial",
        description = "Election delegate credential validation and check-in"
    )
)]
struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/login", post(handlers::login))
        .route("/openapi.json", get(openapi_json))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn new(port: u16, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!(port, "credencial listening");

    let app = router(Arc::new(state));

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
