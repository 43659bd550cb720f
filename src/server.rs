//! HTTP service exposing the inpaint operation on a single route.
//!
//! `POST /inpaint` takes a multipart body with `image` and `mask` parts and
//! answers with the inpainted result as a PNG attachment. Requests are
//! stateless; each one runs its own decode-inpaint-encode sequence on the
//! blocking thread pool. CORS is fully permissive so browser clients can
//! call the service from any origin.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::batch::encode_png;
use crate::error::Result;
use crate::inpaint::{inpaint, InpaintOptions};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default request body limit: two images plus multipart framing.
pub const DEFAULT_BODY_LIMIT: usize = 25 * 1024 * 1024;

/// Immutable per-server configuration, shared across requests.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Inpaint options applied to every request.
    pub options: InpaintOptions,
    /// Maximum accepted request body size in bytes.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            options: InpaintOptions::default(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Build the service router.
pub fn router(config: ServerConfig) -> Router {
    let body_limit = config.body_limit;
    Router::new()
        .route("/inpaint", post(handle_inpaint))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(config))
}

/// Bind `port` on all interfaces and serve until the process exits.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn serve(port: u16, config: ServerConfig) -> std::io::Result<()> {
    let app = router(config);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "listening");
    axum::serve(listener, app).await
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn handle_inpaint(
    State(config): State<Arc<ServerConfig>>,
    mut multipart: Multipart,
) -> Response {
    let mut image_bytes: Option<Vec<u8>> = None;
    let mut mask_bytes: Option<Vec<u8>> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(ToString::to_string);
        let Ok(bytes) = field.bytes().await else {
            return processing_failed();
        };
        match name.as_deref() {
            Some("image") => image_bytes = Some(bytes.to_vec()),
            Some("mask") => mask_bytes = Some(bytes.to_vec()),
            _ => {}
        }
    }

    let (Some(image_bytes), Some(mask_bytes)) = (image_bytes, mask_bytes) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing image or mask"})),
        )
            .into_response();
    };

    let options = config.options;
    let outcome =
        tokio::task::spawn_blocking(move || process(&image_bytes, &mask_bytes, &options)).await;

    match outcome {
        Ok(Ok(png)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "image/png"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"result.png\"",
                ),
            ],
            png,
        )
            .into_response(),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "inpaint request failed");
            processing_failed()
        }
        Err(e) => {
            tracing::error!(error = %e, "inpaint task aborted");
            processing_failed()
        }
    }
}

/// Opaque 500 response; the cause goes to the log, never to the client.
fn processing_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Processing failed"})),
    )
        .into_response()
}

/// Decode both parts, inpaint, and encode the result as PNG.
fn process(image_bytes: &[u8], mask_bytes: &[u8], options: &InpaintOptions) -> Result<Vec<u8>> {
    let image = image::load_from_memory(image_bytes)?.to_rgb8();
    let mask = image::load_from_memory(mask_bytes)?.to_luma8();
    let result = inpaint(&image, &mask, options)?;
    encode_png(&result)
}
