//! Request routing and the generate endpoint.

use std::sync::Arc;
use std::time::Duration;

use relcard_render::{EncodeConfig, FontStack, GeneratedImage, ImageGenerator};
use relcard_spec::{options_from_params, parse_query, ImageGeneratorOptions};
use tokio::sync::Semaphore;

use super::http::{Request, Response};
use crate::config::ServerConfig;

/// Path of the generate endpoint; `/` is an alias.
pub const GENERATE_PATH: &str = "/api/generateImage";

/// Shared, read-only state for every connection.
pub struct AppState {
    pub fonts: Arc<FontStack>,
    pub renders: Arc<Semaphore>,
    pub timeout: Option<Duration>,
    pub encode: EncodeConfig,
}

impl AppState {
    pub fn new(fonts: FontStack, config: &ServerConfig) -> Self {
        Self {
            fonts: Arc::new(fonts),
            renders: Arc::new(Semaphore::new(config.max_concurrent_renders)),
            timeout: config.request_timeout(),
            encode: EncodeConfig {
                jpeg_quality: config.jpeg_quality,
                ..EncodeConfig::default()
            },
        }
    }
}

/// Route one request to a response.
pub async fn handle_request(request: &Request, state: &AppState) -> Response {
    if request.path != GENERATE_PATH && request.path != "/" {
        return Response::text(404, "Not found");
    }
    if request.method != "GET" {
        return Response::text(405, "Method not allowed").with_header("Allow", "GET");
    }

    let pairs = parse_query(&request.query);
    let options = match options_from_params(&pairs) {
        Ok(options) => options,
        Err(e) => {
            log::info!("rejected request: {} ({:?})", e, e.value());
            return Response::text(400, e.to_string());
        }
    };

    match state.timeout {
        Some(limit) => match tokio::time::timeout(limit, generate(options, state)).await {
            Ok(response) => response,
            Err(_) => {
                log::warn!("render timed out after {:?}", limit);
                Response::text(503, "Timed out generating image")
            }
        },
        None => generate(options, state).await,
    }
}

/// Wait for a render slot, then run the pipeline on the blocking pool.
///
/// The slot moves into the blocking task and is released only when the
/// render returns, even if this future was dropped by a timeout first.
async fn generate(options: ImageGeneratorOptions, state: &AppState) -> Response {
    let Ok(permit) = Arc::clone(&state.renders).acquire_owned().await else {
        return Response::text(503, "Server shutting down");
    };

    let fonts = Arc::clone(&state.fonts);
    let encode = state.encode.clone();
    let joined = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        ImageGenerator::new(&options, &fonts)
            .with_encode_config(encode)
            .generate_image()
    })
    .await;

    match joined {
        Ok(Ok(image)) => image_response(image),
        Ok(Err(e)) => {
            log::error!("[{}] generation failed: {}", e.code(), e);
            Response::text(500, "Error generating image")
        }
        Err(e) => {
            log::error!("render task failed: {}", e);
            Response::text(500, "Error generating image")
        }
    }
}

fn image_response(image: GeneratedImage) -> Response {
    log::info!(
        "generated {} bytes ({}, seed {}, pattern {})",
        image.bytes.len(),
        image.format,
        image.seed,
        image.pattern
    );
    let etag = format!("\"{}\"", image.hash);
    Response::new(200, image.mime_type(), image.bytes)
        .with_header("Cache-Control", "public, max-age=0")
        .with_header("ETag", etag)
}
