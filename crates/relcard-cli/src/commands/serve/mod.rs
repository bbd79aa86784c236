//! HTTP endpoint serving generated cards.
//!
//! ## Protocol
//!
//! - `GET /api/generateImage?text=v1.2.3&width=1200&height=600&seed=42`
//!   returns the encoded image (`GET /` is an alias)
//! - Invalid parameters return `400` with a message such as `Invalid fontFamily`
//! - Generation failures return `500 Error generating image`; timeouts `503`
//!
//! Every response closes its connection. Fonts are loaded once at startup
//! and shared read-only between requests.

mod handler;
mod http;


use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use relcard_render::FontStack;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

use crate::config::ServerConfig;

pub use handler::{handle_request, AppState, GENERATE_PATH};
pub use http::{read_head, Request, Response};

/// Run the server until Ctrl+C.
///
/// # Returns
/// Exit code: 0 on clean shutdown
pub fn run(config: ServerConfig) -> Result<ExitCode> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    rt.block_on(async move { run_server(config).await })
}

async fn run_server(config: ServerConfig) -> Result<ExitCode> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let fonts = FontStack::preloaded(&config.fonts_dir);
    let state = Arc::new(AppState::new(fonts, &config));

    eprintln!(
        "{} http://{}{}",
        "Listening on".green().bold(),
        addr,
        GENERATE_PATH
    );
    eprintln!("Press Ctrl+C to shutdown");

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            eprintln!("\nShutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    serve(listener, state, shutdown_rx).await;
    eprintln!("Server shutdown complete");
    Ok(ExitCode::SUCCESS)
}

/// Accept connections until `shutdown` fires, one task per connection.
pub async fn serve(listener: TcpListener, state: Arc<AppState>, mut shutdown: broadcast::Receiver<()>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        log::debug!("connection from {}", peer_addr);
                        tokio::spawn(handle_connection(stream, Arc::clone(&state)));
                    }
                    Err(e) => {
                        log::warn!("accept error: {}", e);
                    }
                }
            }
            _ = shutdown.recv() => break,
        }
    }
}

async fn handle_connection(mut stream: TcpStream, state: Arc<AppState>) {
    let response = match read_head(&mut stream).await {
        Ok(Some(head)) => match Request::parse(&head) {
            Some(request) => {
                log::info!("{} {}", request.method, request.path);
                handle_request(&request, &state).await
            }
            None => Response::text(400, "Bad request"),
        },
        Ok(None) => return,
        Err(e) => {
            log::debug!("read error: {}", e);
            return;
        }
    };

    if let Err(e) = stream.write_all(&response.to_bytes()).await {
        log::debug!("write error: {}", e);
        return;
    }
    let _ = stream.shutdown().await;
}
