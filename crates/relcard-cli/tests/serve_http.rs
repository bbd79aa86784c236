//! HTTP endpoint over a real socket.
//!
//! ```bash
//! cargo test -p relcard-cli --test serve_http
//! ```

use std::sync::Arc;

use relcard_cli::commands::serve::{serve, AppState};
use relcard_cli::config::ServerConfig;
use relcard_render::FontStack;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

/// Send one request and return (status line, headers, body).
async fn fetch(addr: std::net::SocketAddr, request: &str) -> (String, String, Vec<u8>) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();

    let split = raw.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
    let head = String::from_utf8(raw[..split].to_vec()).unwrap();
    let body = raw[split + 4..].to_vec();
    let (status, headers) = head.split_once("\r\n").unwrap_or((head.as_str(), ""));
    (status.to_string(), headers.to_string(), body)
}

#[tokio::test]
async fn test_serves_release_card() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::new(FontStack::builtin_only(), &ServerConfig::default()));
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let server = tokio::spawn(serve(listener, state, shutdown_rx));

    let (status, headers, body) = fetch(
        addr,
        "GET /api/generateImage?text=v1.2.3&width=1200&height=600&fontFamily=readexpro\
         &fontWeight=bold&imageFormat=png&noiseLevel=medium&seed=42 HTTP/1.1\r\nHost: localhost\r\n\r\n",
    )
    .await;
    assert_eq!(status, "HTTP/1.1 200 OK");
    assert!(headers.contains("Content-Type: image/png"));
    assert!(headers.contains("Connection: close"));

    let decoder = png::Decoder::new(body.as_slice());
    let reader = decoder.read_info().unwrap();
    assert_eq!((reader.info().width, reader.info().height), (1200, 600));

    let (status, _, body) = fetch(
        addr,
        "GET /api/generateImage?fontFamily=foo HTTP/1.1\r\n\r\n",
    )
    .await;
    assert_eq!(status, "HTTP/1.1 400 Bad Request");
    assert_eq!(body, b"Invalid fontFamily");

    let (status, _, _) = fetch(addr, "nonsense\r\n\r\n").await;
    assert_eq!(status, "HTTP/1.1 400 Bad Request");

    shutdown_tx.send(()).unwrap();
    server.await.unwrap();
}
