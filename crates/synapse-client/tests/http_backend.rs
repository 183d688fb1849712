use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use synapse_client::HttpBackend;
use synapse_core::error::Error;
use synapse_core::traits::Backend;
use synapse_core::types::SearchRequest;

/// Serve one request with `status` and `body`, reporting the request line.
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        let _ = tx.send(request.lines().next().unwrap_or_default().to_string());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    (format!("http://{addr}/"), rx)
}

fn backend(base: &str) -> HttpBackend {
    HttpBackend::new(base, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn search_keeps_server_order_and_fills_ids() {
    let body = r#"{"documents": {"zeta": {"title": "Zeta"}, "alpha": {"id": "a-1", "title": "Alpha", "tags": ["nlp"]}}}"#;
    let (base, request_line) = serve_once("200 OK", body).await;

    let request = SearchRequest { sort: false, node: Some("bert".to_string()), k: 40, query: "neural nets".to_string() };
    let docs = backend(&base).search(&request).await.expect("search");

    assert_eq!(request_line.await.unwrap(), "GET /search/false/bert/40/neural%20nets HTTP/1.1");
    assert_eq!(docs.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), vec!["zeta", "a-1"]);
    assert_eq!(docs[1].tags, vec!["nlp".to_string()]);
}

#[tokio::test]
async fn spelling_reads_suggestion() {
    let (base, _) = serve_once("200 OK", r#"{"suggestion": "neural"}"#).await;
    assert_eq!(backend(&base).spelling("nueral").await.unwrap(), "neural");
}

#[tokio::test]
async fn plot_returns_raw_payload() {
    let (base, request_line) = serve_once("200 OK", r#"{"nodes": [{"id": "a"}], "edges": []}"#).await;
    let raw = backend(&base).plot(40, "graph").await.unwrap();
    assert_eq!(request_line.await.unwrap(), "GET /plot/40/graph HTTP/1.1");
    assert_eq!(raw["nodes"][0]["id"], "a");
}

#[tokio::test]
async fn error_status_and_bad_json_are_reported() {
    let (base, _) = serve_once("500 Internal Server Error", "{}").await;
    let err = backend(&base).spelling("x").await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 500, .. }), "{err}");

    let (base, _) = serve_once("200 OK", "not json").await;
    let err = backend(&base).plot(40, "x").await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "{err}");
}
