//! End-to-end tests over real TCP sockets.

use fileserve::config::Config;
use fileserve::server::listener::serve;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn start_server(root: &std::path::Path) -> SocketAddr {
    let mut cfg = Config::default();
    cfg.storage.root = root.to_path_buf();
    cfg.server.max_connections = 4;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = serve(listener, &cfg).await;
    });

    addr
}

/// Send one raw request and return (status code, body).
async fn request(addr: SocketAddr, raw: &[u8]) -> (u16, Vec<u8>) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    let head_end = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has a head");
    let head = String::from_utf8_lossy(&response[..head_end]).to_string();
    let body = response[head_end + 4..].to_vec();

    let status = head
        .split(' ')
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("status line has a code");

    let content_length: usize = head
        .lines()
        .find_map(|l| l.strip_prefix("Content-Length: "))
        .and_then(|v| v.parse().ok())
        .expect("Content-Length header");
    assert_eq!(content_length, body.len());

    (status, body)
}

fn put(path: &str, body: &str) -> Vec<u8> {
    format!(
        "PUT {} HTTP/1.1\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n{}",
        path,
        body.len(),
        body
    )
    .into_bytes()
}

#[tokio::test]
async fn test_crud_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(dir.path()).await;

    assert_eq!(request(addr, &put("/cycle.txt", "abc")).await.0, 200);

    let post = b"POST /cycle.txt HTTP/1.1\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\ndef";
    assert_eq!(request(addr, post).await.0, 200);

    let (status, body) = request(addr, b"GET /cycle.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(status, 200);
    assert_eq!(body, b"abcdef");

    let (status, body) = request(addr, b"DELETE /cycle.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(status, 200);
    assert_eq!(body, b"Successfully deleted");

    assert_eq!(request(addr, b"GET /cycle.txt HTTP/1.1\r\n\r\n").await.0, 404);
    assert_eq!(request(addr, b"DELETE /cycle.txt HTTP/1.1\r\n\r\n").await.0, 404);
}

#[tokio::test]
async fn test_error_statuses() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(dir.path()).await;

    assert_eq!(request(addr, b"PATCH /a.txt HTTP/1.1\r\n\r\n").await.0, 405);

    let octet = b"PUT /a.txt HTTP/1.1\r\nContent-Type: application/octet-stream\r\nContent-Length: 1\r\n\r\nx";
    assert_eq!(request(addr, octet).await.0, 400);
    assert!(!dir.path().join("a.txt").exists());

    assert_eq!(request(addr, &put("/../escape.txt", "x")).await.0, 400);

    let missing = b"POST /none.txt HTTP/1.1\r\nContent-Type: text/plain\r\nContent-Length: 1\r\n\r\nx";
    assert_eq!(request(addr, missing).await.0, 500);
}

#[tokio::test]
async fn test_many_concurrent_clients() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(dir.path()).await;

    // More clients than permits: the rest queue up and still get served
    let mut tasks = Vec::new();
    for i in 0..16 {
        tasks.push(tokio::spawn(async move {
            let body = format!("client-{i}-").repeat(100);
            let path = format!("/client-{i}.txt");
            let (status, _) = request(addr, &put(&path, &body)).await;
            assert_eq!(status, 200);

            let (status, got) = request(addr, format!("GET {path} HTTP/1.1\r\n\r\n").as_bytes()).await;
            assert_eq!(status, 200);
            assert_eq!(got, body.into_bytes());
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }
}
