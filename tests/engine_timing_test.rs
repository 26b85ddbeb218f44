use postboy::repl::models::{DownloadProgress, HttpMethod};
use postboy::repl::services::{EngineRequest, HttpEngine, HyperEngine, ProgressSink};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve one connection: read the request head, then write `parts` with a
/// pause between each so the client sees them as separate reads
async fn serve_once(parts: Vec<&'static str>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("read");
            if n == 0 {
                return;
            }
            head.extend_from_slice(&buf[..n]);
        }
        for part in parts {
            socket.write_all(part.as_bytes()).await.expect("write");
            socket.flush().await.expect("flush");
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    });

    format!("http://{addr}/data")
}

fn recording_sink() -> (ProgressSink, Arc<Mutex<Vec<DownloadProgress>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let sink: ProgressSink = Arc::new(move |progress| log.lock().unwrap().push(progress));
    (sink, seen)
}

fn get(url: String) -> EngineRequest {
    EngineRequest {
        method: HttpMethod::Get,
        url,
        headers: Vec::new(),
        body: None,
    }
}

#[tokio::test]
async fn chunked_body_should_report_progress_and_measured_length() {
    let url = serve_once(vec![
        "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nContent-Type: text/plain\r\n\r\n",
        "5\r\nhello\r\n",
        "6\r\n world\r\n0\r\n\r\n",
    ])
    .await;
    let (sink, seen) = recording_sink();

    let response = HyperEngine::new()
        .unwrap()
        .execute(get(url), Some(sink))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "hello world");

    let metrics = response.metrics;
    assert_eq!(metrics.content_length, 11);
    assert_eq!(metrics.tls_handshake, Duration::ZERO);
    assert!(metrics.total >= metrics.ttfb);
    assert!(metrics.total >= metrics.content_download);

    let progress = seen.lock().unwrap().clone();
    assert!(progress.len() >= 2, "expected one update per chunk: {progress:?}");
    assert!(progress.windows(2).all(|w| w[0].received < w[1].received));
    let last = progress.last().unwrap();
    assert_eq!((last.received, last.total), (11, 0));
}

#[tokio::test]
async fn content_length_header_should_set_progress_total() {
    let url = serve_once(vec![
        "HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\r\n",
        "{\"a\":404}",
    ])
    .await;
    let (sink, seen) = recording_sink();

    let response = HyperEngine::new()
        .unwrap()
        .execute(get(url), Some(sink))
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.status_text, "Not Found");
    assert_eq!(response.metrics.content_length, 9);
    assert_eq!(response.metrics.tls_handshake, Duration::ZERO);

    let progress = seen.lock().unwrap().clone();
    let last = progress.last().unwrap();
    assert_eq!((last.received, last.total), (9, 9));
}
