//! End-to-end tests for [`AssetFetcher`] against a one-shot local HTTP
//! server, covering the success path and every failure classification.

use std::time::Duration;

use assert_matches::assert_matches;
use codevault_fetcher::{AssetFetcher, FetchError, Fetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve exactly one canned HTTP/1.1 response, returning the base URL.
async fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;

        let header = format!(
            "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        socket.write_all(header.as_bytes()).await.unwrap();
        socket.write_all(body).await.unwrap();
    });

    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Success path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_saves_body_under_suggested_name() {
    let base = serve_once("HTTP/1.1 200 OK", b"source code bytes").await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = AssetFetcher::new(dir.path());

    let saved = fetcher
        .fetch_and_save(&format!("{base}/assets/sorting.zip"), "sorting-algorithms.zip")
        .await
        .unwrap();

    assert_eq!(saved.path, dir.path().join("sorting-algorithms.zip"));
    assert_eq!(saved.bytes_written, 17);
    assert_eq!(std::fs::read(&saved.path).unwrap(), b"source code bytes");
}

// ---------------------------------------------------------------------------
// Failure classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_success_status_classifies_as_not_found() {
    let base = serve_once("HTTP/1.1 404 Not Found", b"missing").await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = AssetFetcher::new(dir.path());

    let err = fetcher
        .fetch_and_save(&format!("{base}/assets/gone.zip"), "gone.zip")
        .await
        .unwrap_err();

    assert_matches!(err, FetchError::NotFound { status: 404 });
}

#[tokio::test]
async fn server_error_status_classifies_as_not_found() {
    let base = serve_once("HTTP/1.1 500 Internal Server Error", b"boom").await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = AssetFetcher::new(dir.path());

    let err = fetcher
        .fetch_and_save(&format!("{base}/assets/a.zip"), "a.zip")
        .await
        .unwrap_err();

    assert_matches!(err, FetchError::NotFound { status: 500 });
}

#[tokio::test]
async fn connection_refused_classifies_as_network_error() {
    // Bind then drop to get a port nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let fetcher = AssetFetcher::new(dir.path());

    let err = fetcher
        .fetch_and_save(&format!("http://{addr}/asset.zip"), "asset.zip")
        .await
        .unwrap_err();

    assert_matches!(err, FetchError::Network(_));
}

#[tokio::test]
async fn stalled_server_times_out_as_network_error() {
    // Accept the connection but never respond.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        drop(socket);
    });

    let dir = tempfile::tempdir().unwrap();
    let fetcher = AssetFetcher::new(dir.path()).with_timeout(Duration::from_millis(200));

    let err = fetcher
        .fetch_and_save(&format!("http://{addr}/slow.zip"), "slow.zip")
        .await
        .unwrap_err();

    assert_matches!(err, FetchError::Network(_));
}

#[tokio::test]
async fn failed_fetch_leaves_download_dir_untouched() {
    let base = serve_once("HTTP/1.1 403 Forbidden", b"denied").await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = AssetFetcher::new(dir.path());

    let _ = fetcher
        .fetch_and_save(&format!("{base}/a.zip"), "a.zip")
        .await
        .unwrap_err();

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
