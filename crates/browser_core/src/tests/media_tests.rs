use super::*;
use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

async fn spawn_video_host() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/embed/ok", get(|| async { "<html>player</html>" }))
        .route("/embed/gone", get(|| async { StatusCode::NOT_FOUND }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[test]
fn rejects_non_http_references() {
    assert!(matches!(
        parse_video_url("ftp://example.com/clip.mp4"),
        Err(MediaError::UnsupportedScheme(scheme)) if scheme == "ftp"
    ));
    assert!(matches!(
        parse_video_url("not a url"),
        Err(MediaError::InvalidUrl { .. })
    ));
    assert!(parse_video_url("https://www.youtube.com/embed/dQw4w9WgXcQ").is_ok());
}

#[tokio::test]
async fn reachable_reference_probes_ok() {
    let base = spawn_video_host().await.expect("server");
    let probe = MediaProbe::new(Duration::from_secs(5)).expect("probe");
    probe
        .probe(&format!("{base}/embed/ok"))
        .await
        .expect("reachable video");
}

#[tokio::test]
async fn missing_reference_reports_status() {
    let base = spawn_video_host().await.expect("server");
    let probe = MediaProbe::new(Duration::from_secs(5)).expect("probe");
    let err = probe
        .probe(&format!("{base}/embed/gone"))
        .await
        .expect_err("404 should fail");
    assert!(matches!(err, MediaError::Status(status) if status == StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let probe = MediaProbe::new(Duration::from_secs(2)).expect("probe");
    let err = probe
        .probe(&format!("http://{addr}/embed/ok"))
        .await
        .expect_err("nothing listening");
    assert!(matches!(err, MediaError::Transport(_)));
}
