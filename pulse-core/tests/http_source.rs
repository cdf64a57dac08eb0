//! HttpSource against a throwaway local responder.

use std::time::Duration;

use pulse_core::{FetchError, HttpSource, Poller, TelemetrySource};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const BODY: &str = r#"{
    "cpu": { "currentLoad": 33.3, "userLoad": 20.0, "systemLoad": 13.0, "irqLoad": 0.3 },
    "cpuCores": [30.0, 36.6],
    "memory": { "totalMB": 4096, "usedMB": 1024, "freeMB": 3072, "usagePercent": 25.0 },
    "uptimeSeconds": 90061,
    "systemMetrics": {
        "disk": [],
        "processes": { "total": 212, "running": 1, "blocked": 0, "topProcesses": [] }
    },
    "functionalMetrics": { "networkInterfaces": [], "trafficAnalysis": [], "latencyMs": 7 }
}"#;

/// Serve `responses` in order, one per connection, then stop accepting.
async fn serve(responses: Vec<(&'static str, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let resp = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(resp.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        }
    });
    format!("http://{addr}/healthcheck")
}

fn source(url: String) -> HttpSource {
    HttpSource::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn decodes_healthy_response() {
    let url = serve(vec![("200 OK", BODY.to_string())]).await;
    let snap = source(url).fetch().await.unwrap();
    assert_eq!(snap.cpu_percent(), 33.3);
    assert_eq!(snap.process_count(), 212);
    assert_eq!(snap.latency_ms(), 7.0);
    assert!(snap.primary_disk().is_none());
}

#[tokio::test]
async fn non_2xx_is_a_status_error() {
    let url = serve(vec![("503 Service Unavailable", "{}".to_string())]).await;
    let err = source(url).fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Status(503)), "got {err:?}");
}

#[tokio::test]
async fn wrong_shape_is_a_decode_error() {
    let url = serve(vec![("200 OK", r#"{"cpu": 12}"#.to_string())]).await;
    let err = source(url).fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = source(format!("http://{addr}/healthcheck"))
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn poller_falls_back_then_goes_live() {
    let url = serve(vec![
        ("500 Internal Server Error", "oops".to_string()),
        ("200 OK", BODY.to_string()),
    ])
    .await;
    let mut poller = Poller::new(source(url));
    // the third tick at 2s would hit a closed listener
    poller.start(Duration::from_secs(1), 30).unwrap();

    let mut waited = Duration::ZERO;
    while poller.metrics().successes == 0 && waited < Duration::from_millis(1_800) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        waited += Duration::from_millis(50);
    }
    poller.stop();

    let m = poller.metrics();
    assert_eq!(m.failures, 1);
    assert_eq!(m.successes, 1);
    assert_eq!(m.snapshot.cpu_percent(), 33.3);
    let cpu = m.cpu.values();
    assert_eq!(cpu[3], pulse_core::fixtures::FALLBACK_CPU);
    assert_eq!(cpu[4], 33.3);
}
