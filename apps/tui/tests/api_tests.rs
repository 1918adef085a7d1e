use airviewer_tui::api::models::NewRecord;
use airviewer_tui::api::{ApiClient, ApiError};
use std::time::Duration;

fn client_for(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(server.url(), Duration::from_secs(2)).expect("client")
}

#[tokio::test]
async fn current_snapshot_parses() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/data/current")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"aqi": 87.6, "pm25": 24.1, "pm10": 41.0, "no2": 18.3, "co": 0.7}"#)
        .create_async()
        .await;

    let snapshot = client_for(&server).current().await.expect("snapshot");
    assert!((snapshot.aqi - 87.6).abs() < f64::EPSILON);
    assert!((snapshot.pm25 - 24.1).abs() < f64::EPSILON);
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/data/current")
        .with_status(503)
        .create_async()
        .await;

    let error = client_for(&server).current().await.expect_err("error");
    match error {
        ApiError::Status(code) => assert_eq!(code, 503),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_shape() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/data/current")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"aqi": "not a number"}"#)
        .create_async()
        .await;

    let error = client_for(&server).current().await.expect_err("error");
    assert!(matches!(error, ApiError::Shape(_)));
}

#[tokio::test]
async fn connection_failure_maps_to_transport() {
    // Port 9 is discard; nothing listens there.
    let client = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(300)).expect("client");
    let error = client.current().await.expect_err("error");
    assert!(matches!(error, ApiError::Transport(_)));
}

#[tokio::test]
async fn metrics_accept_the_alternate_r_squared_field() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/model/metrics")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"rmse": 4.2, "r_squared": 0.91, "model_name": "rf", "last_trained": "2026-08-20"}"#)
        .create_async()
        .await;

    let metrics = client_for(&server).model_metrics().await.expect("metrics");
    assert_eq!(metrics.r2, Some(0.91));
    assert_eq!(metrics.model_name.as_deref(), Some("rf"));
}

#[tokio::test]
async fn sources_normalize_from_parallel_arrays() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/prediction/sources")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"labels": ["Traffic", "Industry", "Dust"], "contributions": [52.0, 30.0, 18.0]}"#)
        .create_async()
        .await;

    let sources = client_for(&server)
        .prediction_sources()
        .await
        .expect("sources");
    assert_eq!(sources.len(), 3);
    assert_eq!(sources[0].name, "Traffic");
    assert!((sources[2].contribution - 18.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn sources_normalize_from_object_list() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/prediction/sources")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"sources": [{"label": "Traffic", "pct": 64.0}]}"#)
        .create_async()
        .await;

    let sources = client_for(&server)
        .prediction_sources()
        .await
        .expect("sources");
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name, "Traffic");
}

#[tokio::test]
async fn history_sends_the_date_range_as_query_params() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/history")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("start_date".into(), "2026-08-01".into()),
            mockito::Matcher::UrlEncoded("end_date".into(), "2026-08-07".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"timestamp": "2026-08-01 10:00", "aqi": 72.0, "pm25": 21.0, "pm10": 38.0, "no2": 15.0, "co": 0.5}]"#,
        )
        .create_async()
        .await;

    let rows = client_for(&server)
        .history("2026-08-01", "2026-08-07")
        .await
        .expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].timestamp, "2026-08-01 10:00");
    mock.assert_async().await;
}

#[tokio::test]
async fn add_record_posts_json_and_accepts_any_ok() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/history/record")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "timestamp": "2026-08-24 10:00",
            "pm25": 24.5,
            "pm10": 40.0
        })))
        .with_status(201)
        .create_async()
        .await;

    let record = NewRecord {
        timestamp: "2026-08-24 10:00".to_string(),
        pm25: 24.5,
        pm10: 40.0,
    };
    client_for(&server).add_record(&record).await.expect("ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn delete_last_record_uses_delete() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/history/record/last")
        .with_status(200)
        .create_async()
        .await;

    client_for(&server).delete_last_record().await.expect("ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn csv_download_returns_the_body_verbatim() {
    let csv = "timestamp,pm25,pm10\n2026-08-01 10:00,21.0,38.0\n";
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/history/download")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/csv")
        .with_body(csv)
        .create_async()
        .await;

    let bytes = client_for(&server)
        .download_csv("2026-08-01", "2026-08-07")
        .await
        .expect("bytes");
    assert_eq!(bytes, csv.as_bytes());
}
