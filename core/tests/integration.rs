//! End-to-end fetches against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises the client two
//! ways: the synchronous build/parse pair driven by ureq, and the async
//! `DartService` over its default reqwest transport.

use std::future::IntoFuture;
use std::time::{Duration, Instant};

use dart_core::{
    ApiError, ClientConfig, DartClient, DartService, HttpMethod, HttpResponse, ReqwestTransport,
    Transport,
};
use mock_server::MockState;
use serde_json::json;
use tokio::io::AsyncReadExt;
use tokio::sync::oneshot;

fn sample_state() -> MockState {
    MockState::with_records([
        (1, json!({"id": 1, "label": "x"})),
        (2, json!({"id": 2})),
    ])
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data and interpreted by the client.
fn execute(req: dart_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match req.method {
        HttpMethod::Get => agent.get(&req.path).call(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Serve `state` from a background thread with its own runtime.
fn spawn_blocking_server(state: MockState) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, state).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Accept one connection, read whatever arrives and never answer.
/// Resolves the returned receiver once the client closes the connection.
async fn spawn_silent_server() -> (String, oneshot::Receiver<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (closed_tx, closed_rx) = oneshot::channel();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
        }
        let _ = closed_tx.send(());
    });
    (format!("http://{addr}"), closed_rx)
}

/// Serve `state` on the current runtime.
async fn spawn_server(state: MockState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener, state));
    format!("http://{addr}")
}

fn service(base_url: &str) -> DartService {
    DartService::new(DartClient::new(base_url), ReqwestTransport::default())
}

#[test]
fn host_driven_round_trip() {
    let client = DartClient::new(&spawn_blocking_server(sample_state()));

    let record = client.parse_get_record(execute(client.build_get_record(1))).unwrap();
    assert_eq!(record, json!({"id": 1, "label": "x"}));

    let records = client.parse_list_records(execute(client.build_list_records())).unwrap();
    assert_eq!(records, vec![json!({"id": 1, "label": "x"}), json!({"id": 2})]);

    let err = client.parse_get_record(execute(client.build_get_record(99))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[tokio::test]
async fn get_record_emits_backend_value() {
    let state = sample_state();
    let svc = service(&spawn_server(state.clone()).await);

    let record = svc.get_record(1).await.unwrap();
    assert_eq!(record, json!({"id": 1, "label": "x"}));
    assert_eq!(state.requests().await, vec!["/entities/dart_report:1"]);
}

#[tokio::test]
async fn get_records_emits_backend_array() {
    let state = sample_state();
    let svc = service(&spawn_server(state.clone()).await);

    let records = svc.get_records().await.unwrap();
    assert_eq!(records, vec![json!({"id": 1, "label": "x"}), json!({"id": 2})]);
    assert_eq!(state.requests().await, vec!["/entities/dart_report"]);
}

#[tokio::test]
async fn id_is_rendered_in_decimal() {
    let state = MockState::with_records([(42, json!({"id": 42}))]);
    let svc = service(&spawn_server(state.clone()).await);

    svc.get_record(42).await.unwrap();
    assert_eq!(state.requests().await, vec!["/entities/dart_report:42"]);
}

#[tokio::test]
async fn server_error_fails_both_operations() {
    let state = sample_state();
    state.set_failing(true);
    let svc = service(&spawn_server(state).await);

    let err = svc.get_record(1).await.unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 500, .. }));

    let err = svc.get_records().await.unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
}

#[tokio::test]
async fn resending_issues_a_second_request() {
    let state = sample_state();
    let svc = service(&spawn_server(state.clone()).await);

    let fetch = svc.get_record(2);
    assert!(state.requests().await.is_empty());

    let first = fetch.send().await.unwrap();
    let second = fetch.send().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(
        state.requests().await,
        vec!["/entities/dart_report:2", "/entities/dart_report:2"]
    );
}

#[tokio::test]
async fn backend_changes_are_visible_on_resend() {
    let state = sample_state();
    let svc = service(&spawn_server(state.clone()).await);

    let fetch = svc.get_records();
    assert_eq!(fetch.send().await.unwrap().len(), 2);

    state.insert(3, json!({"id": 3})).await;
    assert_eq!(fetch.send().await.unwrap().len(), 3);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let svc = service(&format!("http://{addr}"));

    let err = svc.get_records().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn service_from_config() {
    let state = sample_state();
    let config = ClientConfig {
        timeout_secs: Some(5),
        ..ClientConfig::new(&spawn_server(state).await)
    };
    let svc = DartService::from_config(&config).unwrap();

    let record = svc.get_record(1).await.unwrap();
    assert_eq!(record["label"], "x");
}

#[tokio::test]
async fn response_headers_are_collected() {
    let base_url = spawn_server(sample_state()).await;
    let request = DartClient::new(&base_url).build_get_record(1);

    let response = ReqwestTransport::default().execute(request).await.unwrap();
    assert_eq!(response.status, 200);
    assert!(response
        .headers
        .iter()
        .any(|(name, value)| name == "content-type" && value == "application/json"));
}

#[tokio::test]
async fn dropping_an_in_flight_fetch_closes_the_connection() {
    let (base_url, closed) = spawn_silent_server().await;
    let svc = service(&base_url);

    let outcome = tokio::time::timeout(
        Duration::from_millis(200),
        svc.get_record(5).into_future(),
    )
    .await;
    assert!(outcome.is_err(), "silent backend must not produce a result");

    tokio::time::timeout(Duration::from_secs(5), closed)
        .await
        .expect("connection still open after the fetch was dropped")
        .unwrap();
}

#[tokio::test]
async fn configured_timeout_fails_the_fetch() {
    let (base_url, _closed) = spawn_silent_server().await;
    let config = ClientConfig {
        timeout_secs: Some(1),
        ..ClientConfig::new(&base_url)
    };
    let svc = DartService::from_config(&config).unwrap();

    let started = Instant::now();
    let err = svc.get_records().await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    assert!(elapsed >= Duration::from_millis(900), "returned after {elapsed:?}");
    assert!(elapsed < Duration::from_secs(5), "returned after {elapsed:?}");
}
