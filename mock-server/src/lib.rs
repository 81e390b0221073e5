use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const DART_REPORT: &str = "dart_report";

pub type Records = Arc<RwLock<BTreeMap<i64, Value>>>;

/// Backend state shared by every handler.
#[derive(Clone, Default)]
pub struct MockState {
    records: Records,
    requests: Arc<RwLock<Vec<String>>>,
    failing: Arc<AtomicBool>,
}

impl MockState {
    pub fn with_records(records: impl IntoIterator<Item = (i64, Value)>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records.into_iter().collect())),
            ..Self::default()
        }
    }

    /// Sample dart reports for running the server by hand.
    pub fn seeded() -> Self {
        Self::with_records([
            (1, json!({"id": 1, "label": "weekly spend", "account": "checking"})),
            (2, json!({"id": 2, "label": "asset drift", "account": "investment"})),
            (3, json!({"id": 3, "label": "card balance", "account": "credit_card"})),
        ])
    }

    pub async fn insert(&self, id: i64, record: Value) {
        self.records.write().await.insert(id, record);
    }

    /// When set, every request is answered with 500.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Paths of all requests received so far, in arrival order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

pub fn app(state: MockState) -> Router {
    Router::new()
        .route("/entities/{key}", get(get_entity))
        .layer(middleware::from_fn_with_state(state.clone(), track))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn track(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    tracing::info!(method = %request.method(), %path, "request");
    state.requests.write().await.push(path);
    if state.failing.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    next.run(request).await
}

/// `dart_report` lists every record; `dart_report:<id>` selects one.
async fn get_entity(
    State(state): State<MockState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let (entity, id) = match key.split_once(':') {
        Some((entity, id)) => (entity, Some(id)),
        None => (key.as_str(), None),
    };
    if entity != DART_REPORT {
        return Err(StatusCode::NOT_FOUND);
    }

    let records = state.records.read().await;
    match id {
        None => Ok(Json(Value::Array(records.values().cloned().collect()))),
        Some(raw) => {
            let id: i64 = raw.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
            records.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
        }
    }
}
