#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{
        HeaderMap, HeaderName, Method, StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const UPDATE_KEYS: [&str; 7] = [
    "settings", "cmd", "add_cmd", "update_cmd", "delete_cmd", "game", "add_game",
];

#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub cookie: Option<String>,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn json_body(&self) -> Value {
        serde_json::from_slice(&self.body).expect("captured body is json")
    }
}

#[derive(Clone)]
struct StubState {
    update_status: StatusCode,
    array_records: bool,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl StubState {
    async fn record(&self, method: Method, path: &str, headers: &HeaderMap, body: Bytes) {
        let header = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().await.push(Captured {
            method,
            path: path.to_string(),
            content_type: header(CONTENT_TYPE),
            cookie: header(COOKIE),
            body: body.to_vec(),
        });
    }
}

/// In-process stand-in for the dashboard backend.
pub struct StubServer {
    pub base_url: String,
    state: StubState,
    handle: JoinHandle<()>,
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl StubServer {
    pub async fn spawn() -> Self {
        Self::spawn_with_update_status(StatusCode::OK).await
    }

    pub async fn spawn_with_update_status(update_status: StatusCode) -> Self {
        Self::start(StubState {
            update_status,
            array_records: false,
            requests: Arc::default(),
        })
        .await
    }

    /// Answers the command endpoints with arrays where objects belong.
    pub async fn spawn_with_array_records() -> Self {
        Self::start(StubState {
            update_status: StatusCode::OK,
            array_records: true,
            requests: Arc::default(),
        })
        .await
    }

    async fn start(state: StubState) -> Self {

        let app = Router::new()
            .route("/api/chatters_stats", get(chatters_stats))
            .route("/api/users_stats", get(users_stats))
            .route("/api/events_stats/:id", get(events_stats))
            .route("/api/rpg/events/:id", get(rpg_events))
            .route("/api/rpg", post(rpg_event))
            .route("/api/events/:kind/:id", get(events_by_type))
            .route("/api/commands", get(commands))
            .route("/api/command", post(command))
            .route("/api/update", post(update))
            .route("/api/login", get(login))
            .route("/api/echo", get(echo).post(echo))
            .route("/api/not_json", get(not_json))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    pub async fn requests(&self) -> Vec<Captured> {
        self.state.requests.lock().await.clone()
    }

    pub async fn last_request(&self) -> Captured {
        self.requests().await.pop().expect("no request reached the stub")
    }
}

async fn chatters_stats() -> Json<Value> {
    Json(json!({"alice": 40, "bob": 35, "carol": 25}))
}

// The real backend answers these with a JSON string holding the document.
async fn users_stats() -> Json<Value> {
    Json(Value::String(
        r#"{"followers": 12, "subscribers": 5, "bots": 2, "no roles": 1}"#.to_string(),
    ))
}

async fn events_stats(Path(id): Path<String>) -> Json<Value> {
    if id == "0" {
        return Json(Value::String("{}".to_string()));
    }
    Json(Value::String(r#"{"Win": 3, "Tie": 1, "Loss": 2}"#.to_string()))
}

async fn rpg_events(Path(id): Path<String>) -> Json<Value> {
    Json(Value::String(format!(
        r#"[{{"type": "boss", "rpg": "{id}"}}, {{"type": "trap", "rpg": "{id}"}}]"#
    )))
}

async fn rpg_event(Json(request): Json<Value>) -> Json<Value> {
    Json(json!({"id": request["rpg"], "type": "boss", "message": "A dragon appears"}))
}

async fn events_by_type(Path((kind, _id)): Path<(String, String)>) -> Json<Value> {
    if kind == "type" {
        return Json(Value::String(r#"{"boss": 4, "trap": 1}"#.to_string()));
    }
    Json(Value::String("{}".to_string()))
}

async fn commands(State(stub): State<StubState>) -> Json<Value> {
    if stub.array_records {
        return Json(json!([["ping", "x"]]));
    }
    Json(json!([{"name": "ping", "email": "x"}]))
}

async fn command(
    State(stub): State<StubState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    stub.record(method, "/api/command", &headers, body.clone()).await;
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    if stub.array_records {
        return Json(json!([request["command"], "fun", 5, "pong"]));
    }
    Json(json!({
        "name": request["command"],
        "description": "pong",
        "usage": "!ping",
        "used": 3,
        "cost": 5,
        "status": true,
        "aliases": [],
        "category": "fun"
    }))
}

async fn update(
    State(stub): State<StubState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    stub.record(method, "/api/update", &headers, body.clone()).await;
    if stub.update_status != StatusCode::OK {
        return (stub.update_status, Json(json!({"detail": "boom"})));
    }

    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let known = request
        .as_object()
        .and_then(|map| map.keys().next())
        .is_some_and(|key| UPDATE_KEYS.contains(&key.as_str()));
    if known {
        (StatusCode::OK, Json(json!({"success": "Updated"})))
    } else {
        (StatusCode::OK, Json(json!({"error": "Invalid key"})))
    }
}

async fn login() -> impl IntoResponse {
    (
        [(SET_COOKIE, "session=abc123; Path=/")],
        Json(json!({"logged_in": true})),
    )
}

async fn echo(
    State(stub): State<StubState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    stub.record(method, "/api/echo", &headers, body.clone()).await;
    if body.is_empty() {
        return Json(json!({"echo": null}));
    }
    let parsed: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    Json(json!({"echo": parsed}))
}

async fn not_json() -> impl IntoResponse {
    (StatusCode::OK, "<html>not json</html>")
}
