//! In-process mock of the admin REST backend
//!
//! Binds an axum server to `127.0.0.1:0`, keeps collections in memory and
//! records every request it receives (method, path, query, headers, body).
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod mock_backend;
//! use mock_backend::*;
//! ```

#![allow(dead_code)]

use admin_client::prelude::*;
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const VALID_TOKEN: &str = "tok-123";
pub const PASSWORD: &str = "secret";

// ---------------------------------------------------------------------------
// Recorded requests
// ---------------------------------------------------------------------------

/// One request as the backend saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path without the `/api` prefix
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn is_multipart(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("multipart/form-data; boundary="))
    }
}

// ---------------------------------------------------------------------------
// Backend state
// ---------------------------------------------------------------------------

#[derive(Default)]
struct BackendState {
    collections: HashMap<String, Vec<Value>>,
    requests: Vec<RecordedRequest>,
    overrides: HashMap<String, (u16, Value)>,
    next_id: usize,
}

/// Handle on a running mock backend
#[derive(Clone)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
    pub base_url: String,
}

impl MockBackend {
    /// Start a backend on an ephemeral port
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(BackendState::default()));
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{}/api", addr),
        }
    }

    /// Client pointed at this backend with the given session and navigator
    pub fn client(&self, session: Session, navigator: RecordingNavigator) -> AdminClient {
        AdminClient::builder()
            .base_url(self.base_url.clone())
            .session(session)
            .navigator(navigator)
            .build()
            .unwrap()
    }

    /// Client with an authenticated in-memory session
    pub fn logged_in_client(&self) -> (AdminClient, Session, RecordingNavigator) {
        let session = Session::in_memory();
        session
            .store_login(VALID_TOKEN, &json!({"email": "root@academy.io"}))
            .unwrap();
        let navigator = RecordingNavigator::new();
        let client = self.client(session.clone(), navigator.clone());
        (client, session, navigator)
    }

    /// Seed a collection; records without `_id` get one
    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        let mut seeded = Vec::new();
        for mut record in records {
            if record.get("_id").is_none() {
                state.next_id += 1;
                record["_id"] = json!(format!("seed{}", state.next_id));
            }
            seeded.push(record);
        }
        state.collections.insert(collection.to_string(), seeded);
    }

    pub fn collection(&self, collection: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Answer every request to `path` with `status` and `body`
    pub fn respond_with(&self, path: &str, status: u16, body: Value) {
        self.state
            .lock()
            .unwrap()
            .overrides
            .insert(path.to_string(), (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }

    /// Requests with the given method and path
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

async fn handle(
    State(state): State<Arc<Mutex<BackendState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        content_type: header_value(header::CONTENT_TYPE),
        authorization: header_value(header::AUTHORIZATION),
        body: body.to_vec(),
    };

    let mut state = state.lock().unwrap();
    state.requests.push(recorded.clone());

    if let Some((status, body)) = state.overrides.get(&path).cloned() {
        return json_response(status, body);
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("POST", ["auth", "login"]) => login(&recorded),
        ("POST", ["auth", "logout"]) => json_response(200, json!({"success": true})),
        ("GET", ["auth", "me"]) => json_response(
            200,
            json!({"success": true, "user": {"email": "root@academy.io"}}),
        ),

        ("POST", ["admin", "upload", target]) => {
            state.next_id += 1;
            let filename = format!("{}-{}.png", target, state.next_id);
            json_response(
                200,
                json!({"success": true, "filename": filename, "message": "File uploaded"}),
            )
        }

        ("GET", ["coupons", "admin"]) => {
            let coupons = state.collections.get("coupons").cloned().unwrap_or_default();
            let total = coupons.len();
            json_response(
                200,
                json!({
                    "success": true,
                    "coupons": coupons,
                    "pagination": {"page": 1, "limit": 10, "total": total, "totalPages": 1}
                }),
            )
        }
        ("GET", ["coupons", "admin", "stats"]) => json_response(
            200,
            json!({"success": true, "stats": {"totalCoupons": state.collections.get("coupons").map_or(0, Vec::len)}}),
        ),
        (_, ["coupons", "admin", rest @ ..]) => crud(&mut state, "coupons", rest, &recorded),

        ("GET", ["payments", "admin", "transactions"]) => json_response(
            200,
            json!({
                "success": true,
                "transactions": [{"_id": "t1", "amount": 4999, "status": "completed"}],
                "pagination": {"page": 1, "limit": 20, "total": 1, "pages": 1},
                "stats": {"totalRevenue": 4999}
            }),
        ),
        ("GET", ["payments", "admin", "analytics"]) => json_response(
            200,
            json!({"success": true, "analytics": {"period": recorded.query.clone()}}),
        ),

        ("GET", ["customers", "export"]) | ("GET", ["inquiries", "export"]) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv")],
            "name,email\nAsha,asha@example.com\n",
        )
            .into_response(),
        ("GET", ["customers"]) => json_response(
            200,
            json!({
                "success": true,
                "data": [{"_id": "cu1", "name": "Asha"}],
                "pagination": {"page": 1, "limit": 20, "total": 1, "totalPages": 1},
                "stats": {"total": 1}
            }),
        ),
        ("PUT", ["inquiries", id, "status"]) => json_response(
            200,
            json!({"success": true, "data": {"_id": id, "status": recorded.json()["status"]}}),
        ),

        ("GET", ["icons", "search"]) => json_response(
            200,
            json!({"success": true, "data": [{"name": "FaRocket"}], "query": recorded.query.clone()}),
        ),

        (_, ["admin", resource, rest @ ..]) => {
            let resource = resource.to_string();
            crud(&mut state, &resource, rest, &recorded)
        }

        _ => json_response(404, json!({"success": false, "message": "Route not found"})),
    }
}

fn login(request: &RecordedRequest) -> Response {
    let body = request.json();
    if body["password"] == PASSWORD {
        json_response(
            200,
            json!({
                "success": true,
                "token": VALID_TOKEN,
                "user": {"email": body["email"], "role": "admin"}
            }),
        )
    } else {
        json_response(400, json!({"success": false, "message": "Invalid credentials"}))
    }
}

fn crud(state: &mut BackendState, collection: &str, rest: &[&str], request: &RecordedRequest) -> Response {
    match (request.method.as_str(), rest) {
        ("GET", []) => {
            let records = state.collections.get(collection).cloned().unwrap_or_default();
            json_response(200, json!({"success": true, "data": records}))
        }
        ("GET", [id]) => match find(state, collection, id) {
            Some(record) => json_response(200, json!({"success": true, "data": record})),
            None => not_found(),
        },
        ("POST", []) => {
            state.next_id += 1;
            let mut record = body_record(request);
            record["_id"] = json!(format!("{}{}", collection, state.next_id));
            state
                .collections
                .entry(collection.to_string())
                .or_default()
                .push(record.clone());
            json_response(201, json!({"success": true, "data": record}))
        }
        ("PUT", [id]) => {
            let mut record = body_record(request);
            record["_id"] = json!(id);
            let records = state.collections.entry(collection.to_string()).or_default();
            match records.iter_mut().find(|r| r["_id"] == *id) {
                Some(existing) => {
                    *existing = record.clone();
                    json_response(200, json!({"success": true, "data": record}))
                }
                None => not_found(),
            }
        }
        ("DELETE", [id]) => {
            let records = state.collections.entry(collection.to_string()).or_default();
            let before = records.len();
            records.retain(|r| r["_id"] != *id);
            if records.len() < before {
                json_response(200, json!({"success": true, "message": "Deleted"}))
            } else {
                not_found()
            }
        }
        _ => json_response(405, json!({"success": false, "message": "Method not allowed"})),
    }
}

/// JSON bodies are stored as sent; multipart bodies are flagged
fn body_record(request: &RecordedRequest) -> Value {
    if request.is_multipart() {
        json!({"multipart": true})
    } else {
        match request.json() {
            Value::Object(map) => Value::Object(map),
            _ => json!({}),
        }
    }
}

fn find(state: &BackendState, collection: &str, id: &str) -> Option<Value> {
    state
        .collections
        .get(collection)?
        .iter()
        .find(|r| r["_id"] == id)
        .cloned()
}

fn not_found() -> Response {
    json_response(404, json!({"success": false, "message": "Record not found"}))
}

fn json_response(status: u16, body: Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, axum::Json(body)).into_response()
}
