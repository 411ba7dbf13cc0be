// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process vault backend for tests.
//!
//! Serves the REST endpoints from an in-memory record list, records every
//! request, and lets a test pin a canned response to a method and path.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use url::Url;

use crate::api::{VaultApi, CSRF_HEADER, USER_ID_HEADER};
use crate::models::{CredentialRecord, GroupId, RecordDraft};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub user_id: Option<String>,
    pub csrf_token: Option<String>,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: String,
    delay: Option<Duration>,
}

impl ScriptedResponse {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/html"),
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
            delay: None,
        }
    }

    /// Hold the response back for `delay` before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl IntoResponse for ScriptedResponse {
    fn into_response(self) -> Response {
        match self.content_type {
            Some(ct) => (self.status, [(header::CONTENT_TYPE, ct)], self.body).into_response(),
            None => (self.status, self.body).into_response(),
        }
    }
}

#[derive(Default)]
struct BackendState {
    records: Vec<CredentialRecord>,
    requests: Vec<RecordedRequest>,
    scripts: HashMap<(Method, String), ScriptedResponse>,
}

type Shared = Arc<Mutex<BackendState>>;

pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
}

impl MockBackend {
    pub const EMAIL: &'static str = "alice@example.com";
    pub const PASSWORD: &'static str = "Abc123!@";

    pub async fn start() -> Self {
        let state: Shared = Arc::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, state }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    pub fn api(&self) -> VaultApi {
        self.api_with_timeout(Duration::from_secs(5))
    }

    pub fn api_with_timeout(&self, timeout: Duration) -> VaultApi {
        VaultApi::new(self.base_url(), timeout).unwrap()
    }

    /// A client pointed at a port nothing listens on.
    pub async fn unreachable_api() -> VaultApi {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        VaultApi::new(Url::parse(&format!("http://{addr}")).unwrap(), Duration::from_secs(5)).unwrap()
    }

    pub fn seed(&self, records: Vec<CredentialRecord>) {
        self.state.lock().unwrap().records = records;
    }

    pub fn records(&self) -> Vec<CredentialRecord> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn script(&self, method: Method, path: &str, response: ScriptedResponse) {
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert((method, path.to_string()), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    /// Requests to `path` with `method`, in arrival order.
    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let response = respond(&state, method, uri.path(), &headers, &body);
    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }
    response.response
}

struct Reply {
    response: Response,
    delay: Option<Duration>,
}

impl From<Response> for Reply {
    fn from(response: Response) -> Self {
        Self {
            response,
            delay: None,
        }
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn respond(state: &Shared, method: Method, path: &str, headers: &HeaderMap, body: &[u8]) -> Reply {
    let mut state = state.lock().unwrap();
    let body_json: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    state.requests.push(RecordedRequest {
        method: method.clone(),
        path: path.to_string(),
        user_id: header_string(headers, USER_ID_HEADER),
        csrf_token: header_string(headers, CSRF_HEADER),
        body: body_json.clone(),
    });

    if let Some(scripted) = state.scripts.get(&(method.clone(), path.to_string())) {
        return Reply {
            delay: scripted.delay,
            response: scripted.clone().into_response(),
        };
    }

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    let response = match (method.as_str(), segments.as_slice()) {
        ("GET", ["getData"]) => {
            ScriptedResponse::json(StatusCode::OK, json!(state.records)).into_response()
        }
        ("POST", ["saveData"]) => match serde_json::from_value::<CredentialRecord>(body_json) {
            Ok(record) => {
                state.records.retain(|r| r.group_id != record.group_id);
                state.records.push(record);
                ScriptedResponse::json(StatusCode::OK, json!({"message": "Data saved"})).into_response()
            }
            Err(_) => ScriptedResponse::json(StatusCode::BAD_REQUEST, json!({"message": "Invalid record"}))
                .into_response(),
        },
        ("PUT", ["data", id]) => {
            let draft: RecordDraft = serde_json::from_value(body_json).unwrap_or_default();
            let id = GroupId(id.parse().unwrap_or_default());
            match state.records.iter_mut().find(|r| r.group_id == id) {
                Some(record) => {
                    record.username = draft.username;
                    record.domain = draft.domain;
                    if !draft.password.is_empty() {
                        record.password = draft.password;
                    }
                    ScriptedResponse::empty(StatusCode::OK).into_response()
                }
                None => ScriptedResponse::json(StatusCode::NOT_FOUND, json!({"message": "Record not found"}))
                    .into_response(),
            }
        }
        ("DELETE", ["data", id]) => {
            let id = GroupId(id.parse().unwrap_or_default());
            let before = state.records.len();
            state.records.retain(|r| r.group_id != id);
            if state.records.len() < before {
                ScriptedResponse::text(StatusCode::OK, "Deleted").into_response()
            } else {
                ScriptedResponse::text(StatusCode::NOT_FOUND, "Not Found").into_response()
            }
        }
        ("POST", ["login"]) => {
            if body_json["email"] == MockBackend::EMAIL && body_json["password"] == MockBackend::PASSWORD {
                ScriptedResponse::json(
                    StatusCode::OK,
                    json!({"user": {"userId": 7, "username": "alice", "email": MockBackend::EMAIL}}),
                )
                .into_response()
            } else {
                ScriptedResponse::json(
                    StatusCode::UNAUTHORIZED,
                    json!({"message": "Invalid email or password"}),
                )
                .into_response()
            }
        }
        ("POST", ["register"]) => {
            ScriptedResponse::json(StatusCode::CREATED, json!({"message": "Account created"})).into_response()
        }
        _ => ScriptedResponse::text(StatusCode::NOT_FOUND, "Not Found").into_response(),
    };
    response.into()
}
