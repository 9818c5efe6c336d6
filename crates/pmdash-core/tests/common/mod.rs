#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use futures::channel::oneshot;
use pmdash_core::{
    ApiClient, ApiRequest, ApiResponse, DashboardConfig, HttpBackend, Method, TransportError,
};
use serde_json::Value;

pub const BASE: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone)]
pub enum Reply {
    Json(u16, Value),
    Bytes(u16, Vec<u8>),
    Unreachable(String),
}

struct Route {
    method: Method,
    url: String,
    replies: VecDeque<Reply>,
}

/// In-memory backend. Each route answers with its replies in order and
/// repeats the last one once the others are used up.
#[derive(Default)]
pub struct FakeBackend {
    routes: RefCell<Vec<Route>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    pub sent: RefCell<Vec<ApiRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: Method, path: &str, replies: Vec<Reply>) -> Self {
        self.routes.borrow_mut().push(Route {
            method,
            url: format!("{BASE}{path}"),
            replies: replies.into(),
        });
        self
    }

    /// Route outside the `/api` prefix, such as `/health`.
    pub fn on_root(self, method: Method, path: &str, replies: Vec<Reply>) -> Self {
        let root = BASE.trim_end_matches("/api");
        self.routes.borrow_mut().push(Route {
            method,
            url: format!("{root}{path}"),
            replies: replies.into(),
        });
        self
    }

    pub fn json(self, method: Method, path: &str, body: Value) -> Self {
        self.on(method, path, vec![Reply::Json(200, body)])
    }

    /// Holds the next response until the returned sender fires.
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn sent_with(&self, method: Method) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .filter(|r| r.method == method)
            .map(|r| r.url.clone())
            .collect()
    }

    fn reply_for(&self, request: &ApiRequest) -> Option<Reply> {
        let mut routes = self.routes.borrow_mut();
        let route = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.url == request.url)?;
        if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().cloned()
        }
    }
}

impl HttpBackend for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.sent.borrow_mut().push(request.clone());
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        match self.reply_for(&request) {
            Some(Reply::Json(status, body)) => Ok(ApiResponse {
                status,
                body: serde_json::to_vec(&body).expect("encode fixture"),
            }),
            Some(Reply::Bytes(status, body)) => Ok(ApiResponse { status, body }),
            Some(Reply::Unreachable(message)) => Err(TransportError(message)),
            None => Ok(ApiResponse {
                status: 404,
                body: br#"{"detail":"Not Found"}"#.to_vec(),
            }),
        }
    }
}

pub fn client(backend: FakeBackend) -> ApiClient<FakeBackend> {
    ApiClient::new(backend, &DashboardConfig::default())
}
