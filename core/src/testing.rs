//! Scripted transports for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{BpjsApi, Transport};

pub(crate) const BASE_URL: &str = "http://bpjs.test/api";

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync;

/// Answers every request with the handler's result and counts calls.
pub(crate) struct ScriptedTransport {
    handler: Box<Handler>,
    calls: AtomicUsize,
    paths: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new(
        handler: impl Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: AtomicUsize::new(0),
            paths: Mutex::new(Vec::new()),
        }
    }

    /// Always answer 200 with the given body.
    pub(crate) fn ok(body: &'static str) -> Self {
        Self::new(move |_| Ok(HttpResponse::new(200, body)))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().unwrap().push(request.path.clone());
        (self.handler)(&request)
    }
}

/// Parks each request until the test releases the response for its path.
pub(crate) struct GatedTransport {
    gates: Mutex<HashMap<String, oneshot::Receiver<HttpResponse>>>,
    calls: AtomicUsize,
}

impl GatedTransport {
    pub(crate) fn new() -> Self {
        Self {
            gates: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Register a gate for `path` and return the sender that releases it.
    pub(crate) fn gate(&self, path: &str) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(format!("{BASE_URL}{path}"), rx);
        tx
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let rx = self
            .gates
            .lock()
            .unwrap()
            .remove(&request.path)
            .unwrap_or_else(|| panic!("no gate for {}", request.path));
        rx.await.map_err(|e| ApiError::Transport(e.to_string()))
    }
}

pub(crate) fn api<T: Transport>(transport: T) -> BpjsApi<T> {
    BpjsApi::new(BASE_URL, transport)
}
