//! A scripted [`Backend`] for tests.
//!
//! Responses are queued per `(method, path)`. Each request pops the next
//! queued response; the final one stays in place and answers every later
//! request to the same route. Unscripted routes answer
//! `404 {"detail":"Not found."}`.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::{Backend, Method, Request, Response, TransportError};

type Route = (Method, String);

/// Canned-response backend that records every request it receives.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    routes: Mutex<HashMap<Route, VecDeque<Result<Response, TransportError>>>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedBackend {
    /// Creates a backend with no scripted routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON response for `method path`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.push(method, path, Ok(Response::json(status, body)))
    }

    /// Queues a transport failure for `method path`.
    pub fn fail(&self, method: Method, path: &str, error: TransportError) -> &Self {
        self.push(method, path, Err(error))
    }

    fn push(
        &self,
        method: Method,
        path: &str,
        outcome: Result<Response, TransportError>,
    ) -> &Self {
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry((method, path.to_string()))
            .or_default()
            .push_back(outcome);
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of requests received for `method path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Total number of requests received.
    pub fn total(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl Backend for ScriptedBackend {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let route = (request.method, request.path.clone());
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        match routes.get_mut(&route) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| Ok(not_found())),
            Some(queue) => queue.front().cloned().unwrap_or_else(|| Ok(not_found())),
            None => Ok(not_found()),
        }
    }
}

fn not_found() -> Response {
    Response::json(404, r#"{"detail":"Not found."}"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_unscripted_route_returns_404() {
        let backend = ScriptedBackend::new();

        let resp = backend.send(Request::get("/api/me")).await.unwrap();

        assert_eq!(resp.status, 404);
    }

    #[tokio::test]
    async fn test_send_pops_queue_and_repeats_last() {
        let backend = ScriptedBackend::new();
        backend
            .respond(Method::Get, "/api/me", 401, "{}")
            .respond(Method::Get, "/api/me", 200, "{}");

        let first = backend.send(Request::get("/api/me")).await.unwrap();
        let second = backend.send(Request::get("/api/me")).await.unwrap();
        let third = backend.send(Request::get("/api/me")).await.unwrap();

        assert_eq!(first.status, 401);
        assert_eq!(second.status, 200);
        assert_eq!(third.status, 200, "last response should repeat");
    }

    #[tokio::test]
    async fn test_send_records_requests() {
        let backend = ScriptedBackend::new();

        let _ = backend.send(Request::get("/api/me").with_bearer("t")).await;
        let _ = backend.send(Request::post("/api/chat", b"{}".to_vec())).await;

        assert_eq!(backend.total(), 2);
        assert_eq!(backend.count(Method::Get, "/api/me"), 1);
        assert_eq!(backend.requests()[0].bearer.as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn test_fail_returns_transport_error() {
        let backend = ScriptedBackend::new();
        backend.fail(Method::Post, "/api/auth/refresh", TransportError::Timeout);

        let result = backend
            .send(Request::post("/api/auth/refresh", b"{}".to_vec()))
            .await;

        assert_eq!(result, Err(TransportError::Timeout));
    }
}
