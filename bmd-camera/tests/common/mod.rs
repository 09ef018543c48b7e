#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use bmd_camera::{CameraConfig, HttpCamera, API_PREFIX};
use serde_json::Value;

/// In-process stand-in for a camera. GETs answer from `resources`, PUTs are
/// logged and, when accepted, replace the stored resource.
#[derive(Default)]
pub struct MockCamera {
    resources: Mutex<HashMap<String, (StatusCode, String)>>,
    put_status: Mutex<Option<StatusCode>>,
    puts: Mutex<Vec<(String, Value)>>,
    gets: Mutex<Vec<String>>,
}

impl MockCamera {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn serve(&self, endpoint: &str, status: StatusCode, body: Value) {
        self.serve_raw(endpoint, status, &body.to_string());
    }

    /// Like `serve`, but the body goes out verbatim, JSON or not.
    pub fn serve_raw(&self, endpoint: &str, status: StatusCode, body: &str) {
        self.resources
            .lock()
            .unwrap()
            .insert(endpoint.to_owned(), (status, body.to_owned()));
    }

    /// Answer every PUT with `status` instead of `204 No Content`.
    pub fn reject_puts(&self, status: StatusCode) {
        *self.put_status.lock().unwrap() = Some(status);
    }

    pub fn resource(&self, endpoint: &str) -> Option<Value> {
        self.resources
            .lock()
            .unwrap()
            .get(endpoint)
            .and_then(|(_, body)| serde_json::from_str(body).ok())
    }

    pub fn puts(&self) -> Vec<(String, Value)> {
        self.puts.lock().unwrap().clone()
    }

    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }
}

async fn handle(
    State(mock): State<Arc<MockCamera>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let Some(endpoint) = uri.path().strip_prefix(API_PREFIX) else {
        return (StatusCode::NOT_FOUND, "unknown API").into_response();
    };
    let endpoint = endpoint.to_owned();

    if method == Method::GET {
        mock.gets.lock().unwrap().push(endpoint.clone());
        return match mock.resources.lock().unwrap().get(&endpoint) {
            Some((status, body)) if status.as_u16() < 300 => {
                (*status, body.clone()).into_response()
            }
            Some((status, _)) => (*status, "camera error").into_response(),
            None => (StatusCode::NOT_FOUND, "not found").into_response(),
        };
    }

    if method == Method::PUT {
        let value: Value = match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(_) => return (StatusCode::BAD_REQUEST, "bad json").into_response(),
        };
        mock.puts.lock().unwrap().push((endpoint.clone(), value.clone()));

        if let Some(status) = *mock.put_status.lock().unwrap() {
            return (status, "write refused").into_response();
        }
        mock.resources
            .lock()
            .unwrap()
            .insert(endpoint, (StatusCode::OK, value.to_string()));
        return StatusCode::NO_CONTENT.into_response();
    }

    StatusCode::METHOD_NOT_ALLOWED.into_response()
}

/// Serves `mock` on a free local port and returns a client pointed at it.
pub async fn spawn(mock: Arc<MockCamera>) -> HttpCamera {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind a local port");
    let addr = listener.local_addr().expect("listener has an address");

    let app = Router::new().fallback(handle).with_state(mock);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock camera crashed");
    });

    HttpCamera::new(CameraConfig::new(addr.to_string())).expect("client should build")
}
