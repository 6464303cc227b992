use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::extract::Multipart;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderName;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use tokio::net::TcpListener;

pub(crate) struct ReceivedFile {
    pub(crate) file_name: Option<String>,
    pub(crate) content: Vec<u8>,
    pub(crate) auth_key: Option<String>,
}

#[derive(Clone, Default)]
pub(crate) struct ServerOptions {
    /// Extra response header, the value is sent as raw bytes.
    pub(crate) header: Option<(&'static str, &'static [u8])>,
    /// Swapped for a directory of the same name while the upload is handled, so it cannot be removed afterwards.
    pub(crate) replace_with_dir: Option<PathBuf>,
}

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    options: ServerOptions,
    received: Arc<Mutex<Vec<ReceivedFile>>>,
}

/// Stands in for the attendance API, records every `file` part and answers with a fixed status.
pub(crate) struct TestServer {
    url: String,
    received: Arc<Mutex<Vec<ReceivedFile>>>,
}

impl TestServer {
    pub(crate) async fn start(status: StatusCode) -> Self {
        Self::start_with(status, ServerOptions::default()).await
    }

    pub(crate) async fn start_with(status: StatusCode, options: ServerOptions) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/api/attendance", post(receive))
            .with_state(ServerState {
                status,
                options,
                received: received.clone(),
            });
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });
        TestServer {
            url: format!("http://{address}/api/attendance"),
            received,
        }
    }

    pub(crate) fn url(&self) -> String {
        self.url.clone()
    }

    pub(crate) fn received(&self) -> Vec<ReceivedFile> {
        std::mem::take(&mut *self.received.lock().unwrap())
    }
}

async fn receive(State(state): State<ServerState>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    let auth_key = headers
        .get("x-auth-key")
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("file") {
            let file_name = field.file_name().map(ToOwned::to_owned);
            let content = field.bytes().await.unwrap().to_vec();
            state.received.lock().unwrap().push(ReceivedFile {
                file_name,
                content,
                auth_key: auth_key.clone(),
            });
        }
    }
    if let Some(ref path) = state.options.replace_with_dir {
        fs::remove_file(path).unwrap();
        fs::create_dir(path).unwrap();
    }
    let mut response = state.status.into_response();
    if let Some((name, value)) = state.options.header {
        response
            .headers_mut()
            .insert(HeaderName::from_static(name), HeaderValue::from_bytes(value).unwrap());
    }
    response
}

// nothing listens on the returned port
pub(crate) async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{address}/api/attendance")
}
