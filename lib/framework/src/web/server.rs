use axum::Router;
use axum::extract::MatchedPath;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::http::header;
use axum::middleware;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::debug;
use tracing::info;

use crate::exception::CoreRsResult;
use crate::log;

pub struct HttpServerConfig {
    pub bind_address: String,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        HttpServerConfig {
            bind_address: "0.0.0.0:8080".to_owned(),
        }
    }
}

pub async fn start_http_server(
    router: Router,
    mut shutdown_signal: broadcast::Receiver<()>,
    config: HttpServerConfig,
) -> CoreRsResult<()> {
    let app = router.layer(middleware::from_fn(http_server_layer));
    let listener = TcpListener::bind(&config.bind_address).await.map_err(|err| {
        exception!(
            message = format!("failed to bind http server, bind={}", config.bind_address),
            source = err
        )
    })?;
    info!("http server started, bind={}", config.bind_address);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_signal.recv().await;
        })
        .await?;
    info!("http server stopped");

    Ok(())
}

async fn http_server_layer(request: Request, next: Next) -> Response {
    // skip log for health check
    if request.uri().path() == "/health-check" {
        return StatusCode::OK.into_response();
    }

    let mut response = None;
    log::start_action("http", None, async {
        let method = request.method().clone();
        let uri = request.uri().clone();
        debug!(method = ?method, "[request]");
        debug!(uri = ?uri, "[request]");
        for (name, value) in request.headers() {
            if name != header::COOKIE {
                debug!("[header] {name}={value:?}");
            }
        }

        if let Some(matched_path) = request.extensions().get::<MatchedPath>() {
            debug!(matched_path = matched_path.as_str(), "context");
        }

        if let Some(length) = request
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok())
        {
            debug!(request_content_length = length, "stats");
        }

        let http_response = next.run(request).await;

        let status = http_response.status().as_u16();
        info!(method = %method, uri = %uri, status, "[response]");
        for (name, value) in http_response.headers() {
            debug!("[header] {name}={value:?}");
        }
        response = Some(http_response);
        Ok(())
    })
    .await;
    response.unwrap_or_else(|| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
