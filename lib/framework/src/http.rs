use std::collections::HashMap;
use std::time::Duration;

pub use http::HeaderName;
pub use http::header;
pub use reqwest::Method;
use reqwest::Url;
pub use reqwest::multipart;
use tracing::Instrument;
use tracing::debug;
use tracing::debug_span;

use crate::exception::CoreRsResult;

pub struct HttpClient {
    client: reqwest::Client,
}

pub struct HttpClientConfig {
    /// Bounds connect plus the whole exchange, there is no separate read timeout.
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        HttpClientConfig {
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<HeaderName, String>,
    form: Option<multipart::Form>,
}

impl HttpRequest {
    pub fn new(method: Method, url: String) -> Self {
        HttpRequest {
            method,
            url,
            headers: HashMap::new(),
            form: None,
        }
    }

    // content type with boundary is set by reqwest
    pub fn multipart(&mut self, form: multipart::Form) {
        self.headers.remove(&header::CONTENT_TYPE);
        self.form = Some(form);
    }
}

/// Only the status is kept, once it is received the exchange counts as answered.
pub struct HttpResponse {
    pub status: u16,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig) -> CoreRsResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(300))
            .connection_verbose(false)
            .build()
            .map_err(|err| exception!(message = "failed to build http client", source = err))?;
        Ok(HttpClient { client })
    }

    pub async fn execute(&self, request: HttpRequest) -> CoreRsResult<HttpResponse> {
        let span = debug_span!("http_client", url = request.url, method = %request.method);
        async {
            debug!(method = %request.method, "[request]");
            debug!(url = request.url, "[request]");
            let url = Url::parse(&request.url)?;
            let mut builder = self.client.request(request.method, url);
            for (key, value) in request.headers {
                debug!("[header] {}={}", key, value);
                builder = builder.header(key, value);
            }
            if let Some(form) = request.form {
                debug!("[request] body=multipart, boundary={}", form.boundary());
                builder = builder.multipart(form);
            }

            let response = self.client.execute(builder.build()?).await?;
            let status = response.status().as_u16();
            debug!(status, "[response]");
            for (key, value) in response.headers() {
                debug!("[header] {key}={}", String::from_utf8_lossy(value.as_bytes()));
            }

            // the status is the answer, a body that cannot be read does not undo it
            match response.text().await {
                Ok(body) => debug!("[response] body={body}"),
                Err(err) => debug!("[response] failed to read body, error={err}"),
            }

            Ok(HttpResponse { status })
        }
        .instrument(span)
        .await
    }
}
