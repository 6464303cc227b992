use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;
use std::path::PathBuf;

use framework::exception::CoreRsResult;
use framework::http::HeaderName;
use framework::http::HttpClient;
use framework::http::HttpRequest;
use framework::http::Method;
use framework::http::multipart::Form;
use framework::http::multipart::Part;
use tokio::fs;
use tracing::Instrument;
use tracing::debug;
use tracing::info;
use tracing::info_span;
use tracing::warn;

use crate::config::SyncConfig;

pub const UPLOAD_FAILED: &str = "UPLOAD_FAILED";
pub const DELETE_FAILED: &str = "DELETE_FAILED";

/// Reported in place of a status code when no response was received.
pub const TRANSPORT_ERROR_STATUS: u16 = 0;

#[derive(Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded,
    /// Upload succeeded but the file is still on disk, the next run posts it again.
    UploadedButNotDeleted { reason: String },
    Failed { status: u16 },
}

#[derive(Debug)]
pub struct UploadResult {
    pub path: PathBuf,
    pub outcome: UploadOutcome,
}

impl Display for UploadResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let path = self.path.display();
        match self.outcome {
            UploadOutcome::Uploaded => write!(f, "Uploaded and deleted: {path}"),
            UploadOutcome::UploadedButNotDeleted { ref reason } => {
                write!(f, "Uploaded but not deleted: {path} ({reason})")
            }
            UploadOutcome::Failed { status } => write!(f, "Failed to upload: {path} (HTTP {status})"),
        }
    }
}

pub struct Uploader {
    client: HttpClient,
    api_url: String,
    auth_key: String,
}

impl Uploader {
    pub fn new(config: &SyncConfig) -> CoreRsResult<Self> {
        Ok(Uploader {
            client: HttpClient::new(&config.http_client_config())?,
            api_url: config.api_url.clone(),
            auth_key: config.auth_key.clone(),
        })
    }

    /// Makes exactly one upload attempt, and deletes the file when the API answers 200.
    ///
    /// Returns `None` when the file is gone or empty, such files are neither uploaded nor reported.
    pub async fn upload(&self, path: &Path) -> Option<UploadResult> {
        match fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() && metadata.len() > 0 => {}
            _ => {
                debug!(path = %path.display(), "skip missing or empty file");
                return None;
            }
        }

        let span = info_span!("upload", path = %path.display());
        let outcome = async {
            match self.post(path).await {
                Ok(200) => delete(path).await,
                Ok(status) => {
                    warn!(error_code = UPLOAD_FAILED, status, "upload rejected, path={}", path.display());
                    UploadOutcome::Failed { status }
                }
                Err(e) => {
                    warn!(error_code = UPLOAD_FAILED, error = %e, "upload failed, path={}", path.display());
                    UploadOutcome::Failed {
                        status: TRANSPORT_ERROR_STATUS,
                    }
                }
            }
        }
        .instrument(span)
        .await;

        Some(UploadResult {
            path: path.to_path_buf(),
            outcome,
        })
    }

    async fn post(&self, path: &Path) -> CoreRsResult<u16> {
        let content = fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(file_name, length = content.len(), "[upload]");
        let part = Part::bytes(content).file_name(file_name).mime_str("text/csv")?;

        let mut request = HttpRequest::new(Method::POST, self.api_url.clone());
        request
            .headers
            .insert(HeaderName::from_static("x-auth-key"), self.auth_key.clone());
        request.multipart(Form::new().part("file", part));
        let response = self.client.execute(request).await?;
        Ok(response.status)
    }
}

// tried once, failure leaves the file for the next run
async fn delete(path: &Path) -> UploadOutcome {
    match fs::remove_file(path).await {
        Ok(()) => {
            info!("uploaded and deleted, path={}", path.display());
            UploadOutcome::Uploaded
        }
        Err(err) => {
            warn!(error_code = DELETE_FAILED, "uploaded but failed to delete, path={}, error={err}", path.display());
            UploadOutcome::UploadedButNotDeleted { reason: err.to_string() }
        }
    }
}
