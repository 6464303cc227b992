use std::path::PathBuf;
use std::time::Duration;

use framework::exception::CoreRsResult;
use framework::fs::path_buf::PathBufExt;
use framework::http::HttpClientConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct SyncConfig {
    pub csv_dir: String,
    pub api_url: String,
    pub auth_key: String,
    #[serde(default = "default_timeout_in_seconds")]
    pub timeout_in_seconds: u64,
}

fn default_timeout_in_seconds() -> u64 {
    30
}

impl SyncConfig {
    pub fn csv_dir(&self) -> CoreRsResult<PathBuf> {
        PathBuf::from(&self.csv_dir).into_absolute_path()
    }

    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: Duration::from_secs(self.timeout_in_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use framework::json;

    use super::SyncConfig;

    #[test]
    fn default_timeout() {
        let config: SyncConfig = json::from_json(
            r#"{"csv_dir": "/var/lib/attendance", "api_url": "https://example.com/api/attendance", "auth_key": "abcd"}"#,
        )
        .unwrap();
        assert_eq!(config.timeout_in_seconds, 30);
        assert_eq!(config.http_client_config().timeout, Duration::from_secs(30));
        assert_eq!(config.csv_dir().unwrap().to_string_lossy(), "/var/lib/attendance");
    }
}
