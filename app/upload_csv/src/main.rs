#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use std::sync::Arc;
use std::time::Duration;

use attendance::config::SyncConfig;
use attendance::selector::FileSelector;
use attendance::uploader::Uploader;
use framework::asset::asset_path;
use framework::exception::CoreRsResult;
use framework::json;
use framework::log;
use framework::schedule::Scheduler;
use framework::shutdown::Shutdown;
use job::upload_csv;
use job::upload_csv_job;
use serde::Deserialize;
use tracing::info;

mod job;

#[derive(Debug, Deserialize, Clone)]
struct AppConfig {
    #[serde(flatten)]
    sync: SyncConfig,
    // runs once and exits when absent
    sync_interval_in_seconds: Option<u64>,
}

pub struct AppState {
    selector: FileSelector,
    uploader: Uploader,
}

impl AppState {
    fn new(config: &SyncConfig) -> CoreRsResult<Self> {
        Ok(AppState {
            selector: FileSelector::new(config.csv_dir()?),
            uploader: Uploader::new(config)?,
        })
    }
}

#[tokio::main]
async fn main() -> CoreRsResult<()> {
    log::init();

    let config: AppConfig = json::load_file(&asset_path("assets/conf.json")?)?;
    let state = Arc::new(AppState::new(&config.sync)?);

    upload_csv(&state).await?;

    if let Some(interval) = config.sync_interval_in_seconds {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        shutdown.listen();

        info!("schedule upload csv job, interval={interval}s");
        let mut scheduler = Scheduler::new();
        scheduler.schedule_fixed_rate("upload-csv-job", upload_csv_job, Duration::from_secs(interval));
        scheduler.start(state, signal).await?;
    }

    Ok(())
}
