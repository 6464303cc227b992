use std::sync::Arc;

use attendance::config::SyncConfig;
use attendance::selector::FileSelector;
use attendance::uploader::Uploader;
use axum::Router;
use framework::asset::asset_path;
use framework::exception::CoreRsResult;
use framework::json;
use framework::log;
use framework::shutdown::Shutdown;
use framework::web::server::HttpServerConfig;
use framework::web::server::start_http_server;
use serde::Deserialize;
use tokio::sync::Mutex;

mod web;

#[derive(Debug, Deserialize, Clone)]
struct AppConfig {
    #[serde(flatten)]
    sync: SyncConfig,
    bind_address: Option<String>,
}

pub struct AppState {
    selector: FileSelector,
    uploader: Uploader,
    // one sync at a time within this process, concurrent submissions wait
    sync_lock: Mutex<()>,
}

impl AppState {
    fn new(config: &SyncConfig) -> CoreRsResult<Self> {
        Ok(AppState {
            selector: FileSelector::new(config.csv_dir()?),
            uploader: Uploader::new(config)?,
            sync_lock: Mutex::new(()),
        })
    }
}

#[tokio::main]
async fn main() -> CoreRsResult<()> {
    log::init();

    let config: AppConfig = json::load_file(&asset_path("assets/conf.json")?)?;

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    shutdown.listen();

    let state = Arc::new(AppState::new(&config.sync)?);

    let app = Router::new();
    let app = app.merge(web::routes());
    let app = app.with_state(state);

    let mut server_config = HttpServerConfig::default();
    if let Some(bind_address) = config.bind_address {
        server_config.bind_address = bind_address;
    }
    start_http_server(app, signal, server_config).await
}
