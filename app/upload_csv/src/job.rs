use std::io;
use std::sync::Arc;

use attendance::report::Reporter;
use attendance::report::TextOutput;
use attendance::sync::sync_all;
use framework::exception::CoreRsResult;
use framework::schedule::JobContext;

use crate::AppState;

pub async fn upload_csv_job(state: Arc<AppState>, _context: JobContext) -> CoreRsResult<()> {
    upload_csv(&state).await
}

pub async fn upload_csv(state: &AppState) -> CoreRsResult<()> {
    let mut reporter = Reporter::new(TextOutput(io::stdout()));
    sync_all(&state.selector, &state.uploader, &mut reporter).await?;
    Ok(())
}
