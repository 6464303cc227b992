use std::sync::Arc;

use askama::Template;
use attendance::date_token::DateToken;
use attendance::report::Reporter;
use attendance::sync::SyncOutcome;
use attendance::sync::sync_date;
use axum::Form;
use axum::Router;
use axum::debug_handler;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::Html;
use axum::routing::get;
use framework::exception::CoreRsResult;
use framework::web::error::HttpResult;
use serde::Deserialize;
use tracing::debug;

use crate::AppState;

const NO_FILES_FOUND: &str = "No files found for the selected date.";

#[derive(Template)]
#[template(path = "sync_form.html")]
struct SyncForm;

/// One status line per processed file, escaped when rendered.
#[derive(Template)]
#[template(path = "sync_result.html")]
struct SyncResult {
    lines: Vec<String>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(sync_form).post(sync))
}

fn render(template: &impl Template) -> CoreRsResult<Html<String>> {
    Ok(Html(template.render()?))
}

#[debug_handler]
async fn sync_form() -> HttpResult<Html<String>> {
    Ok(render(&SyncForm)?)
}

#[derive(Debug, Deserialize)]
struct SyncRequest {
    date: Option<String>,
}

#[debug_handler]
async fn sync(
    State(state): State<Arc<AppState>>,
    request: Result<Form<SyncRequest>, FormRejection>,
) -> HttpResult<Html<String>> {
    let date = match request {
        Ok(Form(SyncRequest { date: Some(date) })) => date,
        Ok(Form(SyncRequest { date: None })) => return Ok(render(&SyncForm)?),
        Err(rejection) => {
            debug!("no form submitted, rejection={rejection}");
            return Ok(render(&SyncForm)?);
        }
    };
    let date = DateToken::parse(&date)?;

    let _guard = state.sync_lock.lock().await;
    let mut reporter = Reporter::new(Vec::new());
    match sync_date(&state.selector, &state.uploader, &mut reporter, &date).await? {
        SyncOutcome::NoFilesFound => Ok(Html(NO_FILES_FOUND.to_owned())),
        SyncOutcome::Synced(_) => Ok(render(&SyncResult {
            lines: reporter.into_output(),
        })?),
    }
}
