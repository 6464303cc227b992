use std::path::PathBuf;

use framework::exception::CoreRsResult;
use tracing::info;
use tracing::warn;

use crate::date_token::DateToken;
use crate::report::ReportOutput;
use crate::report::Reporter;
use crate::report::SyncSummary;
use crate::selector::FileSelector;
use crate::uploader::Uploader;

#[derive(Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    NoFilesFound,
    Synced(SyncSummary),
}

/// Uploads every attendance file in the directory, whatever its date.
pub async fn sync_all<O>(
    selector: &FileSelector,
    uploader: &Uploader,
    reporter: &mut Reporter<O>,
) -> CoreRsResult<SyncSummary>
where
    O: ReportOutput,
{
    let files = selector.select_all()?;
    info!("sync all files, count={}", files.len());
    upload_files(files, uploader, reporter).await
}

/// Uploads the files of one batch date, an empty selection is reported rather than treated as an error.
pub async fn sync_date<O>(
    selector: &FileSelector,
    uploader: &Uploader,
    reporter: &mut Reporter<O>,
    date: &DateToken,
) -> CoreRsResult<SyncOutcome>
where
    O: ReportOutput,
{
    let files = selector.select_by_date(date)?;
    if files.is_empty() {
        info!("no files found, date={date}");
        return Ok(SyncOutcome::NoFilesFound);
    }
    info!("sync files, date={date}, count={}", files.len());
    let summary = upload_files(files, uploader, reporter).await?;
    Ok(SyncOutcome::Synced(summary))
}

// one file at a time, neither a failed file nor a lost status line stops the rest
async fn upload_files<O>(
    files: Vec<PathBuf>,
    uploader: &Uploader,
    reporter: &mut Reporter<O>,
) -> CoreRsResult<SyncSummary>
where
    O: ReportOutput,
{
    for path in files {
        if let Some(result) = uploader.upload(&path).await
            && let Err(e) = reporter.report(&result)
        {
            warn!("failed to write status line, result={result}, error={e}");
        }
    }
    let summary = reporter.summary();
    info!(
        uploaded = summary.uploaded,
        not_deleted = summary.not_deleted,
        failed = summary.failed,
        "sync finished"
    );
    Ok(summary)
}
