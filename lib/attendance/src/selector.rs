use std::path::PathBuf;

use framework::exception;
use framework::exception::CoreRsResult;
use glob::Pattern;
use glob::glob;
use tracing::debug;

use crate::date_token::DateToken;

pub struct FileSelector {
    dir: PathBuf,
}

impl FileSelector {
    pub fn new(dir: PathBuf) -> Self {
        FileSelector { dir }
    }

    pub fn select_all(&self) -> CoreRsResult<Vec<PathBuf>> {
        self.select("attendance_*.csv")
    }

    pub fn select_by_date(&self, date: &DateToken) -> CoreRsResult<Vec<PathBuf>> {
        self.select(&format!("attendance_{date}_*.csv"))
    }

    // order is whatever glob yields, callers must not rely on it
    fn select(&self, file_pattern: &str) -> CoreRsResult<Vec<PathBuf>> {
        let dir = self.dir.to_str().ok_or_else(|| {
            exception!(message = format!("csv dir is not valid utf-8, dir={}", self.dir.to_string_lossy()))
        })?;
        let pattern = format!("{}/{file_pattern}", Pattern::escape(dir));
        debug!(pattern, "select files");

        let mut files = Vec::new();
        for entry in glob(&pattern)? {
            files.push(entry?);
        }
        debug!(count = files.len(), "selected files");
        Ok(files)
    }
}
