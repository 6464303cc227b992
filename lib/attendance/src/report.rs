use std::io;
use std::io::Write;

use framework::exception::CoreRsResult;

use crate::uploader::UploadOutcome;
use crate::uploader::UploadResult;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    pub uploaded: usize,
    pub not_deleted: usize,
    pub failed: usize,
}

/// Destination of the status lines.
pub trait ReportOutput {
    fn write_line(&mut self, line: String) -> io::Result<()>;
}

/// Newline terminated lines, flushed one by one, for the console.
pub struct TextOutput<W>(pub W);

impl<W> ReportOutput for TextOutput<W>
where
    W: Write,
{
    fn write_line(&mut self, line: String) -> io::Result<()> {
        writeln!(self.0, "{line}")?;
        self.0.flush()
    }
}

// kept as data, a page template renders and escapes them
impl ReportOutput for Vec<String> {
    fn write_line(&mut self, line: String) -> io::Result<()> {
        self.push(line);
        Ok(())
    }
}

/// Writes one status line per upload result, as soon as the result is known.
pub struct Reporter<O> {
    output: O,
    summary: SyncSummary,
}

impl<O> Reporter<O>
where
    O: ReportOutput,
{
    pub fn new(output: O) -> Self {
        Reporter {
            output,
            summary: SyncSummary::default(),
        }
    }

    /// The result is counted even when its line cannot be written.
    pub fn report(&mut self, result: &UploadResult) -> CoreRsResult<()> {
        match result.outcome {
            UploadOutcome::Uploaded => self.summary.uploaded += 1,
            UploadOutcome::UploadedButNotDeleted { .. } => self.summary.not_deleted += 1,
            UploadOutcome::Failed { .. } => self.summary.failed += 1,
        }
        self.output.write_line(result.to_string())?;
        Ok(())
    }

    pub fn summary(&self) -> SyncSummary {
        self.summary
    }

    pub fn into_output(self) -> O {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::Reporter;
    use super::SyncSummary;
    use super::TextOutput;
    use crate::uploader::UploadOutcome;
    use crate::uploader::UploadResult;

    fn results() -> Vec<UploadResult> {
        vec![
            UploadResult {
                path: PathBuf::from("/data/attendance_20240101_a.csv"),
                outcome: UploadOutcome::Uploaded,
            },
            UploadResult {
                path: PathBuf::from("/data/attendance_20240101_<b>.csv"),
                outcome: UploadOutcome::Failed { status: 500 },
            },
            UploadResult {
                path: PathBuf::from("/data/attendance_20240101_c.csv"),
                outcome: UploadOutcome::UploadedButNotDeleted {
                    reason: "Is a directory (os error 21)".to_owned(),
                },
            },
        ]
    }

    #[test]
    fn text() {
        let mut reporter = Reporter::new(TextOutput(Vec::new()));
        for result in results() {
            reporter.report(&result).unwrap();
        }
        assert_eq!(
            reporter.summary(),
            SyncSummary {
                uploaded: 1,
                not_deleted: 1,
                failed: 1
            }
        );
        assert_eq!(
            String::from_utf8(reporter.into_output().0).unwrap(),
            "Uploaded and deleted: /data/attendance_20240101_a.csv\n\
             Failed to upload: /data/attendance_20240101_<b>.csv (HTTP 500)\n\
             Uploaded but not deleted: /data/attendance_20240101_c.csv (Is a directory (os error 21))\n"
        );
    }

    #[test]
    fn lines() {
        let mut reporter = Reporter::new(Vec::new());
        for result in results().iter().take(2) {
            reporter.report(result).unwrap();
        }
        assert_eq!(
            reporter.into_output(),
            vec![
                "Uploaded and deleted: /data/attendance_20240101_a.csv".to_owned(),
                "Failed to upload: /data/attendance_20240101_<b>.csv (HTTP 500)".to_owned(),
            ]
        );
    }
}
