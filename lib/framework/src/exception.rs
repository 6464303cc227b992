use std::error::Error;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

pub mod error_code;

pub type CoreRsResult<T> = Result<T, Exception>;

pub struct Exception {
    pub severity: Severity,
    pub code: Option<String>,
    pub message: String,
    pub location: Option<String>,
    pub source: Option<Box<Exception>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warn => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

impl Exception {
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }

    fn chain(&self) -> impl Iterator<Item = &Exception> {
        let mut current = Some(self);
        std::iter::from_fn(move || {
            let next = current?;
            current = next.source.as_deref();
            Some(next)
        })
    }
}

impl Debug for Exception {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

// one line per cause, outermost first
impl Display for Exception {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, exception) in self.chain().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{index}: {} ", exception.severity)?;
            if let Some(ref code) = exception.code {
                write!(f, "[{code}] ")?;
            }
            write!(f, "{}", exception.message)?;
            if let Some(ref location) = exception.location {
                write!(f, " at {location}")?;
            }
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! exception {
    ($(severity = $severity:expr,)? $(code = $code:expr,)? message = $message:expr $(,source = $source:expr)?) => {{
        #[allow(unused_variables)]
        let severity = $crate::exception::Severity::Error;
        $(
            let severity = $severity;
        )?
        #[allow(unused_variables)]
        let code: Option<String> = None;
        $(
            let code = Some($code.to_string());
        )?
        #[allow(unused_variables)]
        let source: Option<Box<$crate::exception::Exception>> = None;
        $(
            let source = Some(Box::new($source.into()));
        )?
        $crate::exception::Exception {
            severity,
            code,
            message: $message.to_string(),
            location: Some(format!("{}:{}:{}", file!(), line!(), column!())),
            source,
        }
    }};
}

#[macro_export]
macro_rules! validation_error {
    ($(severity = $severity:expr,)? message = $message:expr) => {{
        #[allow(unused_variables)]
        let severity = $crate::exception::Severity::Warn;
        $(
            let severity = $severity;
        )?
        $crate::exception!(severity = severity, code = $crate::exception::error_code::VALIDATION_ERROR, message = $message)
    }};
}

fn source_chain(source: Option<&(dyn Error + 'static)>) -> Option<Box<Exception>> {
    let mut causes = Vec::new();
    let mut current = source;
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }

    causes.into_iter().rev().fold(None, |inner, message| {
        Some(Box::new(Exception {
            severity: Severity::Error,
            code: None,
            message,
            location: None,
            source: inner,
        }))
    })
}

impl<T> From<T> for Exception
where
    T: Error + 'static,
{
    fn from(error: T) -> Self {
        Exception {
            severity: Severity::Error,
            code: None,
            message: error.to_string(),
            location: None,
            source: source_chain(error.source()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Severity;
    use super::error_code;

    #[test]
    fn validation_error() {
        let error = validation_error!(message = "date must be 8 digits");
        assert_eq!(error.severity, Severity::Warn);
        assert!(error.has_code(error_code::VALIDATION_ERROR));
        assert!(error.to_string().starts_with("0: WARN [VALIDATION_ERROR] date must be 8 digits at "));
    }

    #[test]
    fn source_is_displayed_after_message() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = exception!(message = "failed to read file", source = io_error);
        let lines: Vec<String> = error.to_string().lines().map(ToOwned::to_owned).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0: ERROR failed to read file at "));
        assert_eq!(lines[1], "1: ERROR no such file");
    }
}
