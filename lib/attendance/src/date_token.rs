use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::LazyLock;

use framework::exception::CoreRsResult;
use framework::validation_error;
use regex::Regex;

/// Batch date as written in file names, `YYYYMMDD`.
///
/// Only the shape is checked, `20241399` is accepted as long as files carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken(String);

impl DateToken {
    pub fn parse(value: &str) -> CoreRsResult<Self> {
        static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{8}$").unwrap());

        if DATE_REGEX.is_match(value) {
            Ok(DateToken(value.to_owned()))
        } else {
            Err(validation_error!(message = "Invalid date format. Use YYYYMMDD."))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DateToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
