pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
