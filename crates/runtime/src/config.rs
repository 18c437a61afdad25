pub const PROGRAM_NAME: &str = "statx";

/// Environment variable controlling the diagnostic log level.
/// Accepts the usual `log` level names plus `off`; defaults to `warn`.
pub const PROGRAM_LOG_LEVEL: &str = "STATX_LOG_LEVEL";
