// src/logging.rs

use crate::config::Config;
use crate::models::ApiCallLog;
use flexi_logger::{
    Age, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};

/// Starts file logging. The terminal belongs to the TUI, so nothing is
/// written to stdout or stderr. Keep the handle alive for the whole run.
pub fn init_logging(config: &Config) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(config.log_level_filter().to_string().to_lowercase())?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_directory())
                .basename("tura"),
        )
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(7),
        )
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
}

/// Logs an API call. The endpoint never carries the credential.
pub fn log_api_call(log: &ApiCallLog) {
    let level = if (200..300).contains(&log.response_status) {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    log::log!(
        target: "tura::api",
        level,
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );
}
