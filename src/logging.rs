use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle};

/// Start file logging under `logs/`, mirrored to the console.
///
/// `spec` is a flexi_logger spec string such as `"info"` or `"campaint_lib=debug"`.
/// Keep the returned handle alive for as long as logging is needed.
pub fn setup_logging(spec: &str) -> Result<LoggerHandle, String> {
    Logger::try_with_str(spec)
        .map_err(|e| format!("Invalid log spec '{}': {}", spec, e))?
        .log_to_file(FileSpec::default().directory("logs"))
        .duplicate_to_stderr(Duplicate::Warn)
        .duplicate_to_stdout(Duplicate::Info)
        .rotate(
            flexi_logger::Criterion::Size(1024 * 1024), //1MB
            flexi_logger::Naming::Timestamps,
            flexi_logger::Cleanup::KeepLogFiles(5),
        )
        .start()
        .map_err(|e| format!("Logger initialization failed with {}", e))
}
