use env_logger::{Builder, Target};
use log::LevelFilter;
use std::io::Write;

/// Initialize the logger with custom formatting.
///
/// Output goes to stderr so log lines never tear the dashboard painted on stdout.
pub fn init_logger(level: LevelFilter) {
    Builder::new()
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .filter(None, level)
        // actix and hyper are chatty at debug
        .filter_module("actix_server", level.min(LevelFilter::Info))
        .filter_module("hyper", level.min(LevelFilter::Info))
        .init();
}

/// Get log level from string
pub fn get_log_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}
