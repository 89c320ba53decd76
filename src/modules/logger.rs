use crate::modules::config::get_data_dir;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn get_log_dir() -> Result<PathBuf, String> {
    let data_dir = get_data_dir().map_err(|e| e.to_string())?;
    let log_dir = data_dir.join("logs");

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)
            .map_err(|e| format!("Failed to create log directory: {}", e))?;
    }

    Ok(log_dir)
}

/// Initialize logger system
pub fn init_logger() {
    // Capture log macro logs
    let _ = tracing_log::LogTracer::init();

    // Console output layer
    let console_layer = fmt::Layer::new()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    // Filter layer (default to INFO and above)
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let log_dir = match get_log_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to initialize log directory, logging to console only: {}", e);
            let _ = tracing_subscriber::registry()
                .with(filter_layer)
                .with(console_layer)
                .try_init();
            return;
        }
    };

    // File appender, rolled daily
    let file_appender = tracing_appender::rolling::daily(log_dir, "gateway.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // File output layer (ANSI off)
    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // try_init so a second initialisation does not panic
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    // The guard must live until exit for the non-blocking writer to flush.
    std::mem::forget(guard);

    info!("Logger system initialized (Console + File Persistence)");
}
