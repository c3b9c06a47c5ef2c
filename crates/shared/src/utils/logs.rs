use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. The returned guard flushes the file writer
/// and must live as long as the process.
pub fn init_logger(component: &str, is_dev: bool, enable_file: bool) -> Option<WorkerGuard> {
    let log_dir = if is_dev { "./logs" } else { "/var/log/app" };

    let (file_layer, guard) = if enable_file {
        let file_name = format!("rust_app_{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let pretty_layer = is_dev.then(|| {
        fmt::layer()
            .pretty()
            .with_thread_names(true)
            .with_ansi(true)
            .with_filter(console_filter())
    });

    let compact_layer = (!is_dev).then(|| {
        fmt::layer()
            .compact()
            .with_ansi(false)
            .with_filter(console_filter())
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(pretty_layer)
        .with(compact_layer)
        .init();

    guard
}
