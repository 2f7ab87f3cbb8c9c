use crate::utils::config::{LogFormat, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Initialisiere Logging Setup (stdout + optional rolling JSON file)
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the whole run.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let console = match config.format {
        LogFormat::Json => fmt::layer().with_writer(std::io::stdout).json().boxed(),
        LogFormat::Pretty => fmt::layer().with_writer(std::io::stdout).boxed(),
    };

    let (file, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "hotel-seeder.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().json().with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .with(env_filter)
        .init();

    tracing::info!("Logging initialized");

    guard
}
