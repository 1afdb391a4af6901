use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr, stdout is left to command output.
pub fn init_logger_with_filter(filter: impl Into<EnvFilter>) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_timer(LocalTime::rfc_3339())
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(anyhow::Error::msg)
}

pub fn init_logger(level: tracing::Level) -> anyhow::Result<()> {
    let filter = EnvFilter::default().add_directive(LevelFilter::from_level(level).into());
    init_logger_with_filter(filter)
}
