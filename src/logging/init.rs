use color_eyre::eyre::{Result, WrapErr};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use super::LogConfig;

/// Targets that are chatty at `info` and only interesting when they fail.
const QUIET_TARGETS: [&str; 2] = ["sqlx=warn", "tower=warn"];

/// Filter used when `RUST_LOG` is unset: `collectify=<level>`, the quiet
/// targets, then any extra directives from the config (later ones win).
pub fn default_filter(config: &LogConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::default().add_directive(
        format!("collectify={}", config.log_level)
            .parse::<Directive>()
            .wrap_err("invalid log level")?,
    );
    for directive in QUIET_TARGETS
        .iter()
        .copied()
        .chain(config.directives.iter().map(String::as_str))
    {
        let parsed = directive
            .trim()
            .parse::<Directive>()
            .wrap_err_with(|| format!("invalid log filter directive `{directive}`"))?;
        filter = filter.add_directive(parsed);
    }
    Ok(filter)
}

fn env_filter(config: &LogConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => default_filter(config),
    }
}

/// Initialize the logging system with the given configuration.
///
/// Installs a stdout layer and a rolling file layer named
/// `config.file_name`, both filtered by `RUST_LOG` or [`default_filter`].
pub fn init_logging(config: LogConfig) -> Result<()> {
    std::fs::create_dir_all(&config.log_dir)?;
    let file_appender =
        RollingFileAppender::new(config.rotation.clone(), &config.log_dir, &config.file_name);
    if config.json_format {
        let json_file_layer = fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_filter(env_filter(&config)?);
        let json_stdout_layer = fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_filter(env_filter(&config)?);
        tracing_subscriber::registry()
            .with(json_file_layer)
            .with(json_stdout_layer)
            .with(ErrorLayer::default())
            .try_init()?;
    } else {
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_ansi(false)
            .with_filter(env_filter(&config)?);
        let stdout_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(true)
            .with_filter(env_filter(&config)?);
        tracing_subscriber::registry()
            .with(file_layer)
            .with(stdout_layer)
            .with(ErrorLayer::default())
            .try_init()?;
    }
    Ok(())
}

/// Parse rotation period from string.
pub fn parse_rotation(s: &str) -> Rotation {
    match s.to_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}
