use log::LevelFilter;
use std::path::Path;
use thiserror::Error;

/// Send log messages to the file at `path`, appending to it if it already
/// exists.  The terminal belongs to the game, so nothing is ever logged to
/// stderr.
///
/// Messages at `INFO` level and above are logged unless overridden with the
/// `RUST_LOG` environment variable.
pub(crate) fn init(path: &Path) -> Result<(), LoggingError> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

#[derive(Debug, Error)]
pub(crate) enum LoggingError {
    #[error("failed to open log file")]
    Open(#[from] std::io::Error),
    #[error("failed to install logger")]
    Install(#[from] log::SetLoggerError),
}
