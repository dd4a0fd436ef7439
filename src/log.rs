use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILE: &str = "middleware.log";

/// Always on, whatever `RUST_LOG` says: the marker and the raw input line
/// must reach the log file.
const OWN_DIRECTIVE: &str = "modify_status=debug";

/// Opens `path` for appending, creating it if needed.
pub fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("{}: Failed to open log file.", path.display()))
}

/// Filter from `RUST_LOG` (default `debug`), with this crate pinned at debug.
pub fn env_filter() -> Result<EnvFilter> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    Ok(filter.add_directive(OWN_DIRECTIVE.parse::<Directive>()?))
}

/// Builds a debug-level subscriber writing plain lines to `path`. It is not
/// installed globally; callers scope it with `tracing::subscriber::with_default`.
pub fn file_subscriber(path: &Path) -> Result<impl Subscriber + Send + Sync> {
    let filter = env_filter()?;
    let file = open_append(path)?;
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .with_env_filter(filter)
        .finish();
    Ok(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;
    use tracing::debug;

    #[test]
    fn test_file_subscriber_appends() -> Result<()> {
        let file = NamedTempFile::new()?;
        let path = file.path();
        fs::write(path, "existing\n")?;

        let subscriber = file_subscriber(path)?;
        tracing::subscriber::with_default(subscriber, || {
            debug!("first message");
        });

        let contents = fs::read_to_string(path)?;
        assert!(contents.starts_with("existing\n"));
        assert!(contents.contains("DEBUG"));
        assert!(contents.contains("first message"));
        Ok(())
    }

    #[test]
    fn test_open_append_creates_missing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(DEFAULT_LOG_FILE);
        open_append(&path)?;
        assert!(path.exists());
        Ok(())
    }
}
