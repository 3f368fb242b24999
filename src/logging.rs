// Tracing setup.
// Routes structured logs to a file because the terminal belongs to the TUI.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Settings;
use crate::error::{DashError, Result};

const LOG_FILE: &str = "kpidash.log";

/// Open the log file appender, creating the directory first.
fn open_appender(dir: &Path) -> std::result::Result<RollingFileAppender, String> {
    fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
        .map_err(|e| e.to_string())
}

/// Initialize the global subscriber.
///
/// Filter precedence: `KPIDASH_LOG`, then `RUST_LOG`, then the configured
/// `log_filter`. Returns `None` when there is no usable log directory, in
/// which case logging stays disabled and the reason goes to stderr. Only a
/// failed subscriber install is an error. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init_tracing(settings: &Settings) -> Result<Option<WorkerGuard>> {
    let Some(dir) = crate::prefs::log_dir(settings.data_dir.as_deref()) else {
        return Ok(None);
    };
    let appender = match open_appender(&dir) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!(
                "kpidash: file logging disabled, cannot open {}: {e}",
                dir.display()
            );
            return Ok(None);
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let directive = std::env::var("KPIDASH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| settings.log_filter.clone());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| DashError::Other(format!("failed to install tracing subscriber: {e}")))?;

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unusable_log_dir_disables_logging() {
        let settings = Settings {
            data_dir: Some("/proc/kpidash_missing".into()),
            ..Settings::default()
        };

        let guard = init_tracing(&settings).unwrap();
        assert!(guard.is_none());
    }

    #[test]
    fn test_log_dir_blocked_by_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();

        let settings = Settings {
            data_dir: Some(blocker),
            ..Settings::default()
        };
        assert!(init_tracing(&settings).unwrap().is_none());
    }

    #[test]
    fn test_open_appender_creates_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("logs");

        assert!(open_appender(&dir).is_ok());
        assert!(dir.is_dir());
    }
}
