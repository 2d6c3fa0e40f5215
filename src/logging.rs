//! File logging.
//!
//! The screens own the terminal while they run, so nothing is ever logged to
//! stdout or stderr. Events go to a daily-rolling file in the platform data
//! directory (or the temp directory when that cannot be created), filtered by
//! `RUST_LOG` with `caniuse_tui=info` as the default.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "caniuse_tui=info";
const LOG_FILE_PREFIX: &str = "caniuse-tui.log";

/// Keeps the background writer alive; dropping it flushes pending lines.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = directories::ProjectDirs::from("", "", "caniuse-tui")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .ok_or_else(|| std::io::Error::other("no home directory"))?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Install the global subscriber. Returns `None` when no log directory could
/// be created or a subscriber is already installed.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = ensure_log_dir()
        .or_else(|_| -> std::io::Result<PathBuf> {
            let dir = std::env::temp_dir().join("caniuse-tui").join("logs");
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        })
        .ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(panic = %panic_info, "panic");
        original_hook(panic_info);
    }));

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}
