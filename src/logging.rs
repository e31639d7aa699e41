//! File logging. The terminal belongs to the UI, so traces go to a file.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::subscriber::DefaultGuard;
use tracing_appender::non_blocking::WorkerGuard;

/// Keeps the log sink installed; dropping it flushes and uninstalls it
pub struct LogHandle {
    _default: DefaultGuard,
    _worker: WorkerGuard,
}

pub fn init(path: &Path) -> Result<LogHandle> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file = path
        .file_name()
        .with_context(|| format!("Log path {} has no file name", path.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file);
    let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .finish();

    Ok(LogHandle {
        _default: tracing::subscriber::set_default(subscriber),
        _worker: worker,
    })
}
