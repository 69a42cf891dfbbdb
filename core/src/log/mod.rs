//! Logging bootstrap for the viewer.
//!
//! Installs a `tracing` subscriber with two sinks: a rolling, non-blocking log file under the
//! per-user data directory and a console layer on stderr. Records emitted through the `log`
//! crate are bridged in. [`init`] is meant to be called once by the hosting shell; later calls
//! return the handle installed by the first one.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder as RollingBuilder, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, util::SubscriberInitExt};

/// Environment variables consulted for a filter directive, in order.
const FILTER_ENV_VARS: [&str; 2] = ["COMIC_ENGINE_LOG", "RUST_LOG"];

static LOG_HANDLE: OnceLock<LogHandle> = OnceLock::new();
static INIT_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());

pub use tracing_subscriber::filter::LevelFilter as LogLevel;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LogRolling {
    Hourly,
    Daily,
    Never,
}

impl From<LogRolling> for Rotation {
    fn from(rolling: LogRolling) -> Self {
        match rolling {
            LogRolling::Hourly => Rotation::HOURLY,
            LogRolling::Daily => Rotation::DAILY,
            LogRolling::Never => Rotation::NEVER,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Directory holding the rolled files.
    pub directory: PathBuf,
    /// File name prefix; files end in `.log`.
    pub file_prefix: String,
    /// Number of rolled files kept on startup. `None` keeps everything.
    pub retention: Option<usize>,
    pub file_level: LevelFilter,
    pub console_level: LevelFilter,
    /// Bridge `log` crate records into `tracing`.
    pub capture_log: bool,
    /// Filter directive such as `comic_engine=trace`; falls back to the environment.
    pub env_filter: Option<String>,
    pub rolling: LogRolling,
}

impl Default for LogConfig {
    fn default() -> Self {
        let console_level =
            if cfg!(debug_assertions) { LevelFilter::INFO } else { LevelFilter::WARN };

        Self {
            directory: default_log_directory(),
            file_prefix: "comic-engine".to_string(),
            retention: Some(14),
            file_level: LevelFilter::DEBUG,
            console_level,
            capture_log: true,
            env_filter: None,
            rolling: LogRolling::Daily,
        }
    }
}

impl LogConfig {
    pub fn with_directory<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.directory = path.into();
        self
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Explicit directive, else the first non-empty environment variable, else a build default.
    fn directive(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| FILTER_ENV_VARS.iter().find_map(|var| std::env::var(var).ok()))
            .filter(|directive| !directive.trim().is_empty())
            .unwrap_or_else(|| if cfg!(debug_assertions) { "debug" } else { "info" }.to_string())
    }
}

/// Keeps the background file writer alive for the lifetime of the process.
#[derive(Debug)]
pub struct LogHandle {
    _guard: WorkerGuard,
    directory: PathBuf,
    file_prefix: String,
}

impl LogHandle {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }
}

/// Install the global subscriber. The first successful call wins.
pub fn init(config: LogConfig) -> Result<&'static LogHandle> {
    let _guard = INIT_LOCK.lock();
    if let Some(handle) = LOG_HANDLE.get() {
        return Ok(handle);
    }

    let handle = install(config)?;
    let _ = LOG_HANDLE.set(handle);
    LOG_HANDLE.get().ok_or_else(|| anyhow!("log handle missing after initialisation"))
}

/// Handle installed by [`init`], if logging is up.
pub fn handle() -> Option<&'static LogHandle> {
    LOG_HANDLE.get()
}

fn install(config: LogConfig) -> Result<LogHandle> {
    if config.capture_log {
        bridge_log_records(config.file_level.max(config.console_level));
    }

    fs::create_dir_all(&config.directory)
        .with_context(|| format!("creating log directory at {}", config.directory.display()))?;

    if let Some(keep) = config.retention.filter(|keep| *keep > 0) {
        prune_old_logs(&config.directory, &config.file_prefix, keep)
            .context("applying log retention policy")?;
    }

    let appender = RollingBuilder::new()
        .rotation(config.rolling.into())
        .filename_prefix(&config.file_prefix)
        .filename_suffix("log")
        .build(&config.directory)
        .context("creating rolling log appender")?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter =
        EnvFilter::try_new(config.directive()).context("parsing log filter directive")?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(file_writer)
        .with_file(true)
        .with_line_number(true)
        .with_filter(config.file_level);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(config.console_level);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    Ok(LogHandle { _guard: guard, directory: config.directory, file_prefix: config.file_prefix })
}

fn bridge_log_records(max_level: LevelFilter) {
    let level = match max_level {
        LevelFilter::OFF => log::LevelFilter::Off,
        LevelFilter::ERROR => log::LevelFilter::Error,
        LevelFilter::WARN => log::LevelFilter::Warn,
        LevelFilter::INFO => log::LevelFilter::Info,
        LevelFilter::DEBUG => log::LevelFilter::Debug,
        LevelFilter::TRACE => log::LevelFilter::Trace,
    };
    // Another logger may already be installed by the host; that is not fatal.
    let _ = tracing_log::LogTracer::builder().with_max_level(level).init();
}

/// Delete the oldest files matching `prefix` so at most `keep` remain.
fn prune_old_logs(dir: &Path, prefix: &str, keep: usize) -> Result<()> {
    let mut logs: Vec<(PathBuf, SystemTime)> = fs::read_dir(dir)
        .with_context(|| format!("reading log directory at {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let meta = entry.metadata().ok()?;
            let path = entry.path();
            (meta.is_file() && has_prefix(&path, prefix))
                .then(|| (path, meta.modified().unwrap_or(SystemTime::UNIX_EPOCH)))
        })
        .collect();

    if logs.len() <= keep {
        return Ok(());
    }

    logs.sort_by_key(|(_, modified)| *modified);
    let excess = logs.len() - keep;
    for (path, _) in logs.into_iter().take(excess) {
        if let Err(err) = fs::remove_file(&path) {
            tracing::warn!(path = %path.display(), "failed to prune log file: {err}");
        }
    }
    Ok(())
}

/// Rolled files are named `{prefix}.log` or `{prefix}.{date}.log`.
fn has_prefix(path: &Path, prefix: &str) -> bool {
    path.file_stem().and_then(OsStr::to_str).is_some_and(|stem| {
        stem.strip_prefix(prefix).is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
    })
}

fn default_log_directory() -> PathBuf {
    directories::ProjectDirs::from("com", "MediaViewer", "comic-engine")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("comic-engine-logs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn init_is_idempotent() {
        let temp = tempfile::tempdir().expect("temp dir");
        let config =
            LogConfig::default().with_directory(temp.path().join("logs")).with_prefix("test-log");

        // Other tests in this binary may have installed logging already; whichever ran first wins.
        let first = init(config.clone()).expect("init once");
        let second = init(config.with_prefix("ignored")).expect("init twice");
        assert!(std::ptr::eq(first, second));
        assert_ne!(second.file_prefix(), "ignored");
        assert!(handle().is_some_and(|installed| std::ptr::eq(installed, first)));
    }

    #[test]
    fn prune_keeps_newest_matching_files() {
        let temp = tempfile::tempdir().expect("temp dir");
        for (i, name) in ["app.1.log", "app.2.log", "app.3.log"].iter().enumerate() {
            let path = temp.path().join(name);
            fs::write(&path, b"x").unwrap();
            let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000 + i as u64);
            fs::File::options().write(true).open(&path).unwrap().set_modified(modified).unwrap();
        }
        fs::write(temp.path().join("other.log"), b"x").unwrap();
        fs::write(temp.path().join("application.log"), b"x").unwrap();

        prune_old_logs(temp.path(), "app", 2).unwrap();

        assert!(!temp.path().join("app.1.log").exists());
        assert!(temp.path().join("app.2.log").exists());
        assert!(temp.path().join("app.3.log").exists());
        assert!(temp.path().join("other.log").exists());
        assert!(temp.path().join("application.log").exists());
    }

    #[test]
    fn prefix_matches_rolled_names_only() {
        assert!(has_prefix(Path::new("app.log"), "app"));
        assert!(has_prefix(Path::new("app.2025-01-31.log"), "app"));
        assert!(!has_prefix(Path::new("application.log"), "app"));
        assert!(!has_prefix(Path::new("app-old.log"), "app"));
    }

    #[test]
    fn explicit_directive_wins() {
        let config =
            LogConfig { env_filter: Some("comic_engine=trace".into()), ..Default::default() };
        assert_eq!(config.directive(), "comic_engine=trace");
    }
}
