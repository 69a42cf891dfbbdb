//! Headless application shell: bootstrap, document opening, and shutdown wiring.
//!
//! A platform front-end creates one [`Application`], forwards window lifecycle events to it, and
//! binds its views to the engines returned by [`Application::open`]. Closing the window and the
//! explicit quit command both end in the same teardown signal.

use std::path::Path;

use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::engine::{ComicBookEngine, Dependency, EXIT_NORMAL, ViewportSource};
use crate::fs;
use crate::log::{self, LogConfig};
use crate::teardown::{Subscription, Teardown};

use super::Result;

#[derive(Debug)]
pub struct Application {
    config: EngineConfig,
    teardown: Teardown,
    _shutdown_log: Subscription,
}

impl Application {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let teardown = Teardown::new();
        let shutdown_log = teardown.subscribe(|value| info!(value, "application shutting down"));
        Ok(Self { config, teardown, _shutdown_log: shutdown_log })
    }

    /// Start logging, then bootstrap with `config`.
    ///
    /// A logging failure is reported but does not stop the application.
    pub fn with_logging(config: EngineConfig, logging: LogConfig) -> Result<Self> {
        if let Err(err) = log::init(logging) {
            warn!("logging unavailable: {err:#}");
        }
        Self::new(config)
    }

    /// Bootstrap with the configuration found in the per-user config directory.
    pub fn from_default_config() -> Result<Self> {
        Self::with_logging(EngineConfig::load_default()?, LogConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared teardown signal, for platform resource holders that must also release on exit.
    pub fn teardown(&self) -> &Teardown {
        &self.teardown
    }

    /// Open the document at `path` and build an engine bound to `viewport`.
    ///
    /// The engine starts in the content mode matching the document kind.
    pub fn open<V>(&self, path: &Path, viewport: V) -> Result<ComicBookEngine>
    where
        V: ViewportSource + 'static,
    {
        let opened = fs::open_document(path)?;
        info!(path = %path.display(), pages = opened.pages.count(), "opened document");

        let config = EngineConfig { initial_mode: opened.mode, ..self.config };
        ComicBookEngine::new(Dependency::new(opened.pages, config), viewport, &self.teardown)
    }

    /// The platform window stopped; release everything.
    pub fn window_stopped(&self) {
        self.teardown.fire(EXIT_NORMAL);
    }

    /// Explicit quit from the shell's menu. Safe to call after the window already stopped.
    pub fn quit(&self) {
        self.teardown.fire(EXIT_NORMAL);
    }

    pub fn is_running(&self) -> bool {
        !self.teardown.is_fired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentMode, Direction, Size};
    use tempfile::tempdir;

    #[test]
    fn bootstrap_installs_logging() {
        let dir = tempdir().unwrap();
        let logging = LogConfig::default().with_directory(dir.path().join("logs"));

        let app = Application::with_logging(EngineConfig::default(), logging).unwrap();
        assert!(app.is_running());
        assert!(log::handle().is_some());
    }

    #[test]
    fn window_stop_then_quit_is_harmless() {
        let app = Application::new(EngineConfig::default()).unwrap();
        assert!(app.is_running());
        app.window_stopped();
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn opened_engines_are_released_on_quit() {
        let dir = tempdir().unwrap();
        for name in ["1.png", "2.png", "3.png"] {
            std::fs::write(dir.path().join(name), name).unwrap();
        }

        let app = Application::new(EngineConfig::default()).unwrap();
        let mut engine = app.open(dir.path(), || Size::new(300.0, 300.0)).expect("open");
        assert_eq!(engine.content_mode(), ContentMode::ComicBook);
        assert!(engine.advance(Direction::Next));

        app.quit();
        assert!(engine.is_disposed());
        assert_eq!(engine.pages().count(), 0);
        assert!(!engine.advance(Direction::Next));
    }

    #[test]
    fn single_image_opens_in_image_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cover.jpg");
        std::fs::write(&path, b"jpeg").unwrap();

        let app = Application::new(EngineConfig::default()).unwrap();
        let engine = app.open(&path, Size::default).unwrap();
        assert_eq!(engine.content_mode(), ContentMode::SingleImage);
        assert_eq!(engine.page_count(), 1);
    }
}
