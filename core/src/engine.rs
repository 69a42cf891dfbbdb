//! Comic book view-model: the engine a platform view binds to.
//!
//! The engine owns the navigation state for one open document, shares the page store with the
//! renderer, and translates viewport-local taps into navigation. Rendering and decoding happen
//! outside: observers are told which property changed and re-query
//! [`ComicBookEngine::current_page`].

use std::sync::Arc;
use std::sync::atomic::Ordering;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::nav::{self, CommandPrompt, NavigationState, Navigator, PromptCommand};
use crate::notify::{ObserverId, Property, PropertyChange};
use crate::store::{Page, PageStore, PageStoreError};
use crate::teardown::{Subscription, Teardown};
use crate::types::{ContentMode, Direction, Intent, Point, Rect, Size};

use super::Result;

/// Value passed through the teardown signal on a normal exit.
pub const EXIT_NORMAL: u32 = 0;

/// Supplies the current viewport size, typically a closure over the platform view.
pub trait ViewportSource {
    fn viewport(&self) -> Size;
}

impl<F> ViewportSource for F
where
    F: Fn() -> Size,
{
    fn viewport(&self) -> Size {
        self()
    }
}

/// Everything the engine needs that it does not resolve itself.
#[derive(Debug, Clone)]
pub struct Dependency {
    pub pages: Arc<PageStore>,
    pub config: EngineConfig,
}

impl Dependency {
    pub fn new(pages: PageStore, config: EngineConfig) -> Self {
        Self { pages: Arc::new(pages), config }
    }
}

pub struct ComicBookEngine {
    pages: Arc<PageStore>,
    navigator: Navigator,
    config: EngineConfig,
    viewport: Box<dyn ViewportSource>,
    teardown: Teardown,
    _teardown_subscription: Subscription,
}

impl std::fmt::Debug for ComicBookEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComicBookEngine")
            .field("document", self.pages.document())
            .field("state", &self.navigator.state())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ComicBookEngine {
    /// Build an engine for `dependency.pages`, subscribed to `teardown`.
    ///
    /// When teardown fires the page store is released and the engine turns inert. Fails only
    /// when the configuration is invalid.
    pub fn new<V>(dependency: Dependency, viewport: V, teardown: &Teardown) -> Result<Self>
    where
        V: ViewportSource + 'static,
    {
        let Dependency { pages, config } = dependency;
        config.validate()?;

        let navigator = Navigator::with_mode(pages.count(), config.initial_mode);
        let disposed = navigator.disposal_flag();
        let store = Arc::clone(&pages);
        let subscription = teardown.subscribe(move |value| {
            debug!(value, document = store.document().as_str(), "releasing document");
            disposed.store(true, Ordering::Release);
            store.release();
        });

        debug!(
            document = pages.document().as_str(),
            pages = pages.count(),
            mode = config.initial_mode.as_str(),
            "comic book engine ready"
        );

        Ok(Self {
            pages,
            navigator,
            config,
            viewport: Box::new(viewport),
            teardown: teardown.clone(),
            _teardown_subscription: subscription,
        })
    }

    pub fn pages(&self) -> &Arc<PageStore> {
        &self.pages
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> NavigationState {
        self.navigator.state()
    }

    pub fn current_index(&self) -> usize {
        self.navigator.current_index()
    }

    pub fn page_count(&self) -> usize {
        self.navigator.page_count()
    }

    pub fn content_mode(&self) -> ContentMode {
        self.navigator.content_mode()
    }

    pub fn is_command_prompt_visible(&self) -> bool {
        self.navigator.is_command_prompt_visible()
    }

    pub fn command_prompt(&self) -> &CommandPrompt {
        self.navigator.prompt()
    }

    pub fn is_disposed(&self) -> bool {
        self.navigator.is_disposed()
    }

    /// Bytes of the page the renderer should currently show.
    pub fn current_page(&self) -> std::result::Result<Page, PageStoreError> {
        self.pages.get(self.navigator.current_index())
    }

    pub fn viewport(&self) -> Size {
        self.viewport.viewport()
    }

    /// Where the current page lands in the viewport under the configured fit mode.
    ///
    /// `None` until the viewport is measured or when the page carries no size hint.
    pub fn current_page_rect(&self) -> Option<Rect> {
        let dimensions = self.current_page().ok()?.dimensions?;
        nav::fit_page(dimensions, self.viewport(), self.config.fit)
    }

    pub fn subscribe<F>(&mut self, property: Property, callback: F) -> ObserverId
    where
        F: FnMut(&PropertyChange) + 'static,
    {
        self.navigator.subscribe(property, callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.navigator.unsubscribe(id)
    }

    /// Jump to a page as requested by the view. Out-of-range requests, negative ones included,
    /// are clamped into the document.
    pub fn set_comic_file_index(&mut self, index: isize) -> bool {
        if !self.live() {
            return false;
        }
        self.navigator.set_current_index(usize::try_from(index).unwrap_or(0))
    }

    pub fn advance(&mut self, direction: Direction) -> bool {
        self.live() && self.navigator.advance(direction)
    }

    pub fn set_content_mode(&mut self, mode: ContentMode) -> bool {
        self.live() && self.navigator.set_content_mode(mode)
    }

    pub fn toggle_command_prompt(&mut self) -> bool {
        self.live() && self.navigator.toggle_command_prompt()
    }

    pub fn show_command_prompt(&mut self) -> bool {
        self.live() && self.navigator.set_command_prompt_visible(true)
    }

    pub fn hide_command_prompt(&mut self) -> bool {
        self.live() && self.navigator.set_command_prompt_visible(false)
    }

    pub fn set_command_text(&mut self, text: impl Into<String>) -> bool {
        if !self.live() {
            return false;
        }
        self.navigator.prompt_mut().is_some_and(|prompt| prompt.set_text(text))
    }

    /// Handle a tap in viewport-local coordinates and return the intent that was applied.
    ///
    /// Zones are derived from the viewport size at the moment of the tap, so resizes need no
    /// bookkeeping here.
    pub fn on_screen_tapped(&mut self, point: Point) -> Intent {
        if !self.live() {
            return Intent::None;
        }

        let viewport = self.viewport();
        let resolved = nav::resolve(point, viewport, &self.config.tap_zones);
        let intent = match resolved {
            Intent::Previous | Intent::Next if !self.content_mode().behavior().paged => {
                Intent::ToggleOverlay
            }
            other => other,
        };

        debug!(x = point.x, y = point.y, ?intent, "screen tapped");
        self.dispatch(intent);
        intent
    }

    /// Apply an intent. Returns true when observable state changed.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Previous => self.advance(Direction::Previous),
            Intent::Next => self.advance(Direction::Next),
            Intent::ToggleOverlay => self.toggle_command_prompt(),
            Intent::None => false,
        }
    }

    /// Parse the prompt text, clear it, and execute the command.
    pub fn submit_command(&mut self) -> Option<PromptCommand> {
        if !self.live() {
            return None;
        }
        let command = self.navigator.prompt_mut()?.submit()?;

        match &command {
            PromptCommand::Goto(page) => {
                self.navigator.set_current_index(page.saturating_sub(1));
            }
            PromptCommand::First => {
                self.navigator.go_first();
            }
            PromptCommand::Last => {
                self.navigator.go_last();
            }
            PromptCommand::Mode(mode) => {
                self.navigator.set_content_mode(*mode);
            }
            PromptCommand::Quit => {
                self.quit();
                return Some(command);
            }
            PromptCommand::Unknown(text) => {
                warn!(command = %text, "unrecognised prompt command");
                return Some(command);
            }
        }

        self.navigator.set_command_prompt_visible(false);
        Some(command)
    }

    /// Initiate shutdown from inside the engine. Repeated calls are harmless.
    pub fn quit(&mut self) {
        self.teardown.fire(EXIT_NORMAL);
        self.live();
    }

    /// Detach observers once teardown has been observed. Returns whether the engine is usable.
    fn live(&mut self) -> bool {
        if self.navigator.is_disposed() {
            self.navigator.dispose();
            return false;
        }
        true
    }
}
