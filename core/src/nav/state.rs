//! Navigation state machine: current page, content mode, and overlay visibility.
//!
//! Every mutation is clamped rather than rejected, and notifies observers only when the
//! observable state actually changed. Once the owning document has been torn down the machine
//! is inert and all mutations become silent no-ops, so late UI events during shutdown are safe.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use crate::notify::{Notifier, ObserverId, Property, PropertyChange, PropertyValue};
use crate::types::{ContentMode, Direction};

use super::prompt::CommandPrompt;

/// Snapshot of the observable navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current_index: usize,
    pub page_count: usize,
    pub content_mode: ContentMode,
    pub is_command_prompt_visible: bool,
}

#[derive(Debug)]
pub struct Navigator {
    current_index: usize,
    page_count: usize,
    content_mode: ContentMode,
    prompt: CommandPrompt,
    notifier: Notifier,
    disposed: Arc<AtomicBool>,
}

impl Navigator {
    pub fn new(page_count: usize) -> Self {
        Self::with_mode(page_count, ContentMode::default())
    }

    pub fn with_mode(page_count: usize, content_mode: ContentMode) -> Self {
        Self {
            current_index: 0,
            page_count,
            content_mode,
            prompt: CommandPrompt::new(),
            notifier: Notifier::new(),
            disposed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current_index: self.current_index,
            page_count: self.page_count,
            content_mode: self.content_mode,
            is_command_prompt_visible: self.prompt.is_visible(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn content_mode(&self) -> ContentMode {
        self.content_mode
    }

    pub fn is_command_prompt_visible(&self) -> bool {
        self.prompt.is_visible()
    }

    pub fn prompt(&self) -> &CommandPrompt {
        &self.prompt
    }

    /// Mutable access to the overlay; inert after disposal like every other mutation.
    pub fn prompt_mut(&mut self) -> Option<&mut CommandPrompt> {
        if self.is_disposed() { None } else { Some(&mut self.prompt) }
    }

    /// Register an observer; prompt properties are routed to the overlay's own notifier.
    pub fn subscribe<F>(&mut self, property: Property, callback: F) -> ObserverId
    where
        F: FnMut(&PropertyChange) + 'static,
    {
        match property {
            Property::IsCommandPromptVisible | Property::CommandPromptText => {
                self.prompt.subscribe(property, callback)
            }
            _ => self.notifier.subscribe(property, callback),
        }
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.notifier.unsubscribe(id) || self.prompt.unsubscribe(id)
    }

    /// Flag shared with teardown handlers; setting it makes the machine inert.
    pub fn disposal_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.disposed)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Mark the machine inert and drop its observers.
    pub fn dispose(&mut self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            debug!("navigator disposed");
        }
        self.notifier.clear();
        self.prompt.detach_observers();
    }

    /// Jump to `index`, clamped into the document. Returns true when the page changed.
    pub fn set_current_index(&mut self, index: usize) -> bool {
        if self.is_disposed() || self.page_count == 0 {
            return false;
        }

        let clamped = index.min(self.page_count - 1);
        if clamped == self.current_index {
            trace!(requested = index, current = self.current_index, "page unchanged");
            return false;
        }

        debug!(from = self.current_index, to = clamped, "page changed");
        self.current_index = clamped;
        self.notifier
            .raise(PropertyChange::new(Property::CurrentIndex, PropertyValue::Index(clamped)));
        true
    }

    /// Step one page; stops at the first and last page.
    pub fn advance(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Previous => self.current_index.saturating_sub(1),
            Direction::Next => self.current_index.saturating_add(1),
        };
        self.set_current_index(target)
    }

    pub fn go_first(&mut self) -> bool {
        self.set_current_index(0)
    }

    pub fn go_last(&mut self) -> bool {
        self.set_current_index(usize::MAX)
    }

    pub fn toggle_command_prompt(&mut self) -> bool {
        match self.prompt_mut() {
            Some(prompt) => prompt.toggle(),
            None => false,
        }
    }

    pub fn set_command_prompt_visible(&mut self, visible: bool) -> bool {
        match self.prompt_mut() {
            Some(prompt) => prompt.set_visible(visible),
            None => false,
        }
    }

    pub fn set_content_mode(&mut self, mode: ContentMode) -> bool {
        if self.is_disposed() || self.content_mode == mode {
            return false;
        }

        debug!(from = self.content_mode.as_str(), to = mode.as_str(), "content mode changed");
        self.content_mode = mode;
        self.notifier.raise(PropertyChange::new(Property::ContentMode, PropertyValue::Mode(mode)));
        true
    }

    /// Adopt a newly loaded document of `page_count` pages and return to its first page.
    pub fn reset(&mut self, page_count: usize) {
        if self.is_disposed() {
            return;
        }

        if self.page_count != page_count {
            self.page_count = page_count;
            self.notifier
                .raise(PropertyChange::new(Property::PageCount, PropertyValue::Index(page_count)));
        }
        if self.current_index != 0 {
            self.current_index = 0;
            self.notifier
                .raise(PropertyChange::new(Property::CurrentIndex, PropertyValue::Index(0)));
        }
    }
}
