//! Fire-once shutdown broadcast.
//!
//! A single [`Teardown`] is constructed by the hosting shell and cloned into every component
//! that holds releasable resources. Either side may fire it: the window closing, an explicit
//! quit, or the engine itself. Only the first `fire` is delivered; later calls are silent no-ops
//! because racing shutdown triggers are expected.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

type Handler = Box<dyn FnOnce(u32) + Send>;

#[derive(Default)]
struct Inner {
    state: Mutex<State>,
}

enum State {
    Armed { handlers: Vec<(u64, Handler)>, next_id: u64 },
    Fired(u32),
}

impl Default for State {
    fn default() -> Self {
        State::Armed { handlers: Vec::new(), next_id: 0 }
    }
}

/// Cloneable handle to a shared fire-once signal.
#[derive(Clone, Default)]
pub struct Teardown {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        let mut out = f.debug_struct("Teardown");
        match &*state {
            State::Armed { handlers, .. } => out.field("pending", &handlers.len()),
            State::Fired(value) => out.field("fired", value),
        };
        out.finish()
    }
}

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler that receives at most one delivery.
    ///
    /// If the signal has already fired the handler runs immediately with the recorded value, so
    /// components constructed during shutdown still release what they hold.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnOnce(u32) + Send + 'static,
    {
        let fired = {
            let mut state = self.inner.state.lock();
            match &mut *state {
                State::Armed { handlers, next_id } => {
                    *next_id += 1;
                    let id = *next_id;
                    handlers.push((id, Box::new(handler)));
                    return Subscription { inner: Arc::downgrade(&self.inner), id: Some(id) };
                }
                State::Fired(value) => *value,
            }
        };

        handler(fired);
        Subscription { inner: Arc::downgrade(&self.inner), id: None }
    }

    /// Deliver `value` to every registered handler, then become inert.
    ///
    /// Returns the number of handlers invoked by this call; zero for every call after the first.
    pub fn fire(&self, value: u32) -> usize {
        let handlers = {
            let mut state = self.inner.state.lock();
            match std::mem::replace(&mut *state, State::Fired(value)) {
                State::Armed { handlers, .. } => handlers,
                State::Fired(previous) => {
                    *state = State::Fired(previous);
                    debug!(value, "teardown already fired; ignoring");
                    return 0;
                }
            }
        };

        info!(value, subscribers = handlers.len(), "teardown fired");
        let delivered = handlers.len();
        for (_, handler) in handlers {
            handler(value);
        }
        delivered
    }

    pub fn is_fired(&self) -> bool {
        self.fired_value().is_some()
    }

    /// Value passed to the first `fire`, if any.
    pub fn fired_value(&self) -> Option<u32> {
        match &*self.inner.state.lock() {
            State::Fired(value) => Some(*value),
            State::Armed { .. } => None,
        }
    }

    pub fn pending(&self) -> usize {
        match &*self.inner.state.lock() {
            State::Armed { handlers, .. } => handlers.len(),
            State::Fired(_) => 0,
        }
    }
}

/// Registration returned by [`Teardown::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    inner: std::sync::Weak<Inner>,
    id: Option<u64>,
}

impl Subscription {
    /// Withdraw the handler before the signal fires. Returns true if it was still pending.
    ///
    /// Dropping the subscription has the same effect.
    pub fn cancel(mut self) -> bool {
        self.detach()
    }

    fn detach(&mut self) -> bool {
        let (Some(id), Some(inner)) = (self.id.take(), self.inner.upgrade()) else {
            return false;
        };
        // Dropped after the lock is released; handlers may own large resources.
        let removed = {
            let mut state = inner.state.lock();
            match &mut *state {
                State::Armed { handlers, .. } => handlers
                    .iter()
                    .position(|(handler_id, _)| *handler_id == id)
                    .map(|pos| handlers.remove(pos)),
                State::Fired(_) => None,
            }
        };
        removed.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}
