//! Reading-position state, tap handling, and overlay control.

pub mod layout;
pub mod prompt;
pub mod state;
pub mod zones;

pub use layout::fit_page;
pub use prompt::{CommandPrompt, PromptCommand};
pub use state::{NavigationState, Navigator};
pub use zones::{TapZones, ZoneLayout, resolve};
