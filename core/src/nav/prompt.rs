//! Command prompt overlay state.

use crate::notify::{Notifier, ObserverId, Property, PropertyChange, PropertyValue};
use crate::types::ContentMode;

/// Command parsed from submitted prompt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    /// 1-based page number as typed by the reader.
    Goto(usize),
    First,
    Last,
    Mode(ContentMode),
    Quit,
    Unknown(String),
}

impl PromptCommand {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut parts = input.split_whitespace();
        let head = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next();

        let command = match (head.as_str(), arg) {
            ("first", None) => PromptCommand::First,
            ("last", None) => PromptCommand::Last,
            ("quit" | "q" | "exit", None) => PromptCommand::Quit,
            ("goto" | "g" | "page", Some(number)) => match number.parse::<usize>() {
                Ok(page) => PromptCommand::Goto(page),
                Err(_) => PromptCommand::Unknown(input.to_string()),
            },
            ("mode", Some(tag)) => match ContentMode::from_tag(tag) {
                Some(mode) => PromptCommand::Mode(mode),
                None => PromptCommand::Unknown(input.to_string()),
            },
            (number, None) if number.chars().all(|c| c.is_ascii_digit()) => number
                .parse()
                .map_or_else(|_| PromptCommand::Unknown(input.to_string()), PromptCommand::Goto),
            _ => PromptCommand::Unknown(input.to_string()),
        };
        Some(command)
    }
}

/// Overlay visibility plus the text being typed into it.
#[derive(Debug, Default)]
pub struct CommandPrompt {
    visible: bool,
    text: String,
    notifier: Notifier,
}

impl CommandPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn subscribe<F>(&mut self, property: Property, callback: F) -> ObserverId
    where
        F: FnMut(&PropertyChange) + 'static,
    {
        self.notifier.subscribe(property, callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn show(&mut self) -> bool {
        self.set_visible(true)
    }

    pub fn hide(&mut self) -> bool {
        self.set_visible(false)
    }

    pub fn toggle(&mut self) -> bool {
        self.set_visible(!self.visible)
    }

    /// Returns true when the visibility actually changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        self.notifier.raise(PropertyChange::new(
            Property::IsCommandPromptVisible,
            PropertyValue::Flag(visible),
        ));
        true
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.text == text {
            return false;
        }
        self.text = text;
        self.notifier.raise(PropertyChange::new(
            Property::CommandPromptText,
            PropertyValue::Text(self.text.clone()),
        ));
        true
    }

    pub fn clear(&mut self) -> bool {
        self.set_text(String::new())
    }

    /// Parse the buffered text and empty the buffer. Blank input yields `None`.
    pub fn submit(&mut self) -> Option<PromptCommand> {
        let command = PromptCommand::parse(&self.text);
        self.clear();
        command
    }

    pub(crate) fn detach_observers(&mut self) {
        self.notifier.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(prompt: &mut CommandPrompt, property: Property) -> Rc<RefCell<Vec<PropertyValue>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        prompt.subscribe(property, move |change| sink.borrow_mut().push(change.value.clone()));
        seen
    }

    #[test]
    fn show_twice_notifies_once() {
        let mut prompt = CommandPrompt::new();
        let seen = recorded(&mut prompt, Property::IsCommandPromptVisible);

        assert!(prompt.show());
        assert!(!prompt.show());
        assert_eq!(*seen.borrow(), vec![PropertyValue::Flag(true)]);
    }

    #[test]
    fn hide_when_hidden_is_silent() {
        let mut prompt = CommandPrompt::new();
        let seen = recorded(&mut prompt, Property::IsCommandPromptVisible);

        assert!(!prompt.hide());
        prompt.show();
        prompt.hide();
        prompt.hide();
        assert_eq!(*seen.borrow(), vec![PropertyValue::Flag(true), PropertyValue::Flag(false)]);
    }

    #[test]
    fn toggle_flips_each_time() {
        let mut prompt = CommandPrompt::new();
        prompt.toggle();
        assert!(prompt.is_visible());
        prompt.toggle();
        assert!(!prompt.is_visible());
    }

    #[test]
    fn submit_parses_and_clears() {
        let mut prompt = CommandPrompt::new();
        let seen = recorded(&mut prompt, Property::CommandPromptText);

        prompt.set_text("goto 12");
        assert_eq!(prompt.submit(), Some(PromptCommand::Goto(12)));
        assert_eq!(prompt.text(), "");
        assert_eq!(
            *seen.borrow(),
            vec![PropertyValue::Text("goto 12".into()), PropertyValue::Text(String::new())]
        );
        assert_eq!(prompt.submit(), None);
    }

    #[test]
    fn parses_command_vocabulary() {
        assert_eq!(PromptCommand::parse("  7 "), Some(PromptCommand::Goto(7)));
        assert_eq!(PromptCommand::parse("FIRST"), Some(PromptCommand::First));
        assert_eq!(PromptCommand::parse("last"), Some(PromptCommand::Last));
        assert_eq!(PromptCommand::parse("q"), Some(PromptCommand::Quit));
        assert_eq!(
            PromptCommand::parse("mode image"),
            Some(PromptCommand::Mode(ContentMode::SingleImage))
        );
        assert_eq!(
            PromptCommand::parse("goto x"),
            Some(PromptCommand::Unknown("goto x".into()))
        );
        assert_eq!(PromptCommand::parse("   "), None);
    }
}
