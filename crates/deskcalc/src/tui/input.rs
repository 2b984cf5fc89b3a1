//! Keyboard input handling
//!
//! Turns crossterm key events into [`KeyAction`]s. Character keys go through
//! the shared [`KeyMap`]; the named keys follow the desktop calculator
//! convention (Enter evaluates, Esc clears, Backspace deletes).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::InputEvent;
use crate::keymap::KeyMap;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward an input to the engine
    Input(InputEvent),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler {
    keymap: KeyMap,
}

impl InputHandler {
    /// Creates a new input handler with the stock key map
    #[must_use]
    pub fn new() -> Self {
        Self::with_keymap(KeyMap::new())
    }

    /// Creates an input handler with a specific key map
    #[must_use]
    pub fn with_keymap(keymap: KeyMap) -> Self {
        Self { keymap }
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        // Handle Ctrl+key combinations
        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char('q' | 'Q') => KeyAction::Quit,
            KeyCode::Char(c) => self
                .keymap
                .event_for_char(c)
                .map_or(KeyAction::None, KeyAction::Input),
            KeyCode::Enter => KeyAction::Input(InputEvent::Equals),
            KeyCode::Esc => KeyAction::Input(InputEvent::Clear),
            KeyCode::Backspace => KeyAction::Input(InputEvent::Backspace),
            _ => KeyAction::None,
        }
    }
}
