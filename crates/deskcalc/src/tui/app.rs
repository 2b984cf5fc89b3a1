//! TUI Application State
//!
//! Owns the engine, the keypad and the quit flag. The engine's display sink
//! is a `String`: that string is the screen text the renderer draws.

use ratatui::layout::Rect;

use crate::config::CalcConfig;
use crate::core::{CalculatorEngine, InputEvent};
use crate::keymap::KeyMap;

use super::input::{InputHandler, KeyAction};
use super::keypad::Keypad;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    /// The calculator state machine
    engine: CalculatorEngine<String>,
    /// Button grid, with the last pressed button highlighted
    keypad: Keypad,
    /// Keyboard mapping
    input: InputHandler,
    /// Last input forwarded to the engine
    last_input: Option<InputEvent>,
    /// Whether the app should quit
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&CalcConfig::default())
    }

    /// Creates a calculator app from configuration
    #[must_use]
    pub fn from_config(config: &CalcConfig) -> Self {
        Self {
            engine: CalculatorEngine::with_sink(String::new())
                .with_error_token(config.error_token.clone()),
            keypad: Keypad::new(),
            input: InputHandler::with_keymap(KeyMap::from_config(config)),
            last_input: None,
            should_quit: false,
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine<String> {
        &self.engine
    }

    /// Text on the calculator screen, as last pushed by the engine
    #[must_use]
    pub fn screen_text(&self) -> &str {
        self.engine.sink()
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the keyboard handler
    #[must_use]
    pub fn input_handler(&self) -> &InputHandler {
        &self.input
    }

    /// Last input forwarded to the engine
    #[must_use]
    pub fn last_input(&self) -> Option<InputEvent> {
        self.last_input
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Forwards an input to the engine and highlights its button
    pub fn press(&mut self, event: InputEvent) {
        self.keypad.highlight(event);
        self.engine.handle_input(event);
        self.last_input = Some(event);
    }

    /// Presses the keypad button at `index`
    pub fn press_button(&mut self, index: usize) {
        if let Some(event) = self.keypad.get_button(index).map(|b| b.action) {
            self.press(event);
        }
    }

    /// Handles a mouse click inside `keypad_area`
    ///
    /// Returns the input sent, if the click landed on a button.
    pub fn click(&mut self, keypad_area: Rect, x: u16, y: u16) -> Option<InputEvent> {
        let index = self.keypad.hit_test(keypad_area, x, y)?;
        self.press_button(index);
        self.last_input
    }

    /// Applies a keyboard action
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Input(event) => self.press(event),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// One-line summary of the pending computation
    ///
    /// `"12 +"` while an operator waits for its right operand, the error
    /// message after a division by zero, `"Ready"` otherwise.
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.engine.is_error() {
            return "Division by zero - cleared".to_string();
        }
        match self.engine.pending() {
            Some(op) => format!(
                "{} {}",
                crate::core::format::format_number(self.engine.accumulator()),
                op.symbol()
            ),
            None => "Ready".to_string(),
        }
    }
}
