//! Terminal front end
//!
//! The window of the desktop calculator, drawn with ratatui: display, status
//! line, clickable keypad, key help.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::{layout, render, CalculatorUI, UiLayout};
