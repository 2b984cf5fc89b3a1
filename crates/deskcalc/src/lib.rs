//! deskcalc - a desktop-style four-function calculator
//!
//! The heart of the crate is [`core::CalculatorEngine`], the input state
//! machine behind a pocket calculator: digit accumulation, a pending
//! operator, left-to-right chaining, clear, sign flip, percent, backspace,
//! and a non-fatal division-by-zero reset. Everything else is plumbing
//! around it.
//!
//! - [`keymap`]: typed characters to [`core::InputEvent`]s
//! - [`driver`]: one trait for driving any front end, plus shared checks
//! - [`tui`] (feature `tui`): the terminal window with a clickable keypad
//! - [`config`], [`logging`], [`error`]: the ambient stack
//!
//! # Example
//!
//! ```rust
//! use deskcalc::prelude::*;
//!
//! let mut engine = CalculatorEngine::with_sink(Vec::<String>::new());
//! for event in KeyMap::new().parse_replay("5 / 0 =").unwrap() {
//!     engine.handle_input(event);
//! }
//! assert!(engine.is_error());
//! assert_eq!(engine.sink().last().map(String::as_str), Some("Error"));
//!
//! // The next digit starts over as if cleared.
//! engine.handle_input(InputEvent::Digit(7));
//! assert_eq!(engine.display(), "7");
//! ```

// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod keymap;
pub mod logging;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalcConfig, LogLevel};
    pub use crate::core::{
        CalcError, CalcResult, CalculatorEngine, DisplaySink, EngineSnapshot, InputEvent,
        NoopSink, Operation, Phase,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver};
    pub use crate::error::{AppError, AppResult};
    pub use crate::keymap::KeyMap;

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
