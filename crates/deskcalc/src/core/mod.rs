//! Calculator core: the input state machine and the arithmetic behind it
//!
//! Nothing in here knows about terminals, keyboards or windows. Front ends
//! translate their events into [`InputEvent`]s and read the display back.

pub mod engine;
pub mod format;
mod operations;

pub use engine::{
    CalculatorEngine, DisplaySink, EngineSnapshot, InputEvent, NoopSink, Phase,
    DEFAULT_ERROR_TOKEN,
};
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// Division by zero is the only failure the engine knows. It never leaves the
/// engine: [`CalculatorEngine`] turns it into the error token on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by exactly zero attempted
    #[error("Division by zero")]
    DivisionByZero,
}
