//! Calculator input state machine
//!
//! The engine interprets button and key presses the way a pocket calculator
//! does: digits accumulate into the display, an operator captures the display
//! as the left operand, and equals applies the pending operator. Pressing a
//! second operator while one is pending evaluates the first (left-to-right,
//! no precedence).
//!
//! Two phases drive digit entry:
//!
//! ```text
//!                 digit / point
//!  AwaitingFirstDigit ──────────► Accumulating
//!          ▲                           │
//!          └───── operator / = / C ────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use deskcalc::core::{CalculatorEngine, InputEvent, Operation};
//!
//! let mut engine = CalculatorEngine::new();
//! engine.handle_input(InputEvent::Digit(2));
//! engine.handle_input(InputEvent::Operator(Operation::Add));
//! engine.handle_input(InputEvent::Digit(3));
//! engine.handle_input(InputEvent::Operator(Operation::Multiply));
//! engine.handle_input(InputEvent::Digit(4));
//! assert_eq!(engine.handle_input(InputEvent::Equals), "20");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::format::{format_number, has_decimal_point, is_plain_decimal, parse_display};
use super::{CalcError, Operation};

/// Display text shown after a division by zero unless configured otherwise
pub const DEFAULT_ERROR_TOKEN: &str = "Error";

const INITIAL_DISPLAY: &str = "0";

/// A discrete input forwarded by a front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Digit key, always within `0..=9`
    Digit(u8),
    /// Decimal point key
    DecimalPoint,
    /// Operator key
    Operator(Operation),
    /// Equals key
    Equals,
    /// Clear key
    Clear,
    /// Sign flip key
    Negate,
    /// Percent key
    Percent,
    /// Remove the last display character
    Backspace,
}

impl InputEvent {
    /// Builds a digit event, rejecting values above 9
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Builds a digit event from a character `'0'..='9'`
    #[must_use]
    pub fn from_digit_char(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::digit(d as u8))
    }

    /// Short label, as printed on the keypad
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::Negate => "±".to_string(),
            Self::Percent => "%".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }
}

/// Which way the next digit goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The next digit starts a fresh number
    AwaitingFirstDigit,
    /// Digits append to the visible number
    Accumulating,
}

/// Receives the display text every time the engine changes it
///
/// The front end owns the rendering surface; the engine only pushes text.
pub trait DisplaySink {
    /// Called with the new display text after each change
    fn refresh(&mut self, text: &str);
}

/// Sink that discards every update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopSink;

impl DisplaySink for NoopSink {
    fn refresh(&mut self, _text: &str) {}
}

/// Keeps only the latest text
impl DisplaySink for String {
    fn refresh(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Records every frame, oldest first
impl DisplaySink for Vec<String> {
    fn refresh(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Serializable copy of the engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Display text
    pub display: String,
    /// Left operand captured by the last operator
    pub accumulator: f64,
    /// Operator waiting for its right operand
    pub pending: Option<Operation>,
    /// Whether the next digit starts a fresh number
    pub awaiting_first_digit: bool,
}

/// The calculator state machine
#[derive(Debug, Clone)]
pub struct CalculatorEngine<S: DisplaySink = NoopSink> {
    display: String,
    accumulator: f64,
    pending: Option<Operation>,
    awaiting_first_digit: bool,
    error_token: String,
    sink: S,
}

impl Default for CalculatorEngine<NoopSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine<NoopSink> {
    /// Creates an engine in its initial state with no display sink
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(NoopSink)
    }
}

impl<S: DisplaySink> CalculatorEngine<S> {
    /// Creates an engine that pushes display changes into `sink`
    ///
    /// The sink receives the initial `"0"` immediately.
    pub fn with_sink(sink: S) -> Self {
        let mut engine = Self {
            display: INITIAL_DISPLAY.to_string(),
            accumulator: 0.0,
            pending: None,
            awaiting_first_digit: true,
            error_token: DEFAULT_ERROR_TOKEN.to_string(),
            sink,
        };
        engine.sink.refresh(&engine.display);
        engine
    }

    /// Replaces the text shown after a division by zero
    #[must_use]
    pub fn with_error_token(mut self, token: impl Into<String>) -> Self {
        self.error_token = token.into();
        self
    }

    // ===== Accessors =====

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Left operand captured by the last operator
    #[must_use]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Operator waiting for its right operand
    #[must_use]
    pub fn pending(&self) -> Option<Operation> {
        self.pending
    }

    /// Whether the next digit starts a fresh number
    #[must_use]
    pub fn is_awaiting_first_digit(&self) -> bool {
        self.awaiting_first_digit
    }

    /// Current phase of digit entry
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.awaiting_first_digit {
            Phase::AwaitingFirstDigit
        } else {
            Phase::Accumulating
        }
    }

    /// Whether the display holds the error token
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.display == self.error_token
    }

    /// Text shown after a division by zero
    #[must_use]
    pub fn error_token(&self) -> &str {
        &self.error_token
    }

    /// The display sink
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the display sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Copies the state fields out
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            display: self.display.clone(),
            accumulator: self.accumulator,
            pending: self.pending,
            awaiting_first_digit: self.awaiting_first_digit,
        }
    }

    // ===== Single entry point =====

    /// Dispatches one input event and returns the resulting display
    pub fn handle_input(&mut self, event: InputEvent) -> &str {
        debug!(?event, display = %self.display, "input");
        match event {
            InputEvent::Digit(d) => self.input_digit(d),
            InputEvent::DecimalPoint => self.input_decimal_point(),
            InputEvent::Operator(op) => self.select_operation(op),
            InputEvent::Equals => self.evaluate(),
            InputEvent::Clear => self.clear(),
            InputEvent::Negate => self.negate(),
            InputEvent::Percent => self.percent(),
            InputEvent::Backspace => self.backspace(),
        }
        &self.display
    }

    // ===== Operations =====

    /// Enters one digit
    ///
    /// Values above 9 are ignored; build events with [`InputEvent::digit`]
    /// to reject them earlier.
    pub fn input_digit(&mut self, d: u8) {
        let Some(c) = char::from_digit(u32::from(d), 10) else {
            return;
        };

        if self.starts_fresh_number() {
            self.awaiting_first_digit = false;
            self.set_display(c.to_string());
        } else if self.display == INITIAL_DISPLAY {
            self.set_display(c.to_string());
        } else {
            let mut text = self.display.clone();
            text.push(c);
            self.set_display(text);
        }
    }

    /// Enters a decimal point; a second point in the same number is ignored
    pub fn input_decimal_point(&mut self) {
        if self.starts_fresh_number() {
            self.awaiting_first_digit = false;
            self.set_display("0.".to_string());
        } else if !has_decimal_point(&self.display) {
            let mut text = self.display.clone();
            text.push('.');
            self.set_display(text);
        }
    }

    /// Selects the operator applied on the next equals
    ///
    /// A pending operator is evaluated first. If that evaluation divides by
    /// zero, the error token stays on the display and reads as `0`, so `op`
    /// starts a new calculation from zero.
    pub fn select_operation(&mut self, op: Operation) {
        if self.pending.is_some() {
            self.evaluate();
        }

        self.accumulator = self.display_value();
        self.pending = Some(op);
        self.awaiting_first_digit = true;
        debug!(accumulator = self.accumulator, op = %op, "operation pending");
    }

    /// Applies the pending operator (equals key)
    pub fn evaluate(&mut self) {
        // Division by zero is fully handled by `try_evaluate`.
        let _ = self.try_evaluate();
    }

    fn try_evaluate(&mut self) -> Result<(), CalcError> {
        let right = self.display_value();

        let result = match self.pending {
            Some(op) => match op.apply(self.accumulator, right) {
                Ok(value) => {
                    debug!(left = self.accumulator, op = %op, right, value, "evaluated");
                    value
                }
                Err(err) => {
                    warn!(left = self.accumulator, %err, "calculation reset");
                    self.reset_fields();
                    let token = self.error_token.clone();
                    self.set_display(token);
                    return Err(err);
                }
            },
            None => right,
        };

        self.set_display(format_number(result));
        self.pending = None;
        self.awaiting_first_digit = true;
        Ok(())
    }

    /// Resets every field to its initial value
    pub fn clear(&mut self) {
        self.reset_fields();
        self.set_display(INITIAL_DISPLAY.to_string());
    }

    /// Flips the sign of the displayed number
    pub fn negate(&mut self) {
        if let Some(value) = parse_display(&self.display) {
            self.set_display(format_number(-value));
        }
    }

    /// Divides the displayed number by 100
    pub fn percent(&mut self) {
        if let Some(value) = parse_display(&self.display) {
            self.set_display(format_number(value / 100.0));
        }
    }

    /// Removes the last display character
    ///
    /// Falls back to `"0"` when nothing numeric is left, e.g. a lone `"-"` or
    /// a truncated error token.
    pub fn backspace(&mut self) {
        let mut text = self.display.clone();
        if self.is_error() {
            text.clear();
        } else {
            text.pop();
        }

        if parse_display(&text).is_none() {
            text = INITIAL_DISPLAY.to_string();
        }
        self.set_display(text);
    }

    // ===== Internals =====

    /// Typing replaces the display when a new number is due, or when the
    /// display holds something digits cannot extend (`1e-8`, `inf`).
    fn starts_fresh_number(&self) -> bool {
        self.awaiting_first_digit || !is_plain_decimal(&self.display)
    }

    fn reset_fields(&mut self) {
        self.accumulator = 0.0;
        self.pending = None;
        self.awaiting_first_digit = true;
    }

    fn display_value(&self) -> f64 {
        parse_display(&self.display).unwrap_or(0.0)
    }

    fn set_display(&mut self, text: String) {
        self.display = text;
        self.sink.refresh(&self.display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(engine: &mut CalculatorEngine<impl DisplaySink>, keys: &str) {
        for c in keys.chars() {
            let event = match c {
                '0'..='9' => InputEvent::from_digit_char(c).unwrap(),
                '.' => InputEvent::DecimalPoint,
                '=' => InputEvent::Equals,
                'C' => InputEvent::Clear,
                'n' => InputEvent::Negate,
                '%' => InputEvent::Percent,
                '<' => InputEvent::Backspace,
                other => InputEvent::Operator(Operation::from_symbol(other).unwrap()),
            };
            engine.handle_input(event);
        }
    }

    fn engine_after(keys: &str) -> CalculatorEngine {
        let mut engine = CalculatorEngine::new();
        press(&mut engine, keys);
        engine
    }

    fn assert_initial(engine: &CalculatorEngine<impl DisplaySink>) {
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.accumulator(), 0.0);
        assert_eq!(engine.pending(), None);
        assert!(engine.is_awaiting_first_digit());
    }

    // ===== Construction =====

    #[test]
    fn test_new_engine_is_initial() {
        assert_initial(&CalculatorEngine::new());
        assert_initial(&CalculatorEngine::default());
    }

    #[test]
    fn test_with_sink_receives_initial_display() {
        let engine = CalculatorEngine::with_sink(Vec::<String>::new());
        assert_eq!(engine.sink(), &vec!["0".to_string()]);
    }

    #[test]
    fn test_with_error_token() {
        let engine = CalculatorEngine::new().with_error_token("Erro");
        assert_eq!(engine.error_token(), "Erro");
    }

    // ===== InputEvent =====

    #[test]
    fn test_input_event_digit_bounds() {
        assert_eq!(InputEvent::digit(0), Some(InputEvent::Digit(0)));
        assert_eq!(InputEvent::digit(9), Some(InputEvent::Digit(9)));
        assert_eq!(InputEvent::digit(10), None);
    }

    #[test]
    fn test_input_event_from_digit_char() {
        assert_eq!(InputEvent::from_digit_char('7'), Some(InputEvent::Digit(7)));
        assert_eq!(InputEvent::from_digit_char('x'), None);
    }

    #[test]
    fn test_input_event_labels() {
        assert_eq!(InputEvent::Digit(3).label(), "3");
        assert_eq!(InputEvent::Operator(Operation::Divide).label(), "/");
        assert_eq!(InputEvent::Negate.label(), "±");
        assert_eq!(InputEvent::Clear.label(), "C");
    }

    // ===== Digits =====

    #[test]
    fn test_digits_concatenate() {
        assert_eq!(engine_after("123").display(), "123");
    }

    #[test]
    fn test_leading_zero_collapses() {
        assert_eq!(engine_after("0").display(), "0");
        assert_eq!(engine_after("007").display(), "7");
    }

    #[test]
    fn test_first_digit_leaves_awaiting_phase() {
        let engine = engine_after("5");
        assert_eq!(engine.phase(), Phase::Accumulating);
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut engine = engine_after("4");
        engine.input_digit(12);
        assert_eq!(engine.display(), "4");
    }

    // ===== Decimal point =====

    #[test]
    fn test_decimal_point_when_awaiting() {
        let engine = engine_after(".");
        assert_eq!(engine.display(), "0.");
        assert_eq!(engine.phase(), Phase::Accumulating);
    }

    #[test]
    fn test_second_decimal_point_ignored() {
        assert_eq!(engine_after("1.2.3..").display(), "1.23");
    }

    #[test]
    fn test_zero_then_decimal_keeps_zero() {
        assert_eq!(engine_after("0.5").display(), "0.5");
    }

    // ===== Operators and evaluation =====

    #[test]
    fn test_simple_operations() {
        assert_eq!(engine_after("12+7=").display(), "19");
        assert_eq!(engine_after("10-4=").display(), "6");
        assert_eq!(engine_after("6*7=").display(), "42");
        assert_eq!(engine_after("1/4=").display(), "0.25");
    }

    #[test]
    fn test_select_operation_captures_accumulator() {
        let engine = engine_after("8*");
        assert_eq!(engine.accumulator(), 8.0);
        assert_eq!(engine.pending(), Some(Operation::Multiply));
        assert!(engine.is_awaiting_first_digit());
        assert_eq!(engine.display(), "8");
    }

    #[test]
    fn test_operator_then_equals_reuses_display() {
        assert_eq!(engine_after("5+=").display(), "10");
    }

    #[test]
    fn test_chaining_is_left_to_right() {
        assert_eq!(engine_after("2+3*4=").display(), "20");
    }

    #[test]
    fn test_chaining_shows_intermediate_result() {
        let engine = engine_after("3+4*");
        assert_eq!(engine.display(), "7");
        assert_eq!(engine.accumulator(), 7.0);
        assert_eq!(engine.pending(), Some(Operation::Multiply));
    }

    #[test]
    fn test_evaluate_clears_pending() {
        let engine = engine_after("9-2=");
        assert_eq!(engine.pending(), None);
        assert!(engine.is_awaiting_first_digit());
    }

    #[test]
    fn test_bare_equals_reformats_display() {
        assert_eq!(engine_after("2.50=").display(), "2.5");
        assert_eq!(engine_after("3.=").display(), "3");
    }

    #[test]
    fn test_digit_after_result_starts_fresh() {
        assert_eq!(engine_after("2+2=9").display(), "9");
    }

    #[test]
    fn test_repeated_equals_keeps_result() {
        assert_eq!(engine_after("2+3==").display(), "5");
    }

    // ===== Division by zero =====

    #[test]
    fn test_division_by_zero_shows_token_and_resets() {
        let engine = engine_after("5/0=");
        assert_eq!(engine.display(), DEFAULT_ERROR_TOKEN);
        assert!(engine.is_error());
        assert_eq!(engine.accumulator(), 0.0);
        assert_eq!(engine.pending(), None);
        assert!(engine.is_awaiting_first_digit());
    }

    #[test]
    fn test_digit_after_error_starts_fresh() {
        assert_eq!(engine_after("5/0=7").display(), "7");
        assert_eq!(engine_after("5/0=7+1=").display(), "8");
    }

    #[test]
    fn test_error_not_chainable() {
        let engine = engine_after("5/0*");
        assert!(engine.is_error());
        assert_eq!(engine.pending(), Some(Operation::Multiply));
        assert_eq!(engine.accumulator(), 0.0);
        assert!(engine.is_awaiting_first_digit());
    }

    #[test]
    fn test_operator_after_chained_error_starts_from_zero() {
        assert_eq!(engine_after("5/0*3=").display(), "0");
        assert_eq!(engine_after("5/0+3=").display(), "3");
    }

    #[test]
    fn test_custom_error_token() {
        let mut engine = CalculatorEngine::new().with_error_token("Erro");
        press(&mut engine, "1/0=");
        assert_eq!(engine.display(), "Erro");
    }

    #[test]
    fn test_negate_and_percent_ignore_error() {
        assert!(engine_after("1/0=n").is_error());
        assert!(engine_after("1/0=%").is_error());
    }

    #[test]
    fn test_operator_after_error_uses_zero() {
        assert_eq!(engine_after("1/0=+4=").display(), "4");
    }

    // ===== Clear =====

    #[test]
    fn test_clear_from_any_state() {
        for keys in ["", "12", "3.5", "4+", "4+6", "4+6=", "1/0=", "2n%"] {
            let mut engine = engine_after(keys);
            engine.clear();
            assert_initial(&engine);
        }
    }

    // ===== Negate / percent =====

    #[test]
    fn test_negate_twice() {
        let mut engine = engine_after("7");
        engine.negate();
        assert_eq!(engine.display(), "-7");
        engine.negate();
        assert_eq!(engine.display(), "7");
    }

    #[test]
    fn test_negate_zero_stays_zero() {
        assert_eq!(engine_after("n").display(), "0");
    }

    #[test]
    fn test_negate_keeps_accumulating() {
        assert_eq!(engine_after("7n3").display(), "-73");
    }

    #[test]
    fn test_digit_after_exponent_display_starts_fresh() {
        // 1 -> 0.01 -> 0.0001 -> 0.000001 -> 1e-8, still accumulating
        let mut engine = engine_after("1%%%%");
        assert_eq!(engine.display(), "1e-8");
        assert_eq!(engine.phase(), Phase::Accumulating);
        press(&mut engine, "5");
        assert_eq!(engine.display(), "5");
        press(&mut engine, "%%%%.");
        assert_eq!(engine.display(), "0.");
    }

    #[test]
    fn test_percent() {
        assert_eq!(engine_after("50%").display(), "0.5");
        assert_eq!(engine_after("200+10%=").display(), "200.1");
    }

    // ===== Backspace =====

    #[test]
    fn test_backspace_removes_last_char() {
        assert_eq!(engine_after("123<").display(), "12");
        assert_eq!(engine_after("1.5<").display(), "1.");
    }

    #[test]
    fn test_backspace_to_empty_shows_zero() {
        assert_eq!(engine_after("7<").display(), "0");
        assert_eq!(engine_after("<").display(), "0");
    }

    #[test]
    fn test_backspace_lone_minus_shows_zero() {
        assert_eq!(engine_after("7n<").display(), "0");
    }

    #[test]
    fn test_backspace_on_error_shows_zero() {
        assert_eq!(engine_after("1/0=<").display(), "0");
    }

    // ===== Sink =====

    #[test]
    fn test_sink_sees_every_change() {
        let mut engine = CalculatorEngine::with_sink(Vec::<String>::new());
        press(&mut engine, "12+3=");
        assert_eq!(
            engine.sink(),
            &vec!["0", "1", "12", "3", "15"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_string_sink_keeps_latest() {
        let mut engine = CalculatorEngine::with_sink(String::new());
        press(&mut engine, "9*9=");
        assert_eq!(engine.sink(), "81");
    }

    #[test]
    fn test_error_frame_reaches_sink() {
        let mut engine = CalculatorEngine::with_sink(Vec::<String>::new());
        press(&mut engine, "5/0=");
        assert_eq!(engine.sink().last().map(String::as_str), Some("Error"));
    }

    // ===== Snapshot =====

    #[test]
    fn test_snapshot_fields() {
        let snapshot = engine_after("4*").snapshot();
        assert_eq!(
            snapshot,
            EngineSnapshot {
                display: "4".into(),
                accumulator: 4.0,
                pending: Some(Operation::Multiply),
                awaiting_first_digit: true,
            }
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_string(&engine_after("4*").snapshot()).unwrap();
        assert!(json.contains("\"pending\":\"multiply\""));
        assert!(json.contains("\"display\":\"4\""));
    }

    #[test]
    fn test_handle_input_returns_display() {
        let mut engine = CalculatorEngine::new();
        assert_eq!(engine.handle_input(InputEvent::Digit(4)), "4");
        assert_eq!(engine.handle_input(InputEvent::Negate), "-4");
    }
}
