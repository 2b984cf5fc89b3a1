//! Unified calculator driver
//!
//! Every front end implements [`CalculatorDriver`], so one set of behavioural
//! checks (`verify_*`) runs against the bare engine and the terminal app
//! alike.

use crate::core::{CalculatorEngine, InputEvent, DEFAULT_ERROR_TOKEN};
use crate::error::AppResult;
use crate::keymap::KeyMap;

/// Abstract driver trait for calculator interactions
///
/// # Example
///
/// ```rust
/// use deskcalc::driver::{verify_chaining, CalculatorDriver, EngineDriver};
///
/// let mut driver = EngineDriver::new();
/// driver.press_keys("12 + 7 =").unwrap();
/// assert_eq!(driver.display(), "19");
///
/// verify_chaining(&mut driver);
/// ```
pub trait CalculatorDriver {
    /// Presses one key
    fn press(&mut self, event: InputEvent);

    /// Current display text
    fn display(&self) -> String;

    /// Presses every key of a replay string (see [`KeyMap::parse_replay`])
    fn press_keys(&mut self, keys: &str) -> AppResult<()> {
        for event in KeyMap::new().parse_replay(keys)? {
            self.press(event);
        }
        Ok(())
    }

    /// Presses the clear key
    fn clear(&mut self) {
        self.press(InputEvent::Clear);
    }
}

/// Driver over a bare engine, recording every display frame
#[derive(Debug, Clone)]
pub struct EngineDriver {
    engine: CalculatorEngine<Vec<String>>,
}

impl Default for EngineDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineDriver {
    /// Creates a driver over a fresh engine
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: CalculatorEngine::with_sink(Vec::new()),
        }
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine<Vec<String>> {
        &self.engine
    }

    /// Every display text the engine has pushed, oldest first
    #[must_use]
    pub fn frames(&self) -> &[String] {
        self.engine.sink()
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, event: InputEvent) {
        self.engine.handle_input(event);
    }

    fn display(&self) -> String {
        self.engine.display().to_string()
    }
}

/// TUI Driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{CalculatorDriver, InputEvent};
    use crate::tui::CalculatorApp;

    /// Drives the terminal app through its keypad buttons
    #[derive(Debug)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl Default for TuiDriver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self {
                app: CalculatorApp::new(),
            }
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, event: InputEvent) {
            // Backspace has no keypad button; it only exists on the keyboard.
            match self.app.keypad().find_button(event) {
                Some(index) => self.app.press_button(index),
                None => self.app.press(event),
            }
        }

        fn display(&self) -> String {
            self.app.screen_text().to_string()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified Checks =====
// These checks work with ANY CalculatorDriver implementation. They are test
// helpers: every `verify_*` function panics on the first mismatch.

#[allow(clippy::panic)]
fn press_and_read<D: CalculatorDriver>(driver: &mut D, keys: &str) -> String {
    driver.clear();
    driver
        .press_keys(keys)
        .unwrap_or_else(|e| panic!("bad key sequence {keys:?}: {e}"));
    driver.display()
}

/// Verifies digit entry and leading-zero collapse
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(press_and_read(driver, "123"), "123");
    assert_eq!(press_and_read(driver, "0"), "0");
    assert_eq!(press_and_read(driver, "0045"), "45");
}

/// Verifies that a number never holds two decimal points
pub fn verify_single_decimal_point<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(press_and_read(driver, "..."), "0.");
    assert_eq!(press_and_read(driver, "1.2.3"), "1.23");
}

/// Verifies the four operations
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(press_and_read(driver, "2+3="), "5");
    assert_eq!(press_and_read(driver, "10-4="), "6");
    assert_eq!(press_and_read(driver, "6*7="), "42");
    assert_eq!(press_and_read(driver, "20/8="), "2.5");
}

/// Verifies operator-then-equals and left-to-right chaining
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(press_and_read(driver, "5+="), "10");
    assert_eq!(press_and_read(driver, "2+3*4="), "20");
    assert_eq!(press_and_read(driver, "3+4*"), "7");
}

/// Verifies division by zero and recovery
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(press_and_read(driver, "5/0="), DEFAULT_ERROR_TOKEN);
    assert_eq!(press_and_read(driver, "5/0=7"), "7");
    assert_eq!(press_and_read(driver, "5/0=2+2="), "4");
    assert_eq!(press_and_read(driver, "5/0*3="), "0");
}

/// Verifies sign flip and percent
pub fn verify_unary_keys<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(press_and_read(driver, "7n"), "-7");
    assert_eq!(press_and_read(driver, "7nn"), "7");
    assert_eq!(press_and_read(driver, "50%"), "0.5");
}

/// Verifies backspace
pub fn verify_backspace<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(press_and_read(driver, "123<"), "12");
    assert_eq!(press_and_read(driver, "9<"), "0");
}

/// Complete verification suite - runs all checks
///
/// # Panics
///
/// Panics if the driver disagrees with any check.
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_entry(driver);
    verify_single_decimal_point(driver);
    verify_basic_arithmetic(driver);
    verify_chaining(driver);
    verify_division_by_zero(driver);
    verify_unary_keys(driver);
    verify_backspace(driver);
}
