//! Character to [`InputEvent`] mapping
//!
//! Shared by the terminal front end and the headless `--keys` replay so both
//! read typed characters the same way.

use crate::config::CalcConfig;
use crate::core::{InputEvent, Operation};
use crate::error::{AppError, AppResult};

/// Maps typed characters to calculator inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    comma_is_decimal: bool,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    /// Creates the stock mapping (',' is a decimal point)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            comma_is_decimal: true,
        }
    }

    /// Creates the mapping described by `config`
    #[must_use]
    pub const fn from_config(config: &CalcConfig) -> Self {
        Self {
            comma_is_decimal: config.comma_is_decimal,
        }
    }

    /// Whether ',' enters a decimal point
    #[must_use]
    pub const fn comma_is_decimal(&self) -> bool {
        self.comma_is_decimal
    }

    /// Maps a character typed on the keyboard
    ///
    /// | keys          | input          |
    /// |---------------|----------------|
    /// | `0`-`9`       | digit          |
    /// | `.` `,`       | decimal point  |
    /// | `+ - * /`     | operator       |
    /// | `=`           | equals         |
    /// | `%`           | percent        |
    /// | `n` `_`       | negate         |
    /// | `c` `C`       | clear          |
    #[must_use]
    pub fn event_for_char(&self, c: char) -> Option<InputEvent> {
        match c {
            '0'..='9' => InputEvent::from_digit_char(c),
            '.' => Some(InputEvent::DecimalPoint),
            ',' if self.comma_is_decimal => Some(InputEvent::DecimalPoint),
            '=' => Some(InputEvent::Equals),
            '%' => Some(InputEvent::Percent),
            'n' | '_' => Some(InputEvent::Negate),
            'c' | 'C' => Some(InputEvent::Clear),
            _ => Operation::from_symbol(c).map(InputEvent::Operator),
        }
    }

    /// Maps a character of a replay string
    ///
    /// Adds the keys a plain string has no other way to spell: a newline is
    /// Enter, `<` is Backspace.
    #[must_use]
    pub fn replay_event(&self, c: char) -> Option<InputEvent> {
        match c {
            '\n' | '\r' => Some(InputEvent::Equals),
            '<' => Some(InputEvent::Backspace),
            _ => self.event_for_char(c),
        }
    }

    /// Converts a whole replay string, skipping spaces and tabs
    pub fn parse_replay(&self, keys: &str) -> AppResult<Vec<InputEvent>> {
        keys.chars()
            .enumerate()
            .filter(|(_, c)| !matches!(c, ' ' | '\t'))
            .map(|(position, key)| {
                self.replay_event(key)
                    .ok_or(AppError::UnknownKey { key, position })
            })
            .collect()
    }
}
