//! Numerical keypad for the terminal calculator
//!
//! The button grid of a desktop calculator window, clickable with the mouse
//! and highlighted when the matching key is typed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::{InputEvent, Operation};

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Text printed on the button
    pub label: String,
    /// Whether the button is currently pressed/highlighted
    pub pressed: bool,
    /// The input this button sends
    pub action: InputEvent,
}

impl KeypadButton {
    /// Creates a button for `action`, labelled the usual way
    #[must_use]
    pub fn new(action: InputEvent) -> Self {
        Self {
            label: action.label(),
            pressed: false,
            action,
        }
    }

    /// Creates a digit button
    #[must_use]
    pub fn digit(d: u8) -> Self {
        Self::new(InputEvent::Digit(d.min(9)))
    }

    /// Creates an operator button
    #[must_use]
    pub fn operator(op: Operation) -> Self {
        Self::new(InputEvent::Operator(op))
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// The keypad layout, 4 columns, the last row one button short
/// ```text
/// [ C ] [ ± ] [ % ] [ / ]
/// [ 7 ] [ 8 ] [ 9 ] [ * ]
/// [ 4 ] [ 5 ] [ 6 ] [ - ]
/// [ 1 ] [ 2 ] [ 3 ] [ + ]
/// [ 0 ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    /// Number of columns
    cols: usize,
    /// Number of rows
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            // Row 1: C ± % /
            KeypadButton::new(InputEvent::Clear),
            KeypadButton::new(InputEvent::Negate),
            KeypadButton::new(InputEvent::Percent),
            KeypadButton::operator(Operation::Divide),
            // Row 2: 7 8 9 *
            KeypadButton::digit(7),
            KeypadButton::digit(8),
            KeypadButton::digit(9),
            KeypadButton::operator(Operation::Multiply),
            // Row 3: 4 5 6 -
            KeypadButton::digit(4),
            KeypadButton::digit(5),
            KeypadButton::digit(6),
            KeypadButton::operator(Operation::Subtract),
            // Row 4: 1 2 3 +
            KeypadButton::digit(1),
            KeypadButton::digit(2),
            KeypadButton::digit(3),
            KeypadButton::operator(Operation::Add),
            // Row 5: 0 . =
            KeypadButton::digit(0),
            KeypadButton::new(InputEvent::DecimalPoint),
            KeypadButton::new(InputEvent::Equals),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds the button sending `event`
    #[must_use]
    pub fn find_button(&self, event: InputEvent) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == event)
    }

    /// Sets a button as pressed by index
    pub fn press_button(&mut self, index: usize) {
        if let Some(btn) = self.buttons.get_mut(index) {
            btn.set_pressed(true);
        }
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights only the button sending `event`, if there is one
    pub fn highlight(&mut self, event: InputEvent) {
        self.release_all();
        if let Some(idx) = self.find_button(event) {
            self.press_button(idx);
        }
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons.iter().enumerate().map(move |(i, btn)| {
            let row = i / self.cols;
            let col = i % self.cols;
            ((row, col), btn)
        })
    }

    /// Converts a click position to button index
    ///
    /// `area` is the full keypad widget area, border included.
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Account for border (1 char on each side)
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let inner_x = rel_x - 1;
        let inner_y = rel_y - 1;

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;

        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = (inner_x / btn_width) as usize;
        let row = (inner_y / btn_height) as usize;

        if row < self.rows && col < self.cols {
            let index = row * self.cols + col;
            (index < self.buttons.len()).then_some(index)
        } else {
            None
        }
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

fn button_style(btn: &KeypadButton) -> Style {
    if btn.pressed {
        return Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
    }
    match btn.action {
        InputEvent::Digit(_) | InputEvent::DecimalPoint => Style::default().fg(Color::White),
        InputEvent::Operator(_) => Style::default().fg(Color::Yellow),
        InputEvent::Equals => Style::default().fg(Color::Green),
        InputEvent::Clear => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Cyan),
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        if inner.width < self.keypad.cols as u16 || inner.height < self.keypad.rows as u16 {
            return; // Too small to render
        }

        let btn_width = inner.width / self.keypad.cols as u16;
        let btn_height = inner.height / self.keypad.rows as u16;

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner.x + (col as u16 * btn_width);
            let y = inner.y + (row as u16 * btn_height);

            if btn_width >= 3 {
                let label = format!("[{}]", btn.label);
                let label_len = label.chars().count() as u16;
                let label_x = x + btn_width.saturating_sub(label_len) / 2;
                let label_y = y + btn_height / 2;

                if label_y < inner.y + inner.height && label_x < inner.x + inner.width {
                    buf.set_span(
                        label_x,
                        label_y,
                        &Span::styled(label, button_style(btn)),
                        btn_width,
                    );
                }
            }
        }
    }
}
