//! TUI rendering
//!
//! Calculator column on the left (display, status, keypad), key help on the
//! right.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Screen regions, computed from the terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    /// Number display
    pub display: Rect,
    /// Pending-operation line
    pub status: Rect,
    /// Keypad, border included (what [`CalculatorApp::click`] expects)
    pub keypad: Rect,
    /// Key help sidebar
    pub help: Rect,
}

/// Splits the terminal area into the calculator regions
#[must_use]
pub fn layout(area: Rect) -> UiLayout {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Length(CALCULATOR_WIDTH), // Calculator
            Constraint::Min(0),                   // Help sidebar
        ])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Display
            Constraint::Length(1), // Status
            Constraint::Min(7),    // Keypad
        ])
        .split(columns[0]);

    UiLayout {
        display: rows[0],
        status: rows[1],
        keypad: rows[2],
        help: columns[1],
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let style = if self.app.engine().is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        Paragraph::new(Span::styled(self.app.screen_text(), style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(
            self.app.status_line(),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Right)
        .render(area, buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>9}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Keys ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let regions = layout(area);
        self.render_display(regions.display, buf);
        self.render_status(regions.status, buf);
        KeypadWidget::new(self.app.keypad()).render(regions.keypad, buf);
        if regions.help.width > 0 {
            self.render_help(regions.help, buf);
        }
    }
}

/// Window title
pub const TITLE: &str = " deskcalc ";

/// Width of the calculator column, keypad borders included
pub const CALCULATOR_WIDTH: u16 = 26;

/// Key help for the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 . ,", "Number"),
    ("+ - * /", "Operator"),
    ("Enter =", "Evaluate"),
    ("Esc c", "Clear"),
    ("Bksp", "Delete"),
    ("n", "Sign"),
    ("%", "Percent"),
    ("Click", "Keypad"),
    ("q Ctrl+C", "Quit"),
];
