use std::io::stdout;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::style::{Color, Modifier, Style};
use ratatui::DefaultTerminal;

use crate::error::Result;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const INCOME_STYLE: Style = Style::new()
    .fg(Color::Rgb(80, 220, 100))
    .add_modifier(Modifier::BOLD);
pub const PARTNERS_STYLE: Style = Style::new().fg(Color::Rgb(166, 177, 185));
pub const NO_DATA_STYLE: Style = Style::new().fg(Color::DarkGray);
pub const LABEL_STYLE: Style = Style::new().fg(Color::Rgb(120, 140, 200));

pub const BUTTON_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

pub const ERROR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

/// Owns the terminal while the dashboard is mounted: raw mode, alternate
/// screen and mouse capture are released on drop, whatever the exit path.
pub struct TerminalSession {
    pub terminal: DefaultTerminal,
}

impl TerminalSession {
    pub fn start() -> Result<Self> {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = execute!(stdout(), DisableMouseCapture);
            ratatui::restore();
            hook(info);
        }));

        let terminal = ratatui::init();
        if let Err(e) = execute!(stdout(), EnableMouseCapture) {
            ratatui::restore();
            return Err(e.into());
        }
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
    }
}
