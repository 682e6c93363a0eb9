use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Cell, Paragraph, Row, Table},
    DefaultTerminal, Frame,
};
use tracing::{info, warn};

use crate::cli::ViewArgs;
use crate::error::{BoardError, Result};
use crate::grid::{self, Cell as GridCell, Grid, Row as GridRow, RowKind, NO_DATA};
use crate::models::Payload;
use crate::settings::load_settings;
use crate::source::DataSource;
use crate::tui::{
    wrap_text, TerminalSession, BUTTON_STYLE, ERROR_STYLE, FOOTER_STYLE, HEADER_STYLE,
    INCOME_STYLE, LABEL_STYLE, NO_DATA_STYLE, PARTNERS_STYLE,
};
use crate::window::{Direction, MonthWindow};

/// Poll interval while the fetch is outstanding.
const LOADING_TICK: Duration = Duration::from_millis(100);

const PREV_LABEL: &str = " \u{25c0} prev ";
const NEXT_LABEL: &str = " next \u{25b6} ";

/// Each grid row takes four lines plus a one-line gap.
const LINES_PER_ROW: u16 = 5;

/// Width of the name/label column.
const LABEL_WIDTH: u16 = 20;

enum Screen {
    Loading,
    Failed(String),
    Ready(Payload),
}

#[derive(Debug, PartialEq)]
enum Action {
    Continue,
    Quit,
}

/// Map an arrow key to a window move. `h`/`l` follow the vi convention.
fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(Direction::Backward),
        KeyCode::Right | KeyCode::Char('l') => Some(Direction::Forward),
        _ => None,
    }
}

struct Dashboard {
    screen: Screen,
    source_label: String,
    window: MonthWindow,
    /// First visible manager row; the total row is pinned above it.
    offset: usize,
    visible_managers: usize,
    prev_button: Rect,
    next_button: Rect,
}

impl Dashboard {
    fn new(source_label: String, start_month: usize) -> Self {
        Self {
            screen: Screen::Loading,
            source_label,
            window: MonthWindow::starting_at(start_month),
            offset: 0,
            visible_managers: 1,
            prev_button: Rect::default(),
            next_button: Rect::default(),
        }
    }

    fn is_loading(&self) -> bool {
        matches!(self.screen, Screen::Loading)
    }

    fn resolve(&mut self, result: Result<Payload>) {
        self.screen = match result {
            Ok(payload) => {
                info!(managers = payload.table.len(), "dashboard ready");
                Screen::Ready(payload)
            }
            Err(e) => {
                warn!(error = %e, "could not load board data");
                Screen::Failed(e.to_string())
            }
        };
    }

    fn manager_count(&self) -> usize {
        match &self.screen {
            Screen::Ready(payload) => payload.table.len(),
            _ => 0,
        }
    }

    fn max_offset(&self) -> usize {
        self.manager_count().saturating_sub(self.visible_managers)
    }

    fn scroll(&mut self, delta: isize) {
        let max = self.max_offset();
        self.offset = self.offset.saturating_add_signed(delta).min(max);
    }

    fn advance(&mut self, direction: Direction) {
        self.window.advance(direction);
    }

    fn handle_key(&mut self, code: KeyCode) -> Action {
        if let Some(direction) = direction_for_key(code) {
            self.advance(direction);
            return Action::Continue;
        }
        let page = self.visible_managers.max(1) as isize;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.scroll(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll(1),
            KeyCode::PageUp => self.scroll(-page),
            KeyCode::PageDown => self.scroll(page),
            KeyCode::Home => self.offset = 0,
            KeyCode::End => self.offset = self.max_offset(),
            _ => {}
        }
        Action::Continue
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        let pos = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.prev_button.contains(pos) {
                    self.advance(Direction::Backward);
                } else if self.next_button.contains(pos) {
                    self.advance(Direction::Forward);
                }
            }
            MouseEventKind::ScrollUp => self.scroll(-1),
            MouseEventKind::ScrollDown => self.scroll(1),
            _ => {}
        }
        Action::Continue
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, sep_area, content_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new("━".repeat(area.width as usize)).style(FOOTER_STYLE),
            sep_area,
        );

        let (message, style, hint) = match &self.screen {
            Screen::Ready(payload) => {
                let grid = grid::render(payload, self.window.cursor());
                self.draw_ready(frame, header_area, content_area, footer_area, &grid);
                return;
            }
            Screen::Loading => (
                "Loading...".to_string(),
                Style::default(),
                format!(" fetching {}   q=quit", self.source_label),
            ),
            Screen::Failed(msg) => (format!("Error: {msg}"), ERROR_STYLE, " q=quit".to_string()),
        };

        self.clear_buttons();
        frame.render_widget(Paragraph::new(" Affiliate manager").style(HEADER_STYLE), header_area);
        draw_centered(frame, content_area, &message, style);
        draw_footer(frame, footer_area, &hint);
    }

    fn draw_ready(
        &mut self,
        frame: &mut Frame,
        header_area: Rect,
        content_area: Rect,
        footer_area: Rect,
        grid: &Grid,
    ) {
        self.draw_header(frame, header_area);
        self.draw_grid(frame, content_area, grid);

        let pos_info = if self.max_offset() > 0 {
            format!("  rows {}-{}/{}",
                self.offset + 1,
                (self.offset + self.visible_managers).min(self.manager_count()),
                self.manager_count())
        } else {
            String::new()
        };
        draw_footer(
            frame,
            footer_area,
            &format!(
                " \u{2190}/\u{2192}=month  \u{2191}/\u{2193}=scroll  q=quit   {}{pos_info}",
                self.window.range_label()
            ),
        );
    }

    fn clear_buttons(&mut self) {
        self.prev_button = Rect::default();
        self.next_button = Rect::default();
    }

    fn draw_header(&mut self, frame: &mut Frame, area: Rect) {
        let [title_area, prev_area, _gap, next_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(PREV_LABEL.chars().count() as u16),
            Constraint::Length(1),
            Constraint::Length(NEXT_LABEL.chars().count() as u16),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(" Affiliate manager").style(HEADER_STYLE), title_area);
        frame.render_widget(Paragraph::new(PREV_LABEL).style(BUTTON_STYLE), prev_area);
        frame.render_widget(Paragraph::new(NEXT_LABEL).style(BUTTON_STYLE), next_area);
        self.prev_button = prev_area;
        self.next_button = next_area;
    }

    fn draw_grid(&mut self, frame: &mut Frame, area: Rect, grid: &Grid) {
        // header (1 line + margin) and the pinned total row
        let fixed = 2 + LINES_PER_ROW;
        self.visible_managers = (area.height.saturating_sub(fixed) / LINES_PER_ROW).max(1) as usize;
        self.offset = self.offset.min(self.max_offset());

        let mut header_cells = vec![Cell::from("")];
        for col in &grid.columns {
            header_cells.push(Cell::from(Span::styled(
                col.name,
                Style::new().add_modifier(Modifier::BOLD),
            )));
        }
        let header = Row::new(header_cells).bottom_margin(1);

        let mut rows = Vec::new();
        if let Some((total, managers)) = grid.rows.split_first() {
            rows.push(table_row(total));
            rows.extend(
                managers
                    .iter()
                    .skip(self.offset)
                    .take(self.visible_managers)
                    .map(table_row),
            );
        }

        let mut widths = vec![Constraint::Length(LABEL_WIDTH)];
        widths.extend(std::iter::repeat(Constraint::Fill(1)).take(grid.columns.len()));

        let table = Table::new(rows, widths).header(header).column_spacing(1);
        frame.render_widget(table, area);
    }
}

/// Short sub-row labels so six month columns fit an 80-column terminal.
fn compact_labels(kind: &RowKind) -> (&'static str, &'static str) {
    match kind {
        RowKind::Total => ("Total income", "Total partners"),
        RowKind::Manager(_) => ("Income", "Partners"),
    }
}

/// A grid row stacks vertically: name, plan income, fact income, then
/// plan / fact partners.
fn table_row(row: &GridRow) -> Row<'static> {
    let (income_label, partners_label) = compact_labels(&row.kind);
    let mut cells = vec![Cell::from(Text::from(vec![
        Line::from(Span::styled(
            row.kind.title().to_string(),
            Style::new().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("{income_label:<15}plan"), LABEL_STYLE)),
        Line::from(Span::styled(format!("{:<15}fact", ""), LABEL_STYLE)),
        Line::from(Span::styled(format!("{partners_label:<15}p/f"), LABEL_STYLE)),
    ]))];
    cells.extend(row.cells.iter().map(month_cell));
    Row::new(cells).height(LINES_PER_ROW - 1).bottom_margin(1)
}

fn month_cell(cell: &GridCell) -> Cell<'static> {
    let income_style = match cell {
        GridCell::NoData => NO_DATA_STYLE,
        GridCell::Figures { .. } => INCOME_STYLE,
    };
    let (plan_income, fact_income) = cell.income_pair();
    let partners = match cell.partners_pair() {
        ("", "") => String::new(),
        (plan, fact) => format!("{plan} / {fact}"),
    };
    Cell::from(Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(plan_income.to_string(), income_style)),
        Line::from(Span::styled(fact_income.to_string(), income_style)),
        Line::from(Span::styled(partners, PARTNERS_STYLE)),
    ]))
}

fn draw_centered(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let width = area.width.saturating_sub(4) as usize;
    let (wrapped, lines) = wrap_text(text, width);
    let [middle] = Layout::vertical([Constraint::Length(lines)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(
        Paragraph::new(wrapped).style(style).centered(),
        middle,
    );
}

fn draw_footer(frame: &mut Frame, area: Rect, hint: &str) {
    frame.render_widget(Paragraph::new(hint.to_string()).style(FOOTER_STYLE), area);
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Run the fetch off the UI thread. If the dashboard exits first the
/// receiver is gone and the result is dropped.
fn spawn_fetch(source: Box<dyn DataSource>) -> Receiver<Result<Payload>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(source.fetch());
    });
    rx
}

pub fn run(view: &ViewArgs) -> Result<()> {
    let settings = load_settings();
    let source = view.source(&settings);
    let mut dashboard = Dashboard::new(source.describe(), view.start_month());
    let rx = spawn_fetch(source);

    let mut session = TerminalSession::start()?;
    let result = event_loop(&mut session.terminal, &mut dashboard, &rx);
    drop(session);
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    dashboard: &mut Dashboard,
    rx: &Receiver<Result<Payload>>,
) -> Result<()> {
    loop {
        if dashboard.is_loading() {
            match rx.try_recv() {
                Ok(result) => dashboard.resolve(result),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => dashboard.resolve(Err(BoardError::unknown())),
            }
        }

        terminal.draw(|frame| dashboard.draw(frame))?;

        if dashboard.is_loading() && !event::poll(LOADING_TICK)? {
            continue;
        }

        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    Action::Quit
                } else {
                    dashboard.handle_key(key.code)
                }
            }
            Event::Mouse(mouse) => dashboard.handle_mouse(mouse),
            _ => Action::Continue,
        };
        if action == Action::Quit {
            return Ok(());
        }
    }
}
