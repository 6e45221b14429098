//! Terminal host for the calendar grid (impure shell).
//!
//! Plays the role of the UI toolkit: owns the terminal, turns crossterm
//! events into widget callbacks, and paints frames through
//! [`TerminalSurface`].

pub mod constants;
pub mod status_bar;
pub mod terminal_surface;

pub use status_bar::StatusBar;
pub use terminal_surface::TerminalSurface;

use crate::render::GridPainter;
use crate::widget::CalendarGrid;
use constants::{CELL_HEIGHT, CELL_WIDTH, POLL_INTERVAL_MS, STATUS_BAR_HEIGHT};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B, P = crate::render::DefaultPainter>
where
    B: Backend,
    P: GridPainter,
{
    terminal: Terminal<B>,
    grid: CalendarGrid<P>,
}

impl<P: GridPainter> TuiApp<CrosstermBackend<Stdout>, P> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(grid: CalendarGrid<P>) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Self::with_terminal(terminal, grid)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q, Esc or Ctrl+C). Redraws only when the
    /// widget has asked for a repaint.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let poll_interval = Duration::from_millis(POLL_INTERVAL_MS);

        self.draw()?;

        loop {
            if event::poll(poll_interval)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }

            if self.grid.take_repaint_request() {
                self.draw()?;
            }
        }
    }
}

impl<B, P> TuiApp<B, P>
where
    B: Backend,
    P: GridPainter,
{
    /// Wrap an already-initialized terminal.
    ///
    /// Used by `new` and by tests with a `TestBackend`.
    pub fn with_terminal(terminal: Terminal<B>, grid: CalendarGrid<P>) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let mut app = Self { terminal, grid };
        app.handle_resize(size.width, size.height);
        Ok(app)
    }

    /// The hosted widget.
    pub fn grid(&self) -> &CalendarGrid<P> {
        &self.grid
    }

    /// The terminal (for inspecting a test backend's buffer).
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        let page = i64::from(self.grid.layout().column_count.max(1));
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left | KeyCode::Char('h') => self.grid.scroll_by_days(-1),
            KeyCode::Right | KeyCode::Char('l') => self.grid.scroll_by_days(1),
            KeyCode::Up | KeyCode::Char('k') => self.grid.scroll_by_hours(-1),
            KeyCode::Down | KeyCode::Char('j') => self.grid.scroll_by_hours(1),
            KeyCode::PageUp => self.grid.scroll_by_days(-page),
            KeyCode::PageDown => self.grid.scroll_by_days(page),
            KeyCode::Char('t') => self.grid.scroll_to_anchor(),
            _ => {}
        }
        false
    }

    /// Handle a single mouse event
    ///
    /// Left-button press, drag and release become pointer callbacks; the
    /// wheel scrolls by whole hours or days. Pointer positions are reported
    /// in device units, like a touch host would.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let density = self.grid.viewport().effective_density();
        let x = f32::from(mouse.column) * CELL_WIDTH * density;
        let y = f32::from(mouse.row) * CELL_HEIGHT * density;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.grid.on_pointer_down(x, y),
            MouseEventKind::Drag(MouseButton::Left) => self.grid.on_pointer_move(x, y),
            MouseEventKind::Up(MouseButton::Left) => self.grid.on_pointer_up(x, y),
            MouseEventKind::ScrollUp => self.grid.scroll_by_hours(-1),
            MouseEventKind::ScrollDown => self.grid.scroll_by_hours(1),
            MouseEventKind::ScrollLeft => self.grid.scroll_by_days(-1),
            MouseEventKind::ScrollRight => self.grid.scroll_by_days(1),
            _ => {}
        }
    }

    /// Handle a terminal resize event
    ///
    /// The grid gets every row except the status bar.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let rows = height.saturating_sub(STATUS_BAR_HEIGHT);
        debug!(width, height, "terminal resized");
        self.grid
            .on_resize(f32::from(width) * CELL_WIDTH, f32::from(rows) * CELL_HEIGHT);
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let grid = &mut self.grid;
        self.terminal.draw(|frame| {
            let [grid_area, status_area] = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .areas(frame.area());

            let mut surface = TerminalSurface::new(frame.buffer_mut(), grid_area);
            let summary = grid.on_repaint_requested(&mut surface);

            let status = StatusBar::new(
                grid.month_label(),
                summary.current_date,
                grid.is_away_from_anchor(),
            );
            frame.render_widget(Paragraph::new(status.render()), status_area);
        })?;
        Ok(())
    }
}

/// Run the terminal host until the user quits.
///
/// Restores the terminal even when the loop fails.
pub fn run<P: GridPainter>(grid: CalendarGrid<P>) -> Result<(), TuiError> {
    let mut app = TuiApp::new(grid)?;
    info!("terminal host started");

    let result = app.run();

    restore_terminal()?;
    info!("terminal host stopped");

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
