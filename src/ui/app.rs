//! Main TUI application state and logic

use crate::report::Report;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// Tokens, tree and error of the loaded program
    pub report: Report,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets, clamped by the panes while rendering
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub tree_scroll: usize,

    /// Rows moved by PageUp/PageDown; follows the last rendered pane height
    pub page_size: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app showing the given report
    pub fn new(report: Report) -> Self {
        let status_message = match &report.error {
            Some(err) => err.to_string(),
            None => String::from("Ready!"),
        };

        App {
            report,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            tokens_scroll: 0,
            tree_scroll: 0,
            page_size: 10,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Left column: Source | Right column: Tokens (top) / Tree (bottom)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(pane_area);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let focused_area = match self.focused_pane {
            FocusedPane::Source => columns[0],
            FocusedPane::Tokens => right_rows[0],
            FocusedPane::Tree => right_rows[1],
        };
        self.page_size = focused_area.height.saturating_sub(2).max(1) as usize;

        let error_line = self.report.error.as_ref().map(|err| err.location().line);

        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.report.source,
            error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.report.tokens,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[1],
            self.report.program.as_ref(),
            self.report.error.as_ref(),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.report.tokens.len(),
            self.report.statement_count(),
            !self.report.is_ok(),
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        let page = self.page_size;
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(page);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(page);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            KeyCode::End => {
                // Clamped to the last page on the next render
                *self.focused_scroll() = usize::MAX;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    const PROGRAM: &str = "Main {\n    int x = 1;\n    while (x < 10) {\n        x++;\n    }\n    PrintLine(x);\n}\n";

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = App::new(Report::build(PROGRAM));
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
    }

    #[test]
    fn test_scroll_keys_move_focused_pane_only() {
        let mut app = App::new(Report::build(PROGRAM));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tokens_scroll, 1);
        assert_eq!(app.source_scroll, 0);

        press(&mut app, KeyCode::Home);
        assert_eq!(app.tokens_scroll, 0);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tokens_scroll, 0);
    }

    #[test]
    fn test_end_is_clamped_on_render() {
        let mut app = App::new(Report::build(PROGRAM));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::End);
        assert_eq!(app.tokens_scroll, usize::MAX);
        screen(&mut app);
        assert!(app.tokens_scroll < app.report.tokens.len());
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(Report::build(PROGRAM));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_shows_all_panes() {
        let mut app = App::new(Report::build(PROGRAM));
        let text = screen(&mut app);
        assert!(text.contains("Source Code"));
        assert!(text.contains("Tokens (24)"));
        assert!(text.contains("Syntax Tree"));
        assert!(text.contains("IterativeWhile"));
        assert!(text.contains("Ready!"));
    }

    #[test]
    fn test_render_shows_error() {
        let mut app = App::new(Report::build("Main { int x = ; }"));
        assert!(app.status_message.starts_with("Syntax error"));
        let text = screen(&mut app);
        assert!(text.contains("ERROR"));
    }
}
