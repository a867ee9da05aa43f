//! Main TUI application state and logic

use crate::parser::ast::{ParseError, Recognition};
use crate::snapshot::Timeline;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

use super::panes::{self, SourceRenderData, SourceScrollState, StatusRenderData};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Diagnostics,
    Stack,
    Heap,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> diagnostics -> stack -> heap)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Heap,
            FocusedPane::Heap => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Heap,
            FocusedPane::Diagnostics => FocusedPane::Source,
            FocusedPane::Stack => FocusedPane::Diagnostics,
            FocusedPane::Heap => FocusedPane::Stack,
        }
    }
}

/// The main application state
pub struct App {
    /// Replay history being navigated
    pub timeline: Timeline,

    /// The source code being visualized
    pub source_code: String,

    /// Lines the recognizer could not understand
    pub errors: Vec<ParseError>,
    error_lines: Vec<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: SourceScrollState,
    pub diagnostics_scroll: usize,
    pub stack_scroll: usize,
    pub heap_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Time between steps in play mode
    pub play_interval: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app over a recorded timeline
    pub fn new(
        timeline: Timeline,
        source_code: String,
        errors: Vec<ParseError>,
        play_interval: Duration,
    ) -> Self {
        let error_lines = errors.iter().map(|e| e.line).collect();
        let status_message = if errors.is_empty() {
            String::from("Ready!")
        } else {
            format!("{} line(s) not recognized", errors.len())
        };
        let long_ago = Instant::now()
            .checked_sub(Duration::from_secs(1))
            .unwrap_or_else(Instant::now);

        App {
            timeline,
            source_code,
            errors,
            error_lines,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            diagnostics_scroll: 0,
            stack_scroll: 0,
            heap_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            play_interval,
            last_play_time: long_ago,
            last_space_press: long_ago,
        }
    }

    /// Build an app straight from a recognition pass
    pub fn from_recognition(
        recognition: Recognition,
        source_code: String,
        snapshot_limit: usize,
        play_interval: Duration,
    ) -> Self {
        let timeline = Timeline::new(recognition.steps, snapshot_limit);
        App::new(timeline, source_code, recognition.errors, play_interval)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.advance_playback();

            // Use poll with timeout to allow auto-play to work
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

    /// Take one playback step if the interval has elapsed
    pub fn advance_playback(&mut self) {
        if !self.is_playing || self.last_play_time.elapsed() < self.play_interval {
            return;
        }

        if self.timeline.step_forward().is_ok() {
            self.status_message = "Playing...".to_string();
        } else {
            // No more steps available
            self.is_playing = false;
            self.status_message = "Playback complete".to_string();
        }
        self.last_play_time = Instant::now();
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Source (top) | Diagnostics (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Stack (top) | Heap (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(columns[1]);

        let state = self.timeline.current();

        panes::render_source_pane(
            frame,
            left_rows[0],
            SourceRenderData {
                source_code: &self.source_code,
                current_line: self.timeline.current_line(),
                error_lines: &self.error_lines,
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let current = self.timeline.current_step().zip(self.timeline.current_outcome());
        panes::render_diagnostics_pane(
            frame,
            left_rows[1],
            current,
            &self.errors,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        panes::render_stack_pane(
            frame,
            right_rows[0],
            &state,
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        panes::render_heap_pane(
            frame,
            right_rows[1],
            &state,
            self.focused_pane == FocusedPane::Heap,
            &mut self.heap_scroll,
        );

        panes::render_status_bar(
            frame,
            status_area,
            StatusRenderData {
                message: &self.status_message,
                position: self.timeline.position(),
                total_steps: self.timeline.steps().len(),
                has_errors: !self.errors.is_empty(),
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if self.timeline.step_forward().is_err() {
                        break;
                    }
                    stepped += 1;
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_sub(1);
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_sub(1);
                }
                FocusedPane::Heap => {
                    self.heap_scroll = self.heap_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_add(1);
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_add(1);
                }
                FocusedPane::Heap => {
                    self.heap_scroll = self.heap_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        if self.timeline.is_at_end() {
                            self.timeline.rewind_to_start();
                        }
                        self.last_play_time = Instant::now()
                            .checked_sub(self.play_interval)
                            .unwrap_or_else(Instant::now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.timeline.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.timeline.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
        debug!(position = self.timeline.position(), key = ?key.code, "key handled");
    }

    /// Step forward in the replay
    fn step_forward(&mut self) {
        self.status_message = match self.timeline.step_forward() {
            Ok(()) => "Stepped forward".to_string(),
            Err(e) => format!("Cannot step forward: {}", e),
        };
    }

    /// Step backward in the replay
    fn step_backward(&mut self) {
        self.status_message = match self.timeline.step_backward() {
            Ok(()) => "Stepped backward".to_string(),
            Err(e) => format!("Cannot step backward: {}", e),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::recognize;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    const SOURCE: &str = "Node a = new Node(1);\nNode b = new Node(2);\na.next = b;\nb.next = a;\nfoo bar baz";

    fn app() -> App {
        App::from_recognition(
            recognize(SOURCE),
            SOURCE.to_string(),
            usize::MAX,
            Duration::ZERO,
        )
    }

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
    fn test_navigation_keys() {
        let mut app = app();

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.timeline.position(), 3);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.timeline.position(), 2);

        press(&mut app, KeyCode::Enter);
        assert!(app.timeline.is_at_end());

        press(&mut app, KeyCode::Right);
        assert!(app.status_message.starts_with("Cannot step forward"));

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.timeline.position(), 0);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app();
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focused_pane, FocusedPane::Source);

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Heap);
    }

    #[test]
    fn test_playback_runs_to_completion() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.is_playing);

        for _ in 0..10 {
            app.advance_playback();
        }
        assert!(!app.is_playing);
        assert!(app.timeline.is_at_end());
        assert_eq!(app.status_message, "Playback complete");
    }

    #[test]
    fn test_render_shows_panes_and_cycle() {
        let mut app = app();
        app.timeline.jump_to_end();
        let text = screen(&mut app);

        assert!(text.contains("Source Code"));
        assert!(text.contains("Heap"));
        assert!(text.contains("Step 4/4"));
        assert!(text.contains("↺ 0x1000"));
        assert!(text.contains("Unrecognized syntax"));
    }
}
