//! Application state and event loop.

use crate::live_watcher::LiveWatcher;
use crate::snapshot::{load_snapshot, wall_duration, StatsSnapshot};
use crate::theme::Theme;
use crate::ui::stats_panel::{render_stats_display, StatsDisplayProps};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use parking_lot::Mutex;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

pub mod helpers;
pub mod stats_panel;

pub struct App {
    snapshot: StatsSnapshot,
    snapshot_path: PathBuf,
    theme: Theme,
    live_watcher: Option<LiveWatcher>,
    /// Set by the watcher callback when the snapshot file changed on disk
    needs_refresh: Arc<Mutex<bool>>,
    should_redraw: bool,
    exit: bool,
}

impl App {
    pub fn new(snapshot_path: PathBuf) -> Self {
        let snapshot = match load_snapshot(&snapshot_path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!(
                    "Could not load snapshot {}: {} (starting empty)",
                    snapshot_path.display(),
                    e
                );
                StatsSnapshot::default()
            }
        };

        let needs_refresh = Arc::new(Mutex::new(false));
        let flag = needs_refresh.clone();
        let live_watcher = match LiveWatcher::new(
            snapshot_path.clone(),
            Arc::new(move || *flag.lock() = true),
        ) {
            Ok(mut watcher) => match watcher.start() {
                Ok(()) => Some(watcher),
                Err(e) => {
                    log::error!("Failed to start live watcher: {}", e);
                    None
                }
            },
            Err(e) => {
                log::error!("Failed to create live watcher: {}", e);
                None
            }
        };

        Self {
            snapshot,
            snapshot_path,
            theme: Theme,
            live_watcher,
            needs_refresh,
            should_redraw: true,
            exit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut ratatui::DefaultTerminal) -> io::Result<()> {
        self.should_redraw = true;

        while !self.exit {
            // Short poll: 30ms keeps UI responsive while saving CPU.
            if event::poll(std::time::Duration::from_millis(30))? {
                while event::poll(std::time::Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) => {
                            if key.kind == KeyEventKind::Press {
                                self.handle_key_event(key);
                                self.should_redraw = true;
                                if self.exit {
                                    return Ok(());
                                }
                            }
                        }
                        Event::Resize(_, _) => {
                            self.should_redraw = true;
                        }
                        _ => {}
                    }
                }
            }

            // Process coalesced file changes
            if let Some(watcher) = &self.live_watcher {
                watcher.process_changes();
            }

            if std::mem::take(&mut *self.needs_refresh.lock()) {
                self.reload_snapshot();
            }

            if self.should_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.should_redraw = false;
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.exit = true;
            }
            KeyCode::Char('r') => {
                self.reload_snapshot();
            }
            _ => {}
        }
    }

    /// Reload the snapshot from disk; on failure keep the previous one.
    fn reload_snapshot(&mut self) {
        match load_snapshot(&self.snapshot_path) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.should_redraw = true;
                log::debug!("Snapshot refreshed (live update)");
            }
            Err(e) => {
                log::warn!(
                    "Failed to reload snapshot {}: {}",
                    self.snapshot_path.display(),
                    e
                );
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let colors = self.theme.colors();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let duration = wall_duration(&self.snapshot, chrono::Utc::now().timestamp_millis());
        let props = StatsDisplayProps {
            stats: &self.snapshot.stats,
            last_turn_stats: &self.snapshot.last_turn_stats,
            duration: &duration,
            user_tier: self.snapshot.user_tier.as_deref(),
        };
        render_stats_display(frame, chunks[0], &props, &colors);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " q: quit │ r: reload",
                Style::default().fg(colors.text_muted),
            ))),
            chunks[1],
        );
    }
}
