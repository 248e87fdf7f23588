//! Application state and event handling.
//!
//! [`App`] ties a [`Session`] to a [`Pager`] and folds terminal input and
//! parse-stream batches into them. The main loop turns both sources into
//! [`AppEvent`] values and hands them here; drawing happens elsewhere.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use tracing::debug;

use crate::pager::{Pager, Viewport};
use crate::session::Session;
use crate::stream::LineBatch;

/// Rows scrolled per mouse wheel notch.
const WHEEL_SCROLL_ROWS: i64 = 3;

/// One unit of work for the main loop.
pub enum AppEvent {
    /// Terminal input.
    Input(Event),
    /// A batch arrived from the parse task.
    Batch(LineBatch),
    /// The parse stream finished; no further batch will arrive.
    StreamClosed,
}

pub struct App {
    pub session: Session,
    pub pager: Pager,
    /// Geometry of the document area from the most recent draw.
    viewport: Viewport,
    stream_open: bool,
    running: bool,
}

impl App {
    pub fn new(session: Session, pager: Pager) -> Self {
        Self {
            session,
            pager,
            viewport: Viewport {
                width: 80,
                height: 24,
            },
            stream_open: true,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Whether the main loop should still poll the parse stream.
    pub fn stream_open(&self) -> bool {
        self.stream_open
    }

    /// Record the document area used by the last draw so scroll steps match
    /// what is on screen.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(input) => self.handle_input(input),
            AppEvent::Batch(batch) => {
                self.session.apply_batch(batch, &mut self.pager);
            }
            AppEvent::StreamClosed => {
                debug!("parse stream closed");
                self.stream_open = false;
                self.session.on_stream_closed(&mut self.pager);
            }
        }
    }

    fn handle_input(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let page = self.viewport.height.saturating_sub(1).max(1) as i64;
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll(1),
            KeyCode::PageUp => self.scroll(-page),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll(page),
            KeyCode::Home | KeyCode::Char('g') => self.scroll(i64::MIN / 2),
            KeyCode::End | KeyCode::Char('G') => self.scroll(i64::MAX / 2),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll(-WHEEL_SCROLL_ROWS),
            MouseEventKind::ScrollDown => self.scroll(WHEEL_SCROLL_ROWS),
            _ => {}
        }
    }

    fn scroll(&mut self, delta: i64) {
        self.pager.scroll_by(delta, self.viewport.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderedLine;
    use crate::stream::{AckToken, StreamStats};
    use ratatui::text::Line;
    use std::io::Write;

    async fn app_for(contents: &str) -> (App, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        let session = Session::open(file.path()).await.expect("open");
        let pager = Pager::with_sentinel_seed(
            Box::new(|_, _| RenderedLine {
                rows: vec![Line::raw("")],
            }),
            3,
        );
        (App::new(session, pager), file)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[tokio::test]
    async fn test_quit_keys_stop_the_app() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let (mut app, _file) = app_for("[1]").await;
            assert!(app.is_running());
            app.handle_event(key(code));
            assert!(!app.is_running());
        }
    }

    #[tokio::test]
    async fn test_scroll_keys_move_within_extent() {
        let (mut app, _file) = app_for("[1]").await;
        let lines = (0..200u64)
            .map(|i| crate::models::JsonLine::Property {
                level: 0,
                key: crate::models::Key::Index(i),
                value: crate::models::JsonPrimitive::Number(i as f64),
            })
            .collect();
        let mut stats = StreamStats::default();
        stats.record_chunk(3);
        app.pager
            .append_lines(lines, AckToken::spent(), stats, 3);
        app.pager.tick(app.viewport());

        app.handle_event(key(KeyCode::Down));
        assert_eq!(app.pager.scroll_top(), 1);
        app.handle_event(key(KeyCode::PageDown));
        assert!(app.pager.scroll_top() > 1);
        app.handle_event(key(KeyCode::Home));
        assert_eq!(app.pager.scroll_top(), 0);
    }

    #[tokio::test]
    async fn test_stream_closed_seals_the_document() {
        let (mut app, _file) = app_for("[1, 2, 3]").await;
        while let Some(batch) = app.session.next_batch().await {
            app.handle_event(AppEvent::Batch(batch));
        }
        app.handle_event(AppEvent::StreamClosed);
        assert!(!app.stream_open());
        assert!(app.pager.last_page_index().is_some());
    }
}
