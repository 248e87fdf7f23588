//! Frame rendering.
//!
//! Draws the three-region screen: a header with the file name and load or
//! position indicator, the document body fed by the pager, and a footer with
//! key hints.

pub mod theme;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::pager::Viewport;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header: file name and progress
            Constraint::Min(1),    // Document body
            Constraint::Length(1), // Footer: key hints
        ])
        .split(frame.area());

    render_body(frame, chunks[1], app);
    render_header(frame, chunks[0], app);
    render_footer(frame, chunks[2]);
}

fn render_body(frame: &mut Frame, area: Rect, app: &mut App) {
    let viewport = Viewport {
        width: area.width,
        height: area.height as usize,
    };
    app.set_viewport(viewport);
    app.pager.tick(viewport);

    let rows = app.pager.visible_rows(viewport.height);
    frame.render_widget(Paragraph::new(Text::from(rows)), area);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let name = app.session.file_name();
    let indicator = if app.session.is_loading() {
        format!("loading {:.0}%", app.session.progress() * 100.0)
    } else {
        let position = app.pager.position_fraction(app.viewport().height);
        format!("{:.0}%", position * 100.0)
    };

    let pad = (area.width as usize)
        .saturating_sub(name.width() + indicator.width())
        .max(1);
    let line = Line::from(vec![
        Span::styled(
            name.to_string(),
            Style::new()
                .fg(theme::COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(pad)),
        Span::styled(indicator, Style::new().fg(theme::COLOR_PROGRESS)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = Line::from(Span::styled(
        " ↑/↓ scroll   PgUp/PgDn page   g/G top/bottom   q quit",
        Style::new().fg(theme::COLOR_HINT),
    ));
    frame.render_widget(Paragraph::new(hints), area);
}
