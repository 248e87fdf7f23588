//! Line rendering sink.
//!
//! Maps a [`JsonLine`] to styled terminal rows. The pager never inspects the
//! result beyond its measured height, so alternative renderers (tests use a
//! fixed-height one) are freely substitutable.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

use crate::models::{ContainerKind, JsonLine, JsonPrimitive, Key};
use crate::ui::theme;

/// Columns occupied per nesting level.
const INDENT_WIDTH: usize = 2;

/// One materialized display line: its terminal rows and measured height.
#[derive(Debug, Clone)]
pub struct RenderedLine {
    pub rows: Vec<Line<'static>>,
}

impl RenderedLine {
    /// Measured extent in terminal rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Render one display line at the given viewport width, wrapping long
/// content onto continuation rows.
pub fn render_line(line: &JsonLine, width: u16) -> RenderedLine {
    let indent = indent_spans(line.level());
    let indent_cols = line.level() as usize * INDENT_WIDTH;
    let content_width = (width as usize).saturating_sub(indent_cols).max(1);

    let content: Vec<Span<'static>> = match line {
        JsonLine::Open { kind, key, .. } => {
            let mut spans = key_spans(key);
            // only array delimiters are shown, mirroring the flatten policy
            if *kind == ContainerKind::Array {
                spans.push(Span::styled(
                    kind.open_delimiter().to_string(),
                    Style::new()
                        .fg(theme::COLOR_DELIMITER)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            spans
        }
        JsonLine::Close { kind, .. } => vec![Span::styled(
            kind.close_delimiter().to_string(),
            Style::new()
                .fg(theme::COLOR_DELIMITER)
                .add_modifier(Modifier::BOLD),
        )],
        JsonLine::Property { key, value, .. } => {
            let mut spans = key_spans(key);
            spans.push(Span::styled(value.to_string(), value_style(value)));
            spans
        }
        JsonLine::Error { message, .. } => vec![Span::styled(
            format!("⚠ {}", message),
            Style::new().fg(theme::COLOR_ERROR),
        )],
        JsonLine::Placeholder { width_pct, .. } => {
            let bar = content_width * (*width_pct as usize).min(100) / 100;
            vec![Span::styled(
                "░".repeat(bar.max(1)),
                Style::new().fg(theme::COLOR_DIM),
            )]
        }
    };

    RenderedLine {
        rows: flow(indent, content, content_width),
    }
}

fn indent_spans(level: u16) -> Vec<Span<'static>> {
    (0..level)
        .map(|_| Span::styled("│ ", Style::new().fg(theme::COLOR_DIM)))
        .collect()
}

fn key_spans(key: &Key) -> Vec<Span<'static>> {
    match key {
        Key::Name(name) => vec![Span::styled(
            format!("{}: ", name),
            Style::new().fg(theme::COLOR_KEY),
        )],
        Key::Index(index) => vec![Span::styled(
            format!("{}: ", index),
            Style::new().fg(theme::COLOR_INDEX),
        )],
        Key::None => Vec::new(),
    }
}

fn value_style(value: &JsonPrimitive) -> Style {
    match value {
        JsonPrimitive::Str(_) => Style::new().fg(theme::COLOR_STRING),
        JsonPrimitive::Null | JsonPrimitive::Bool(_) => Style::new()
            .fg(theme::COLOR_SCALAR)
            .add_modifier(Modifier::ITALIC),
        JsonPrimitive::Number(_) => Style::new().fg(theme::COLOR_SCALAR),
    }
}

/// Flow styled content into rows of at most `content_width` columns, each
/// row prefixed with the indent guides.
fn flow(
    indent: Vec<Span<'static>>,
    content: Vec<Span<'static>>,
    content_width: usize,
) -> Vec<Line<'static>> {
    let mut rows: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = indent.clone();
    let mut used = 0usize;
    let mut pending = String::new();
    let mut pending_style = Style::new();

    let mut close_pending = |current: &mut Vec<Span<'static>>, pending: &mut String, style| {
        if !pending.is_empty() {
            current.push(Span::styled(std::mem::take(pending), style));
        }
    };

    for span in content {
        pending_style = span.style;
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > content_width && used > 0 {
                close_pending(&mut current, &mut pending, pending_style);
                rows.push(Line::from(std::mem::take(&mut current)));
                current = indent.clone();
                used = 0;
            }
            pending.push(c);
            used += w;
        }
        close_pending(&mut current, &mut pending, pending_style);
    }
    close_pending(&mut current, &mut pending, pending_style);
    rows.push(Line::from(current));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_property_renders_key_and_value() {
        let line = JsonLine::Property {
            level: 1,
            key: Key::Name("name".to_string()),
            value: JsonPrimitive::Str("zig".to_string()),
        };
        let rendered = render_line(&line, 80);
        assert_eq!(rendered.height(), 1);
        assert_eq!(row_text(&rendered.rows[0]), "│ name: \"zig\"");
    }

    #[test]
    fn test_object_open_shows_key_without_brace() {
        let line = JsonLine::Open {
            kind: ContainerKind::Object,
            level: 0,
            key: Key::Name("user".to_string()),
        };
        let rendered = render_line(&line, 80);
        assert_eq!(row_text(&rendered.rows[0]), "user: ");
    }

    #[test]
    fn test_array_open_shows_bracket() {
        let line = JsonLine::Open {
            kind: ContainerKind::Array,
            level: 0,
            key: Key::Name("items".to_string()),
        };
        let rendered = render_line(&line, 80);
        assert_eq!(row_text(&rendered.rows[0]), "items: [");
    }

    #[test]
    fn test_long_value_wraps_and_reports_height() {
        let line = JsonLine::Property {
            level: 0,
            key: Key::None,
            value: JsonPrimitive::Str("x".repeat(100)),
        };
        let rendered = render_line(&line, 40);
        assert!(rendered.height() > 1, "102 columns must wrap at width 40");
        for row in &rendered.rows {
            assert!(row_text(row).chars().count() <= 40);
        }
    }

    #[test]
    fn test_placeholder_bar_scales_with_percentage() {
        let line = JsonLine::Placeholder {
            level: 0,
            width_pct: 50,
        };
        let rendered = render_line(&line, 40);
        assert_eq!(row_text(&rendered.rows[0]).chars().count(), 20);
    }

    #[test]
    fn test_index_key_renders_dim_prefix() {
        let line = JsonLine::Property {
            level: 2,
            key: Key::Index(7),
            value: JsonPrimitive::Number(1.0),
        };
        let rendered = render_line(&line, 80);
        assert_eq!(row_text(&rendered.rows[0]), "│ │ 7: 1");
    }
}
