//! A fixed-capacity window over the global line sequence.

use crate::models::JsonLine;
use crate::render::RenderedLine;

use super::LineRenderer;

/// Capacity of one page in display lines.
pub const LINES_PER_PAGE: usize = 100;

/// A contiguous slice of the line sequence with its own materialization
/// lifecycle. Pages are created as the viewport approaches their index and
/// destroyed once it moves far enough away; the underlying lines stay in the
/// global sequence either way.
pub struct Page {
    pub index: usize,
    /// Frozen copy of this page's slice; re-derived when new lines land
    /// under a page that was created before its range had fully arrived.
    pub lines: Vec<JsonLine>,
    rendered: Vec<RenderedLine>,
    height: usize,
}

impl Page {
    pub fn new(index: usize, lines: Vec<JsonLine>) -> Self {
        debug_assert!(lines.len() <= LINES_PER_PAGE);
        Self {
            index,
            lines,
            rendered: Vec::new(),
            height: 0,
        }
    }

    /// Measured extent of the materialized content, in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rendered_count(&self) -> usize {
        self.rendered.len()
    }

    /// Whether every line of the page has been materialized.
    pub fn is_filled(&self) -> bool {
        self.rendered.len() >= self.lines.len()
    }

    /// Replace the line slice after new data arrived. Lines are append-only,
    /// so the already-rendered prefix stays valid.
    pub fn replace_lines(&mut self, lines: Vec<JsonLine>) {
        debug_assert!(lines.len() >= self.lines.len());
        self.lines = lines;
    }

    /// Materialize every remaining line at once. Used when a page is
    /// inserted above the viewport so its full height is known immediately.
    pub fn render_all(&mut self, renderer: &LineRenderer, width: u16) {
        while self.rendered.len() < self.lines.len() {
            let rendered = renderer(&self.lines[self.rendered.len()], width);
            self.height += rendered.height();
            self.rendered.push(rendered);
        }
    }

    /// Materialize lines one at a time until `budget` rows have been added
    /// or the page runs out of lines. Returns the rows actually added.
    pub fn render_budgeted(&mut self, budget: usize, renderer: &LineRenderer, width: u16) -> usize {
        let mut filled = 0;
        while self.rendered.len() < self.lines.len() {
            if filled >= budget {
                break;
            }
            let rendered = renderer(&self.lines[self.rendered.len()], width);
            filled += rendered.height();
            self.height += rendered.height();
            self.rendered.push(rendered);
        }
        filled
    }

    /// Estimated full extent, extrapolated from the materialized portion.
    pub fn estimated_height(&self) -> usize {
        if self.rendered.is_empty() {
            return self.lines.len();
        }
        (self.height * self.lines.len()).div_ceil(self.rendered.len())
    }

    /// Iterate the materialized rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &ratatui::text::Line<'static>> {
        self.rendered.iter().flat_map(|r| r.rows.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JsonPrimitive, Key};
    use crate::render::render_line;

    fn renderer() -> LineRenderer {
        Box::new(render_line)
    }

    fn property(i: u64) -> JsonLine {
        JsonLine::Property {
            level: 0,
            key: Key::Index(i),
            value: JsonPrimitive::Number(i as f64),
        }
    }

    #[test]
    fn test_render_all_measures_height() {
        let mut page = Page::new(0, (0..10).map(property).collect());
        page.render_all(&renderer(), 80);
        assert!(page.is_filled());
        assert_eq!(page.height(), 10);
        assert_eq!(page.rows().count(), 10);
    }

    #[test]
    fn test_budgeted_fill_stops_at_budget() {
        let mut page = Page::new(0, (0..50).map(property).collect());
        let added = page.render_budgeted(20, &renderer(), 80);
        assert_eq!(added, 20);
        assert_eq!(page.rendered_count(), 20);
        assert!(!page.is_filled());

        // a later tick continues where the previous one stopped
        page.render_budgeted(100, &renderer(), 80);
        assert!(page.is_filled());
        assert_eq!(page.height(), 50);
    }

    #[test]
    fn test_replace_lines_keeps_rendered_prefix() {
        let mut page = Page::new(0, (0..5).map(property).collect());
        page.render_all(&renderer(), 80);
        page.replace_lines((0..30).map(property).collect());
        assert_eq!(page.rendered_count(), 5);
        assert!(!page.is_filled());
    }

    #[test]
    fn test_estimated_height_extrapolates() {
        let mut page = Page::new(0, (0..100).map(property).collect());
        page.render_budgeted(10, &renderer(), 80);
        // 10 rendered rows over 10 lines extrapolates to 100
        assert_eq!(page.estimated_height(), 100);
    }
}
