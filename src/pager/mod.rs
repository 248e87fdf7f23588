//! Windowed pagination engine.
//!
//! Owns the growing, append-only line sequence and presents a bounded-memory
//! window over it: fixed-capacity pages are mounted as the viewport
//! approaches their index and unmounted once it moves away, so at most
//! [`MAX_RESIDENT_PAGES`] pages are ever resident no matter how large the
//! document grows. Page fill is budgeted to roughly one screenful per tick,
//! and pulling more data from the producer happens through the single-shot
//! load-more token carried by each batch.

mod page;
mod sentinel;

pub use page::{Page, LINES_PER_PAGE};
pub use sentinel::{Sentinel, END_SKELETON_LINES, START_SKELETON_LINES};

use ratatui::text::Line;
use tracing::debug;

use crate::models::JsonLine;
use crate::render::RenderedLine;
use crate::stream::{AckToken, StreamStats};

/// Hard bound on concurrently mounted pages.
pub const MAX_RESIDENT_PAGES: usize = 3;

/// Extra rows filled past the viewport bottom each tick, so scrolling into
/// nearby content never waits on rendering.
pub const FILL_LOOKAHEAD_ROWS: usize = 50;

/// Renderer injected into the pager; production code passes
/// [`crate::render::render_line`], tests pass fixed-height stubs.
pub type LineRenderer = Box<dyn Fn(&JsonLine, u16) -> RenderedLine + Send>;

/// Which edge of the resident window a page is being mounted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// Viewport geometry for one tick.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u16,
    pub height: usize,
}

pub struct Pager {
    /// The global line sequence. Append-only, single-writer.
    lines: Vec<JsonLine>,
    /// Resident pages, sorted by index.
    pages: Vec<Page>,
    /// Latest load-more token; replaced on every append, fired at most once.
    load_more: Option<AckToken>,
    /// Known once the whole stream has arrived.
    last_page_index: Option<usize>,
    start_sentinel: Sentinel,
    end_sentinel: Sentinel,
    /// Scroll offset in rows from the top of the resident extent.
    scroll_top: usize,
    width: u16,
    renderer: LineRenderer,
    /// Extrapolated total line count while loading; exact once sealed.
    estimated_total_lines: usize,
}

impl Pager {
    pub fn new(renderer: LineRenderer) -> Self {
        Self {
            lines: Vec::new(),
            pages: Vec::new(),
            load_more: None,
            last_page_index: None,
            start_sentinel: Sentinel::new(START_SKELETON_LINES),
            end_sentinel: Sentinel::new(END_SKELETON_LINES),
            scroll_top: 0,
            width: 80,
            renderer,
            estimated_total_lines: 0,
        }
    }

    /// Deterministic sentinels for tests.
    pub fn with_sentinel_seed(renderer: LineRenderer, seed: u64) -> Self {
        let mut pager = Self::new(renderer);
        pager.start_sentinel = Sentinel::with_seed(START_SKELETON_LINES, seed);
        pager.end_sentinel = Sentinel::with_seed(END_SKELETON_LINES, seed.wrapping_add(1));
        pager
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    /// The full line sequence accumulated so far.
    pub fn lines(&self) -> &[JsonLine] {
        &self.lines
    }

    pub fn last_page_index(&self) -> Option<usize> {
        self.last_page_index
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Indexes of the currently resident pages, in order.
    pub fn resident_pages(&self) -> Vec<usize> {
        self.pages.iter().map(|p| p.index).collect()
    }

    /// Concatenate a batch onto the line sequence and store its load-more
    /// token, replacing the previous one. Pages mounted before their range
    /// had fully arrived re-derive their slice; the new rows materialize on
    /// the next tick. The first batch triggers the initial page.
    pub fn append_lines(&mut self, new_lines: Vec<JsonLine>, ack: AckToken, stats: StreamStats, file_size: u64) {
        self.lines.extend(new_lines);
        self.load_more = Some(ack);

        if let Some(estimate) = stats.estimate_total_lines(self.lines.len(), file_size) {
            self.estimated_total_lines = estimate;
        }

        for page in &mut self.pages {
            if page.lines.len() < LINES_PER_PAGE {
                let slice = page_slice(&self.lines, page.index);
                page.replace_lines(slice);
            }
        }

        if file_size > 0 && stats.processed_bytes >= file_size {
            self.seal();
        }

        if self.pages.is_empty() {
            debug!(lines = self.lines.len(), "first batch, mounting page 0");
            self.load_page(0, self.last_page_index == Some(0), Edge::End);
        }
    }

    /// Fix the final page index: no more lines will ever arrive.
    pub fn seal(&mut self) {
        let last = if self.lines.is_empty() {
            0
        } else {
            (self.lines.len() - 1) / LINES_PER_PAGE
        };
        self.last_page_index = Some(last);
        self.estimated_total_lines = self.lines.len();
    }

    /// Fire the stored load-more token, if any. Used directly when the
    /// stream reports end-of-file so the final truncation-detecting batch is
    /// always pulled.
    pub fn ack_load_more(&mut self) {
        if let Some(mut token) = self.load_more.take() {
            token.ack();
        }
    }

    /// Mount the page at `index` on the given edge. Pulls more input first
    /// if the page's range has not fully arrived. Returns the rows the new
    /// page contributed above the viewport (zero for end-edge mounts, which
    /// fill incrementally on later ticks).
    pub fn load_page(&mut self, index: usize, is_last: bool, edge: Edge) -> usize {
        debug!(page = index, ?edge, "loading page");
        if self.lines.len() < (index + 1) * LINES_PER_PAGE {
            self.ack_load_more();
        }

        let mut page = Page::new(index, page_slice(&self.lines, index));
        let added = match edge {
            Edge::Start => {
                page.render_all(&self.renderer, self.width);
                page.height()
            }
            Edge::End => 0,
        };
        self.pages.push(page);
        self.pages.sort_by_key(|p| p.index);

        if !is_last {
            self.end_sentinel.mount();
        }
        if self.pages[0].index > 0 && !self.start_sentinel.is_mounted() {
            self.start_sentinel.mount();
            // the skeleton block appears above the viewport; compensate so
            // the visible content does not jump
            self.scroll_top += self.start_sentinel.height();
        }
        added
    }

    /// Unmount the start sentinel, removing its skeleton rows from above the
    /// viewport without moving the visible content. It mounts again if page
    /// eviction later pushes the resident window off the document start.
    fn unmount_start_sentinel(&mut self) {
        if self.start_sentinel.is_mounted() {
            self.scroll_top = self.scroll_top.saturating_sub(self.start_sentinel.height());
        }
        self.start_sentinel.unmount();
    }

    /// The viewport reached the start sentinel: evict the farthest page if
    /// the residency bound requires it, then mount the previous page above
    /// the viewport, compensating the scroll offset so the visible content
    /// does not move.
    pub fn on_reach_list_start(&mut self) {
        if self.pages.len() >= MAX_RESIDENT_PAGES {
            self.unload_page_at(self.pages.len() - 1);
        }
        let Some(first) = self.pages.first() else {
            return;
        };
        if first.index == 0 {
            self.unmount_start_sentinel();
            return;
        }
        let prev = first.index - 1;
        let added = self.load_page(prev, self.last_page_index == Some(prev), Edge::Start);
        self.scroll_top += added;
        if prev == 0 {
            self.unmount_start_sentinel();
        }
    }

    /// The viewport reached the end sentinel: evict the farthest page if
    /// needed, then mount the next page, pulling more input first when its
    /// range has not arrived. At the true last page the sentinel unmounts;
    /// it comes back once eviction moves the window away from the end.
    pub fn on_reach_list_end(&mut self) {
        if self.pages.len() >= MAX_RESIDENT_PAGES {
            self.unload_page_at(0);
        }
        let Some(last) = self.pages.last() else {
            return;
        };
        let next = last.index + 1;
        if let Some(final_index) = self.last_page_index {
            if next > final_index {
                self.end_sentinel.unmount();
                return;
            }
        }
        if next * LINES_PER_PAGE >= self.lines.len() {
            // the page's range has not arrived at all; pull and let a later
            // tick mount it once lines exist
            self.ack_load_more();
            return;
        }
        self.load_page(next, self.last_page_index == Some(next), Edge::End);
    }

    fn unload_page_at(&mut self, slot: usize) {
        let page = self.pages.remove(slot);
        debug!(page = page.index, "unloaded page");
        if slot == 0 {
            // content above the viewport disappeared; keep the view stable
            self.scroll_top = self.scroll_top.saturating_sub(page.height());
        }
    }

    /// One render tick: budget-fill pages near the viewport, then check
    /// sentinel proximity and clamp the scroll offset. Safe to call every
    /// frame; all triggered work is idempotent.
    pub fn tick(&mut self, viewport: Viewport) {
        self.width = viewport.width;
        self.fill_pages(viewport.height);

        if self.start_sentinel.is_mounted() && self.scroll_top < self.start_sentinel.height() {
            self.on_reach_list_start();
        }
        if self.end_sentinel.is_mounted() {
            let total = self.total_extent();
            let end_top = total.saturating_sub(self.end_sentinel.height());
            if end_top < self.scroll_top + viewport.height {
                self.on_reach_list_end();
            }
        }
        self.fill_pages(viewport.height);
        self.clamp_scroll(viewport.height);
    }

    /// Materialize pending lines of resident pages up to the viewport
    /// bottom plus the lookahead margin. Per-tick work stays proportional to
    /// the screen, never to the document.
    fn fill_pages(&mut self, viewport_height: usize) {
        let limit = self.scroll_top + viewport_height + FILL_LOOKAHEAD_ROWS;
        let mut y = self.start_sentinel.height();
        for page in &mut self.pages {
            if !page.is_filled() {
                let bottom = y + page.height();
                if bottom < limit {
                    page.render_budgeted(limit - bottom, &self.renderer, self.width);
                }
            }
            y += page.height();
        }
    }

    /// Total extent of the resident window in rows.
    pub fn total_extent(&self) -> usize {
        self.start_sentinel.height()
            + self.pages.iter().map(|p| p.height()).sum::<usize>()
            + self.end_sentinel.height()
    }

    /// Scroll by a signed number of rows, clamped to the resident extent.
    pub fn scroll_by(&mut self, delta: i64, viewport_height: usize) {
        let max = self.total_extent().saturating_sub(viewport_height) as i64;
        let next = (self.scroll_top as i64 + delta).clamp(0, max.max(0));
        self.scroll_top = next as usize;
    }

    fn clamp_scroll(&mut self, viewport_height: usize) {
        let max = self.total_extent().saturating_sub(viewport_height);
        if self.scroll_top > max {
            self.scroll_top = max;
        }
    }

    /// The rows currently on screen, top to bottom.
    pub fn visible_rows(&self, viewport_height: usize) -> Vec<Line<'static>> {
        let mut out = Vec::with_capacity(viewport_height);
        let mut skip = self.scroll_top;

        if self.start_sentinel.is_mounted() {
            self.push_skeleton(&self.start_sentinel, &mut out, &mut skip, viewport_height);
        }
        for page in &self.pages {
            for row in page.rows() {
                if out.len() >= viewport_height {
                    return out;
                }
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                out.push(row.clone());
            }
        }
        if self.end_sentinel.is_mounted() {
            self.push_skeleton(&self.end_sentinel, &mut out, &mut skip, viewport_height);
        }
        out
    }

    fn push_skeleton(
        &self,
        sentinel: &Sentinel,
        out: &mut Vec<Line<'static>>,
        skip: &mut usize,
        limit: usize,
    ) {
        for line in sentinel.skeleton() {
            let rendered = (self.renderer)(line, self.width);
            for row in rendered.rows {
                if out.len() >= limit {
                    return;
                }
                if *skip > 0 {
                    *skip -= 1;
                    continue;
                }
                out.push(row);
            }
        }
    }

    /// Fractional global position (0 at the top of the document, 1 at the
    /// bottom), derived from the extrapolated total while the true length is
    /// unknown. Approximate by design.
    pub fn position_fraction(&self, viewport_height: usize) -> f64 {
        let (extrapolated_rows, covered_lines) = self
            .pages
            .iter()
            .fold((0usize, 0usize), |(rows, lines), p| {
                (rows + p.estimated_height(), lines + p.lines.len())
            });
        let avg_row_height = if covered_lines == 0 {
            1.0
        } else {
            extrapolated_rows as f64 / covered_lines as f64
        };

        let lines_before = self.pages.first().map_or(0, |p| p.index * LINES_PER_PAGE);
        let total_lines = self.estimated_total_lines.max(self.lines.len()).max(1);
        let total_rows = total_lines as f64 * avg_row_height;

        let within = self
            .scroll_top
            .saturating_sub(self.start_sentinel.height());
        let absolute_top = lines_before as f64 * avg_row_height + within as f64;
        let denominator = (total_rows - viewport_height as f64).max(1.0);
        (absolute_top / denominator).clamp(0.0, 1.0)
    }

    /// Drop every page, sentinel and pending callback; the session is over.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.pages.clear();
        self.load_more = None;
        self.last_page_index = None;
        self.start_sentinel.unmount();
        self.end_sentinel.unmount();
        self.scroll_top = 0;
        self.estimated_total_lines = 0;
    }
}

fn page_slice(lines: &[JsonLine], index: usize) -> Vec<JsonLine> {
    let start = (index * LINES_PER_PAGE).min(lines.len());
    let end = ((index + 1) * LINES_PER_PAGE).min(lines.len());
    lines[start..end].to_vec()
}
