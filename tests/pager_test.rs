//! Pagination engine behavior over large documents.

use ratatui::text::Line;
use treeline::models::{JsonLine, JsonPrimitive, Key};
use treeline::pager::{Pager, Viewport, LINES_PER_PAGE, MAX_RESIDENT_PAGES};
use treeline::render::RenderedLine;
use treeline::stream::{AckToken, StreamStats};

const VIEW: Viewport = Viewport {
    width: 80,
    height: 40,
};

fn unit_renderer() -> Box<dyn Fn(&JsonLine, u16) -> RenderedLine + Send> {
    Box::new(|_, _| RenderedLine {
        rows: vec![Line::raw("x")],
    })
}

fn property(i: u64) -> JsonLine {
    JsonLine::Property {
        level: 0,
        key: Key::Index(i),
        value: JsonPrimitive::Number(i as f64),
    }
}

fn lines(n: usize) -> Vec<JsonLine> {
    (0..n as u64).map(property).collect()
}

fn stats(bytes: u64) -> StreamStats {
    let mut s = StreamStats::default();
    s.record_chunk(bytes as usize);
    s
}

fn loaded_pager(total_lines: usize) -> Pager {
    let mut pager = Pager::with_sentinel_seed(unit_renderer(), 7);
    pager.append_lines(lines(total_lines), AckToken::spent(), stats(1000), 1000);
    pager
}

#[test]
fn test_deep_scroll_mounts_distant_page_with_bounded_residency() {
    let mut pager = loaded_pager(10_000);
    assert_eq!(pager.last_page_index(), Some(99));

    let mut reached = false;
    for _ in 0..5_000 {
        pager.scroll_by(100, VIEW.height);
        pager.tick(VIEW);
        let resident = pager.resident_pages();
        assert!(
            resident.len() <= MAX_RESIDENT_PAGES,
            "residency bound violated: {:?}",
            resident
        );
        // early pages must be long gone by the time the window is deep
        if resident.contains(&95) {
            assert!(!resident.contains(&0));
            assert!(!resident.contains(&93));
            reached = true;
            break;
        }
    }
    assert!(reached, "page 95 never became resident");
}

#[test]
fn test_last_page_index_from_byte_completion() {
    let mut pager = Pager::with_sentinel_seed(unit_renderer(), 7);
    // all bytes processed: the document length is final
    pager.append_lines(lines(250), AckToken::spent(), stats(1000), 1000);
    assert_eq!(pager.last_page_index(), Some((250usize.div_ceil(LINES_PER_PAGE)) - 1));

    let mut partial = Pager::with_sentinel_seed(unit_renderer(), 7);
    partial.append_lines(lines(250), AckToken::spent(), stats(400), 1000);
    assert_eq!(partial.last_page_index(), None, "length unknown mid-stream");
}

#[test]
fn test_latest_load_more_callback_wins() {
    let mut pager = Pager::with_sentinel_seed(unit_renderer(), 7);
    let (first, mut first_rx) = AckToken::arm();
    pager.append_lines(lines(100), first, stats(100), 1000);
    pager.ack_load_more();
    assert!(first_rx.try_recv().is_ok());

    let (second, mut second_rx) = AckToken::arm();
    pager.append_lines(lines(100), second, stats(200), 1000);
    let (third, mut third_rx) = AckToken::arm();
    pager.append_lines(lines(100), third, stats(300), 1000);

    pager.ack_load_more();
    assert!(third_rx.try_recv().is_ok(), "latest callback must fire");
    assert!(second_rx.try_recv().is_err(), "stale callback must not fire");
}

#[test]
fn test_scroll_to_end_and_back_round_trip() {
    let mut pager = loaded_pager(1_000);
    for _ in 0..2_000 {
        pager.scroll_by(40, VIEW.height);
        pager.tick(VIEW);
    }
    assert!(pager.resident_pages().contains(&9));

    for _ in 0..2_000 {
        pager.scroll_by(-40, VIEW.height);
        pager.tick(VIEW);
    }
    assert_eq!(pager.scroll_top(), 0);
    assert!(pager.resident_pages().contains(&0));
}

#[test]
fn test_visible_rows_bounded_by_viewport() {
    let mut pager = loaded_pager(500);
    pager.tick(VIEW);
    assert!(pager.visible_rows(VIEW.height).len() <= VIEW.height);

    for _ in 0..50 {
        pager.scroll_by(17, VIEW.height);
        pager.tick(VIEW);
        assert!(pager.visible_rows(VIEW.height).len() <= VIEW.height);
    }
}

#[test]
fn test_short_final_page_mounts_with_remainder() {
    let mut pager = loaded_pager(130);
    for _ in 0..200 {
        pager.scroll_by(20, VIEW.height);
        pager.tick(VIEW);
    }
    let resident = pager.resident_pages();
    assert!(resident.contains(&1), "short final page missing: {:?}", resident);
    // 130 lines at one row each: extent settles to the document itself
    assert_eq!(pager.total_extent(), 130);
}
