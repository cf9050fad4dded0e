use tui_memory::core::{
    AggregateStats, GameController, GameSnapshot, ManualClock, MemoryStore, Overlay, Persistence,
    WinSummary,
};
use tui_memory::term::{AnchorY, FrameBuffer, GameView, Palette, Viewport, CARD_GAP, CARD_W};
use tui_memory::types::{Difficulty, Theme};

fn snapshot(difficulty: Difficulty) -> GameSnapshot {
    GameController::new(
        difficulty,
        Theme::Gaming,
        1,
        Persistence::new(MemoryStore::new()),
        ManualClock::new(0),
    )
    .unwrap()
    .snapshot()
}

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_board_frame_corners() {
    let snap = snapshot(Difficulty::Easy);
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    // Easy: 4 cards of 6 columns + 3 gaps + 4 frame columns = 31 wide,
    // 4 cards of 3 rows + 2 frame rows = 14 tall.
    let fb = view.render(&snap, Viewport::new(31, 14));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(30, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 13).unwrap().ch, '└');
    assert_eq!(fb.get(30, 13).unwrap().ch, '┘');
}

#[test]
fn term_view_centers_board_by_default() {
    let snap = snapshot(Difficulty::Easy);
    let fb = GameView::default().render(&snap, Viewport::new(31, 20));
    // start_y = (20 - 14) / 2 = 3
    assert_eq!(fb.get(0, 3).unwrap().ch, '┌');
}

#[test]
fn term_view_draws_face_down_cards_with_cursor() {
    let snap = snapshot(Difficulty::Easy);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(31, 14));

    // Card 0 sits at (2,1) and carries the cursor's double border.
    assert_eq!(fb.get(2, 1).unwrap().ch, '╔');
    assert_eq!(fb.get(3, 2).unwrap().ch, '░');

    // Card 1 has a plain border.
    let x1 = 2 + CARD_W + CARD_GAP;
    assert_eq!(fb.get(x1, 1).unwrap().ch, '┌');
}

#[test]
fn term_view_shows_face_up_symbols() {
    let mut snap = snapshot(Difficulty::Easy);
    snap.cards[0].face_up = true;
    snap.cursor = 5;
    let symbol = Theme::Gaming.symbol(snap.cards[0].symbol).unwrap();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(31, 14));
    assert_eq!(fb.get(4, 2).unwrap().ch, symbol);
    assert!(fb.get(5, 2).unwrap().is_continuation());

    let ascii = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .with_ascii(true)
        .render(&snap, Viewport::new(31, 14));
    let letter = (b'A' + snap.cards[0].symbol) as char;
    assert_eq!(ascii.get(4, 2).unwrap().ch, letter);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = snapshot(Difficulty::Medium);
    snap.moves = 7;
    snap.matched_pairs = 3;
    snap.elapsed_secs = 75;
    snap.best.best_moves = Some(12);

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    let all = screen_text(&fb);
    assert!(all.contains("MEMORY"));
    assert!(all.contains("Medium 4x5"));
    assert!(all.contains("gaming"));
    assert!(all.contains("3 / 10"));
    assert!(all.contains("30%"));
    assert!(all.contains("01:15"));
    assert!(all.contains("--:--"));
    assert!(all.contains("12"));
}

#[test]
fn term_view_hides_panel_on_narrow_viewports() {
    let snap = snapshot(Difficulty::Medium);
    let fb = GameView::default().render(&snap, Viewport::new(40, 24));
    assert!(!screen_text(&fb).contains("MOVES"));
}

#[test]
fn term_view_win_overlay() {
    let mut snap = snapshot(Difficulty::Easy);
    snap.overlay = Overlay::WinSummary(WinSummary {
        difficulty: Difficulty::Easy,
        elapsed_secs: 42,
        moves: 11,
        new_best_time: true,
        new_best_moves: false,
    });

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    let all = screen_text(&fb);
    assert!(all.contains("YOU WIN!"));
    assert!(all.contains("00:42"));
    assert!(all.contains("NEW RECORD!"));
    assert!(all.contains("best time"));
    assert!(!all.contains("best moves"));
    // No cursor highlight while a modal is up: card 0 keeps a plain corner.
    // Board frame starts at (24, 5), so card 0 is at (26, 6).
    assert_eq!(fb.get(26, 6).unwrap().ch, '┌');
}

#[test]
fn term_view_stats_overlay() {
    let mut snap = snapshot(Difficulty::Easy);
    snap.overlay = Overlay::Stats;
    snap.stats = AggregateStats {
        games_played: 3,
        games_won: 2,
        total_moves: 40,
    };

    let all = screen_text(&GameView::default().render(&snap, Viewport::new(80, 24)));
    assert!(all.contains("STATISTICS"));
    assert!(all.contains("67%"));
    assert!(all.contains("40"));
}

#[test]
fn term_view_palette_follows_dark_mode() {
    let mut snap = snapshot(Difficulty::Easy);
    let view = GameView::default();

    snap.dark_mode = false;
    let light = view.render(&snap, Viewport::new(40, 20));
    assert_eq!(light.get(0, 0).unwrap().style.bg, Palette::LIGHT.background);

    snap.dark_mode = true;
    let dark = view.render(&snap, Viewport::new(40, 20));
    assert_eq!(dark.get(0, 0).unwrap().style.bg, Palette::DARK.background);
}

#[test]
fn hit_test_maps_cells_to_cards() {
    let snap = snapshot(Difficulty::Easy);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(31, 14);

    assert_eq!(view.hit_test(&snap, vp, 2, 1), Some(0));
    assert_eq!(view.hit_test(&snap, vp, 7, 3), Some(0));
    // Gap column between card 0 and card 1.
    assert_eq!(view.hit_test(&snap, vp, 8, 2), None);
    assert_eq!(view.hit_test(&snap, vp, 9, 2), Some(1));
    // Second row, last column.
    assert_eq!(view.hit_test(&snap, vp, 2 + 3 * (CARD_W + CARD_GAP), 4), Some(7));
    // Frame and outside.
    assert_eq!(view.hit_test(&snap, vp, 0, 0), None);
    assert_eq!(view.hit_test(&snap, vp, 30, 13), None);
}

#[test]
fn render_into_reuses_framebuffer() {
    let snap = snapshot(Difficulty::Hard);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(10, 10);
    view.render_into(&snap, Viewport::new(80, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (80, 24));
}

#[test]
fn modal_contains_tracks_the_open_modal() {
    let mut snap = snapshot(Difficulty::Easy);
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    assert!(!view.modal_contains(&snap, vp, 30, 10));

    // Board frame is 31x14 at (24, 5); the 24x10 stats modal centers at (27, 7).
    snap.overlay = Overlay::Stats;
    assert!(view.modal_contains(&snap, vp, 27, 7));
    assert!(view.modal_contains(&snap, vp, 50, 16));
    assert!(!view.modal_contains(&snap, vp, 26, 7));
    assert!(!view.modal_contains(&snap, vp, 51, 7));
    assert!(!view.modal_contains(&snap, vp, 27, 17));

    let fb = view.render(&snap, vp);
    assert_eq!(fb.get(27, 7).unwrap().ch, '╔');
}
