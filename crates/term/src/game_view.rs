//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::snapshot::{CardSnapshot, GameSnapshot, Overlay, WinSummary};
use crate::core::AggregateStats;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Difficulty, Theme};

/// Card width in terminal columns, border included.
pub const CARD_W: u16 = 6;
/// Card height in terminal rows, border included.
pub const CARD_H: u16 = 3;
/// Blank columns between neighbouring cards.
pub const CARD_GAP: u16 = 1;

const PROGRESS_W: u16 = 10;
const MIN_PANEL_W: u16 = 16;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Colors for one display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub frame: Rgb,
    pub card_back: Rgb,
    pub card_face: Rgb,
    pub card_matched: Rgb,
    pub cursor: Rgb,
    pub accent: Rgb,
    pub overlay: Rgb,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Rgb::new(0, 0, 0),
        text: Rgb::new(220, 220, 220),
        muted: Rgb::new(110, 110, 125),
        frame: Rgb::new(200, 200, 200),
        card_back: Rgb::new(45, 50, 80),
        card_face: Rgb::new(30, 30, 40),
        card_matched: Rgb::new(30, 70, 45),
        cursor: Rgb::new(240, 220, 80),
        accent: Rgb::new(120, 170, 255),
        overlay: Rgb::new(20, 20, 30),
    };

    pub const LIGHT: Palette = Palette {
        background: Rgb::new(240, 240, 245),
        text: Rgb::new(30, 30, 40),
        muted: Rgb::new(140, 140, 150),
        frame: Rgb::new(90, 90, 100),
        card_back: Rgb::new(150, 170, 230),
        card_face: Rgb::new(255, 255, 255),
        card_matched: Rgb::new(190, 235, 200),
        cursor: Rgb::new(220, 120, 0),
        accent: Rgb::new(60, 90, 200),
        overlay: Rgb::new(255, 255, 255),
    };

    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }
}

struct BorderChars {
    tl: char,
    tr: char,
    bl: char,
    br: char,
    h: char,
    v: char,
}

const SINGLE: BorderChars = BorderChars {
    tl: '┌',
    tr: '┐',
    bl: '└',
    br: '┘',
    h: '─',
    v: '│',
};

const DOUBLE: BorderChars = BorderChars {
    tl: '╔',
    tr: '╗',
    bl: '╚',
    br: '╝',
    h: '═',
    v: '║',
};

/// Where the board frame and its cards land for a given grid and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    rows: u8,
    cols: u8,
}

impl BoardLayout {
    fn grid_x(&self) -> u16 {
        self.frame_x + 2
    }

    fn grid_y(&self) -> u16 {
        self.frame_y + 1
    }

    /// Top-left corner of the card at `position`.
    pub fn card_origin(&self, position: u8) -> Option<(u16, u16)> {
        let (rows, cols) = (self.rows as u16, self.cols as u16);
        let pos = position as u16;
        if cols == 0 || pos >= rows * cols {
            return None;
        }
        let (row, col) = (pos / cols, pos % cols);
        Some((
            self.grid_x() + col * (CARD_W + CARD_GAP),
            self.grid_y() + row * CARD_H,
        ))
    }

    /// Card position under a terminal cell, if any.
    pub fn card_at(&self, x: u16, y: u16) -> Option<u8> {
        if x < self.grid_x() || y < self.grid_y() {
            return None;
        }
        let dx = x - self.grid_x();
        let dy = y - self.grid_y();
        if dx % (CARD_W + CARD_GAP) >= CARD_W {
            return None;
        }
        let col = dx / (CARD_W + CARD_GAP);
        let row = dy / CARD_H;
        if col >= self.cols as u16 || row >= self.rows as u16 {
            return None;
        }
        Some((row * self.cols as u16 + col) as u8)
    }
}

/// A terminal renderer for the memory board.
pub struct GameView {
    anchor_y: AnchorY,
    /// Letters instead of emoji, for terminals without wide-glyph support.
    ascii: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
            ascii: false,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> BoardLayout {
        let cols = snap.cols as u16;
        let grid_w = (cols * CARD_W + cols.saturating_sub(1) * CARD_GAP).max(1);
        let frame_w = grid_w + 4;
        let frame_h = snap.rows as u16 * CARD_H + 2;

        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        BoardLayout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            rows: snap.rows,
            cols: snap.cols,
        }
    }

    /// Map a terminal cell to the card drawn there.
    pub fn hit_test(&self, snap: &GameSnapshot, viewport: Viewport, x: u16, y: u16) -> Option<u8> {
        self.layout(snap, viewport)
            .card_at(x, y)
            .filter(|&pos| (pos as usize) < snap.cards.len())
    }

    /// Whether a terminal cell lies inside the modal currently drawn.
    pub fn modal_contains(&self, snap: &GameSnapshot, viewport: Viewport, x: u16, y: u16) -> bool {
        let Some((w, h)) = modal_size(&snap.overlay) else {
            return false;
        };
        let (mx, my) = modal_origin(&self.layout(snap, viewport), w, h);
        x >= mx && x < mx + w && y >= my && y < my + h
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        let p = Palette::for_mode(snap.dark_mode);

        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle::new(p.text, p.background),
        });

        let layout = self.layout(snap, viewport);
        draw_border(
            fb,
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            CellStyle::new(p.frame, p.background),
            &SINGLE,
        );

        let show_cursor = snap.overlay == Overlay::None;
        for (i, card) in snap.cards.iter().enumerate() {
            let position = i as u8;
            let cursor = show_cursor && position == snap.cursor;
            self.draw_card(fb, &layout, position, card, snap.theme, cursor, &p);
        }

        self.draw_side_panel(fb, snap, viewport, &layout, &p);

        match snap.overlay {
            Overlay::None => {}
            Overlay::Stats => draw_stats_overlay(fb, &layout, &snap.stats, &p),
            Overlay::WinSummary(summary) => draw_win_overlay(fb, &layout, &summary, &p),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_card(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        position: u8,
        card: &CardSnapshot,
        theme: Theme,
        cursor: bool,
        p: &Palette,
    ) {
        let Some((x, y)) = layout.card_origin(position) else {
            return;
        };

        let face_bg = if card.matched {
            p.card_matched
        } else if card.face_up {
            p.card_face
        } else {
            p.card_back
        };
        let border = CellStyle {
            fg: if cursor { p.cursor } else { p.frame },
            bg: p.background,
            bold: cursor,
            dim: card.matched && !cursor,
        };
        draw_border(
            fb,
            x,
            y,
            CARD_W,
            CARD_H,
            border,
            if cursor { &DOUBLE } else { &SINGLE },
        );

        let fill = CellStyle::new(p.text, face_bg);
        if !card.face_up {
            fb.fill_rect(x + 1, y + 1, CARD_W - 2, CARD_H - 2, '░', CellStyle::new(p.muted, face_bg));
            return;
        }
        fb.fill_rect(x + 1, y + 1, CARD_W - 2, CARD_H - 2, ' ', fill);

        let style = if card.matched { fill.dim() } else { fill.bold() };
        let (cx, cy) = (x + CARD_W / 2 - 1, y + CARD_H / 2);
        if self.ascii {
            fb.put_char(cx, cy, ascii_symbol(card.symbol), style);
            return;
        }
        match theme.symbol(card.symbol) {
            Some(ch) => fb.put_wide(cx, cy, ch, style),
            None => fb.put_char(cx, cy, '?', style),
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &BoardLayout,
        p: &Palette,
    ) {
        let panel_x = layout
            .frame_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < MIN_PANEL_W {
            return;
        }

        let title = CellStyle::new(p.accent, p.background).bold();
        let label = CellStyle::new(p.muted, p.background).bold();
        let value = CellStyle::new(p.text, p.background);

        let x = panel_x;
        let mut y = layout.frame_y;

        fb.put_str(x, y, "MEMORY", title);
        y = y.saturating_add(2);

        fb.put_str(x, y, "LEVEL", label);
        y = y.saturating_add(1);
        let w = fb_put_str_len(fb, x, y, difficulty_label(snap.difficulty), value);
        let dim = value.dim();
        let w = w + 1 + fb.put_u32(x + w + 1, y, snap.rows as u32, dim);
        fb.put_char(x + w, y, 'x', dim);
        fb.put_u32(x + w + 1, y, snap.cols as u32, dim);
        y = y.saturating_add(1);

        fb.put_str(x, y, "THEME", label);
        y = y.saturating_add(1);
        fb.put_str(x, y, snap.theme.as_str(), value);
        y = y.saturating_add(2);

        fb.put_str(x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(x, y, snap.moves, value);
        y = y.saturating_add(1);

        fb.put_str(x, y, "MATCHES", label);
        y = y.saturating_add(1);
        let w = fb.put_u32(x, y, snap.matched_pairs as u32, value);
        fb.put_str(x + w, y, " / ", value);
        fb.put_u32(x + w + 3, y, snap.pair_count as u32, value);
        y = y.saturating_add(1);

        let percent = snap.progress_percent();
        let filled = (percent as u16 * PROGRESS_W) / 100;
        for i in 0..PROGRESS_W {
            let ch = if i < filled { '█' } else { '░' };
            let style = if i < filled {
                CellStyle::new(p.accent, p.background)
            } else {
                CellStyle::new(p.muted, p.background)
            };
            fb.put_char(x + i, y, ch, style);
        }
        let w = fb.put_u32(x + PROGRESS_W + 1, y, percent as u32, value);
        fb.put_char(x + PROGRESS_W + 1 + w, y, '%', value);
        y = y.saturating_add(2);

        fb.put_str(x, y, "TIME", label);
        y = y.saturating_add(1);
        put_time(fb, x, y, Some(snap.elapsed_secs), value);
        y = y.saturating_add(2);

        fb.put_str(x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_str(x, y, "time ", dim);
        put_time(fb, x + 6, y, snap.best.best_time_secs, value);
        y = y.saturating_add(1);
        fb.put_str(x, y, "moves", dim);
        match snap.best.best_moves {
            Some(m) => {
                fb.put_u32(x + 6, y, m, value);
            }
            None => fb.put_str(x + 6, y, "--", value),
        }
        y = y.saturating_add(2);

        const HELP: [&str; 4] = ["enter flip  n new", "1-3 level  t theme", "m dark  s stats", "q quit"];
        for line in HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, dim);
            y = y.saturating_add(1);
        }
    }
}

fn fb_put_str_len(fb: &mut FrameBuffer, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
    fb.put_str(x, y, s, style);
    s.chars().count() as u16
}

/// `MM:SS`, or `--:--` when absent.
fn put_time(fb: &mut FrameBuffer, x: u16, y: u16, secs: Option<u32>, style: CellStyle) {
    let Some(secs) = secs else {
        fb.put_str(x, y, "--:--", style);
        return;
    };
    let (mins, secs) = (secs / 60, secs % 60);
    let mut cx = x;
    if mins < 10 {
        fb.put_char(cx, y, '0', style);
        cx += 1;
    }
    cx += fb.put_u32(cx, y, mins, style);
    fb.put_char(cx, y, ':', style);
    fb.put_char(cx + 1, y, (b'0' + (secs / 10) as u8) as char, style);
    fb.put_char(cx + 2, y, (b'0' + (secs % 10) as u8) as char, style);
}

fn draw_border(
    fb: &mut FrameBuffer,
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    style: CellStyle,
    chars: &BorderChars,
) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, chars.tl, style);
    fb.put_char(x + w - 1, y, chars.tr, style);
    fb.put_char(x, y + h - 1, chars.bl, style);
    fb.put_char(x + w - 1, y + h - 1, chars.br, style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, chars.h, style);
        fb.put_char(x + dx, y + h - 1, chars.h, style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, chars.v, style);
        fb.put_char(x + w - 1, y + dy, chars.v, style);
    }
}

const MODAL_W: u16 = 24;

fn modal_size(overlay: &Overlay) -> Option<(u16, u16)> {
    match overlay {
        Overlay::None => None,
        Overlay::Stats => Some((MODAL_W, 10)),
        Overlay::WinSummary(summary) => {
            let records = summary.new_best_time as u16 + summary.new_best_moves as u16;
            let h = if records > 0 { 10 + records } else { 8 };
            Some((MODAL_W, h))
        }
    }
}

fn modal_origin(layout: &BoardLayout, w: u16, h: u16) -> (u16, u16) {
    (
        layout.frame_x + layout.frame_w.saturating_sub(w) / 2,
        layout.frame_y + layout.frame_h.saturating_sub(h) / 2,
    )
}

/// Filled, bordered box centered over the board. Returns the text origin.
fn draw_modal(fb: &mut FrameBuffer, layout: &BoardLayout, overlay: &Overlay, p: &Palette) -> (u16, u16) {
    let (w, h) = modal_size(overlay).unwrap_or((MODAL_W, 8));
    let (x, y) = modal_origin(layout, w, h);
    fb.fill_rect(x, y, w, h, ' ', CellStyle::new(p.text, p.overlay));
    draw_border(fb, x, y, w, h, CellStyle::new(p.accent, p.overlay).bold(), &DOUBLE);
    (x + 2, y + 1)
}

fn draw_win_overlay(fb: &mut FrameBuffer, layout: &BoardLayout, summary: &WinSummary, p: &Palette) {
    let (x, mut y) = draw_modal(fb, layout, &Overlay::WinSummary(*summary), p);

    let title = CellStyle::new(p.accent, p.overlay).bold();
    let text = CellStyle::new(p.text, p.overlay);
    let highlight = CellStyle::new(p.cursor, p.overlay).bold();

    fb.put_str(x, y, "YOU WIN!", title);
    y += 2;
    fb.put_str(x, y, "Time", text);
    put_time(fb, x + 7, y, Some(summary.elapsed_secs), text);
    y += 1;
    fb.put_str(x, y, "Moves", text);
    fb.put_u32(x + 7, y, summary.moves, text);

    if summary.is_new_record() {
        y += 2;
        fb.put_str(x, y, "NEW RECORD!", highlight);
        if summary.new_best_time {
            y += 1;
            fb.put_str(x, y, "best time", text);
        }
        if summary.new_best_moves {
            y += 1;
            fb.put_str(x, y, "best moves", text);
        }
    }

    y += 2;
    fb.put_str(x, y, "enter: play again", text.dim());
}

fn draw_stats_overlay(fb: &mut FrameBuffer, layout: &BoardLayout, stats: &AggregateStats, p: &Palette) {
    let (x, mut y) = draw_modal(fb, layout, &Overlay::Stats, p);

    let title = CellStyle::new(p.accent, p.overlay).bold();
    let text = CellStyle::new(p.text, p.overlay);

    fb.put_str(x, y, "STATISTICS", title);
    y += 2;
    fb.put_str(x, y, "Played", text);
    fb.put_u32(x + 10, y, stats.games_played, text);
    y += 1;
    fb.put_str(x, y, "Won", text);
    fb.put_u32(x + 10, y, stats.games_won, text);
    y += 1;
    fb.put_str(x, y, "Win rate", text);
    let w = fb.put_u32(x + 10, y, stats.win_rate(), text);
    fb.put_char(x + 10 + w, y, '%', text);
    y += 1;
    fb.put_str(x, y, "Moves", text);
    fb.put_u32(x + 10, y, stats.total_moves.min(u32::MAX as u64) as u32, text);
    y += 2;
    fb.put_str(x, y, "esc: close", text.dim());
}

fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Easy",
        Difficulty::Medium => "Medium",
        Difficulty::Hard => "Hard",
    }
}

fn ascii_symbol(symbol: u8) -> char {
    if symbol < 26 {
        (b'A' + symbol) as char
    } else {
        '?'
    }
}
