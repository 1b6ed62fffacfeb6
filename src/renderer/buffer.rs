//! Frame buffer and rasterization.
//!
//! Rasterization walks the page in document space and copies whatever falls
//! inside `[scroll_y, scroll_y + viewport.height)` into the buffer.
//!
//! A reel is one row tall on screen no matter how many frames it holds. Its
//! offset picks which frame sits in the viewport; while the offset is between
//! two frames the glyph is drawn dim to show it is moving.

use unicode_width::UnicodeWidthChar;

use crate::layout::{LinePlacement, PageLayout, INTRO_TEXT, OUTRO_TEXT};
use crate::primitives::{GlyphNode, Markup};
use crate::types::{Attr, Cell, ReelId, Viewport};

/// Placeholder written into the second column of a wide glyph.
const CONTINUATION: char = '\0';

/// Attribute for a reel caught between frames.
pub const REEL_IN_TRANSIT: Attr = Attr::DIM;

/// Intro and outro text.
pub const LABEL: Attr = Attr::DIM.union(Attr::ITALIC);

/// 2D grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Write a cell; coordinates outside the buffer are clipped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.cells[idx] = cell;
    }

    /// Write a glyph, reserving a continuation cell for wide characters.
    /// Returns the columns consumed.
    fn put_glyph(&mut self, x: i32, y: i32, ch: char, attrs: Attr) -> i32 {
        let w = ch.width().unwrap_or(1).max(1) as i32;
        self.set(x, y, Cell::new(ch, attrs));
        for dx in 1..w {
            self.set(x + dx, y, Cell::new(CONTINUATION, attrs));
        }
        w
    }

    fn put_str(&mut self, x: i32, y: i32, text: &str, attrs: Attr) {
        let mut cx = x;
        for ch in text.chars() {
            cx += self.put_glyph(cx, y, ch, attrs);
        }
    }

    /// Row `y` as a string, continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| c.ch != CONTINUATION)
            .map(|c| c.ch)
            .collect()
    }

    pub(crate) fn is_continuation(cell: &Cell) -> bool {
        cell.ch == CONTINUATION
    }
}

/// Frame of `frames` a reel shows at `y_percent`, and whether it is between
/// frames.
fn reel_frame(frames: usize, y_percent: f32) -> (usize, bool) {
    let shift = (-y_percent / 100.0 * frames as f32).clamp(0.0, frames.saturating_sub(1) as f32);
    let nearest = shift.round();
    let in_transit = (shift - nearest).abs() > 0.2;
    (nearest as usize, in_transit)
}

/// Draw the page as seen at `scroll_y`.
///
/// `reel_y_percent` reports each reel's current offset (0 at rest,
/// `-100 * (frames - 1) / frames` once fully revealed).
pub fn rasterize(
    markup: &Markup,
    layout: &PageLayout,
    scroll_y: u16,
    reel_y_percent: impl Fn(ReelId) -> f32,
) -> FrameBuffer {
    let Viewport { width, height } = layout.viewport;
    let mut fb = FrameBuffer::new(width, height);
    let top = scroll_y as i32;

    let draw_label = |fb: &mut FrameBuffer, placement: LinePlacement, text: &str| {
        fb.put_str(placement.x, placement.y - top, text, LABEL);
    };
    draw_label(&mut fb, layout.intro, INTRO_TEXT);
    draw_label(&mut fb, layout.outro, OUTRO_TEXT);

    for (line, placement) in markup.lines.iter().zip(&layout.lines) {
        let y = placement.y - top;
        if y < 0 || y >= height as i32 {
            continue;
        }
        let mut x = placement.x;
        for node in &line.nodes {
            match node {
                GlyphNode::Spacer { width } => {
                    x += *width as i32;
                }
                GlyphNode::Static { ch } => {
                    x += fb.put_glyph(x, y, *ch, Attr::BOLD);
                }
                GlyphNode::Reel { id, frames } => {
                    let (frame, in_transit) = reel_frame(frames.len(), reel_y_percent(*id));
                    let attrs = if in_transit { REEL_IN_TRANSIT } else { Attr::BOLD };
                    let ch = frames.get(frame).copied().unwrap_or(' ');
                    let advance = node.width() as i32;
                    fb.put_glyph(x, y, ch, attrs);
                    x += advance;
                }
            }
        }
    }
    fb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_page_layout;
    use crate::primitives::render_phrases;
    use crate::types::{AnimationMask, CharPosition};

    fn page(list: &[&str], reels: &[CharPosition]) -> (Markup, PageLayout) {
        let phrases: Vec<String> = list.iter().map(|s| s.to_string()).collect();
        let mut mask = AnimationMask::empty_for(&phrases);
        for &pos in reels {
            mask.mark(pos);
        }
        let markup = render_phrases(&phrases, &mask, 1, 2);
        let layout = compute_page_layout(&markup, Viewport::new(40, 12), 1).unwrap();
        (markup, layout)
    }

    #[test]
    fn test_reel_frame() {
        assert_eq!(reel_frame(2, 0.0), (0, false));
        assert_eq!(reel_frame(2, -50.0), (1, false));
        assert_eq!(reel_frame(2, -25.0).1, true);
        assert_eq!(reel_frame(2, -200.0), (1, false));
    }

    #[test]
    fn test_set_clips() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.set(-1, 0, Cell::new('x', Attr::NONE));
        fb.set(4, 0, Cell::new('x', Attr::NONE));
        fb.set(0, 2, Cell::new('x', Attr::NONE));
        assert_eq!(fb.row_text(0), "    ");
        assert_eq!(fb.row_text(1), "    ");
    }

    #[test]
    fn test_phrases_visible_at_section_scroll() {
        let (markup, layout) = page(&["Use it"], &[CharPosition::new(0, 0)]);
        let fb = rasterize(&markup, &layout, 12, |_| 0.0);

        let row = layout.lines[0].y as u16 - 12;
        assert_eq!(fb.row_text(row).trim(), "Use  it");

        let x = layout.lines[0].x as u16;
        assert_eq!(fb.get(x, row).unwrap().attrs, Attr::BOLD);
    }

    #[test]
    fn test_reel_in_transit_is_dim() {
        let (markup, layout) = page(&["Use it"], &[CharPosition::new(0, 0)]);
        let fb = rasterize(&markup, &layout, 12, |_| -25.0);
        let row = layout.lines[0].y as u16 - 12;
        let x = layout.lines[0].x as u16;
        assert_eq!(fb.get(x, row).unwrap(), &Cell::new('U', REEL_IN_TRANSIT));
        assert_eq!(fb.get(x + 1, row).unwrap(), &Cell::new('s', Attr::BOLD));
    }

    #[test]
    fn test_offscreen_lines_skipped() {
        let (markup, layout) = page(&["Use it"], &[]);
        let fb = rasterize(&markup, &layout, 0, |_| 0.0);
        // Only the intro section is in view
        for y in 0..fb.height() {
            assert!(!fb.row_text(y).contains("Use"));
        }
        assert!(fb.row_text(layout.intro.y as u16).contains(INTRO_TEXT));
    }

    #[test]
    fn test_labels_are_dim_italic() {
        let (markup, layout) = page(&["Use it"], &[]);
        let fb = rasterize(&markup, &layout, 0, |_| 0.0);
        let cell = fb
            .get(layout.intro.x as u16, layout.intro.y as u16)
            .unwrap();
        assert_eq!(cell.attrs, Attr::DIM | Attr::ITALIC);

        let fb = rasterize(&markup, &layout, layout.max_scroll(), |_| 0.0);
        let row = (layout.outro.y - layout.max_scroll() as i32) as u16;
        let cell = fb.get(layout.outro.x as u16, row).unwrap();
        assert_eq!(cell.attrs, LABEL);
    }

    #[test]
    fn test_wide_glyph_continuation() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "日x", Attr::NONE);
        assert!(FrameBuffer::is_continuation(fb.get(1, 0).unwrap()));
        assert_eq!(fb.row_text(0), "日x ");
    }
}
