//! Core types for slot-reveal.
//!
//! These types flow from the selector through the presenter into the renderer.

use std::fmt;

// =============================================================================
// Character positions and masks
// =============================================================================

/// One character inside a phrase list: `(phrase index, char index)`.
///
/// Char indices count Rust `char`s, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharPosition {
    pub phrase: usize,
    pub index: usize,
}

impl CharPosition {
    pub const fn new(phrase: usize, index: usize) -> Self {
        Self { phrase, index }
    }
}

/// Identity of a rendered reel: the position of the character it reveals.
pub type ReelId = CharPosition;

/// Per-phrase boolean flags: `true` renders the character as an animating reel.
///
/// Row `i` always has exactly as many entries as phrase `i` has characters,
/// and entries for spaces are always `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnimationMask {
    rows: Vec<Vec<bool>>,
}

impl AnimationMask {
    /// An all-`false` mask shaped after `phrases`.
    pub fn empty_for<S: AsRef<str>>(phrases: &[S]) -> Self {
        Self {
            rows: phrases
                .iter()
                .map(|p| vec![false; p.as_ref().chars().count()])
                .collect(),
        }
    }

    /// Mark a position as animated. Out-of-range positions are ignored.
    pub fn mark(&mut self, pos: CharPosition) {
        if let Some(slot) = self.rows.get_mut(pos.phrase).and_then(|r| r.get_mut(pos.index)) {
            *slot = true;
        }
    }

    #[inline]
    pub fn is_animated(&self, pos: CharPosition) -> bool {
        self.rows
            .get(pos.phrase)
            .and_then(|r| r.get(pos.index))
            .copied()
            .unwrap_or(false)
    }

    /// Flags for one phrase.
    pub fn row(&self, phrase: usize) -> &[bool] {
        self.rows.get(phrase).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    pub fn phrase_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of animated characters in one phrase.
    pub fn count_in(&self, phrase: usize) -> usize {
        self.row(phrase).iter().filter(|&&b| b).count()
    }

    /// Number of animated characters across all phrases.
    pub fn total(&self) -> usize {
        self.rows.iter().flatten().filter(|&&b| b).count()
    }

    /// All animated positions in phrase order, then char order.
    pub fn positions(&self) -> impl Iterator<Item = CharPosition> + '_ {
        self.rows.iter().enumerate().flat_map(|(p, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, b)| **b)
                .map(move |(i, _)| CharPosition::new(p, i))
        })
    }
}

impl fmt::Display for AnimationMask {
    /// One line per phrase, `^` for reels and `.` for static glyphs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &b in row {
                f.write_str(if b { "^" } else { "." })?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Viewport
// =============================================================================

/// Terminal viewport size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::DIM`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub attrs: Attr,
}

impl Cell {
    pub const fn new(ch: char, attrs: Attr) -> Self {
        Self { ch, attrs }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            attrs: Attr::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mask_matches_phrase_lengths() {
        let mask = AnimationMask::empty_for(&["Use it", "", "né"]);
        assert_eq!(mask.row(0).len(), 6);
        assert_eq!(mask.row(1).len(), 0);
        assert_eq!(mask.row(2).len(), 2);
        assert_eq!(mask.total(), 0);
    }

    #[test]
    fn test_mark_and_positions() {
        let mut mask = AnimationMask::empty_for(&["Ab", "Cd"]);
        mask.mark(CharPosition::new(1, 1));
        mask.mark(CharPosition::new(0, 0));
        mask.mark(CharPosition::new(5, 5)); // ignored

        assert!(mask.is_animated(CharPosition::new(0, 0)));
        assert!(!mask.is_animated(CharPosition::new(0, 1)));
        assert_eq!(mask.total(), 2);
        assert_eq!(
            mask.positions().collect::<Vec<_>>(),
            vec![CharPosition::new(0, 0), CharPosition::new(1, 1)]
        );
    }

    #[test]
    fn test_mask_display() {
        let mut mask = AnimationMask::empty_for(&["Use it"]);
        mask.mark(CharPosition::new(0, 0));
        mask.mark(CharPosition::new(0, 5));
        assert_eq!(mask.to_string(), "^....^");
    }

    #[test]
    fn test_cell_default_is_blank() {
        let cell = Cell::default();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.attrs, Attr::NONE);
    }
}
