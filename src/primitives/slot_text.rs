//! Slot Text Primitive - a phrase rendered as glyph cells and reels.
//!
//! Per character:
//!
//! - space → a fixed-width [`GlyphNode::Spacer`]
//! - static → a single [`GlyphNode::Static`] glyph one row tall
//! - animated → a [`GlyphNode::Reel`]: a one-row viewport clipping a column
//!   of identical frames, the last of which is the resting glyph
//!
//! # Example
//!
//! ```ignore
//! use slot_reveal::primitives::{slot_text, SlotTextProps};
//!
//! let line = slot_text(SlotTextProps {
//!     text: "Use it",
//!     animated: &[true, false, false, false, false, true],
//!     ..Default::default()
//! });
//! assert_eq!(line.reel_ids().count(), 2);
//! ```

use std::fmt::Write as _;

use unicode_width::UnicodeWidthChar;

use crate::engine::REEL_MARKER;
use crate::types::{AnimationMask, CharPosition, ReelId};

// =============================================================================
// Markup nodes
// =============================================================================

/// One rendered character slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphNode {
    /// Blank gap between words.
    Spacer { width: u16 },
    /// A glyph that never moves.
    Static { ch: char },
    /// A column of frames slid upward to reveal the last one.
    Reel { id: ReelId, frames: Vec<char> },
}

impl GlyphNode {
    /// Columns occupied by this node.
    pub fn width(&self) -> u16 {
        match self {
            GlyphNode::Spacer { width } => *width,
            GlyphNode::Static { ch } => glyph_width(*ch),
            GlyphNode::Reel { frames, .. } => {
                frames.iter().copied().map(glyph_width).max().unwrap_or(1)
            }
        }
    }

    /// True when this node carries the given marker class.
    pub fn has_class(&self, class: &str) -> bool {
        matches!(self, GlyphNode::Reel { .. }) && class == REEL_MARKER
    }

    /// The character shown once any animation has finished.
    pub fn final_char(&self) -> Option<char> {
        match self {
            GlyphNode::Spacer { .. } => None,
            GlyphNode::Static { ch } => Some(*ch),
            GlyphNode::Reel { frames, .. } => frames.last().copied(),
        }
    }
}

fn glyph_width(ch: char) -> u16 {
    ch.width().unwrap_or(1).max(1) as u16
}

/// One phrase, ready to lay out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseLine {
    /// Readable label: the phrase itself.
    pub label: String,
    pub nodes: Vec<GlyphNode>,
}

impl PhraseLine {
    /// Total columns.
    pub fn width(&self) -> u16 {
        self.nodes.iter().map(GlyphNode::width).sum()
    }

    pub fn reel_ids(&self) -> impl Iterator<Item = ReelId> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            GlyphNode::Reel { id, .. } => Some(*id),
            _ => None,
        })
    }
}

/// Every phrase line, in render order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup {
    pub lines: Vec<PhraseLine>,
}

impl Markup {
    /// Every node carrying `marker`, in document order.
    pub fn collect_by_marker(&self, marker: &str) -> Vec<ReelId> {
        self.lines
            .iter()
            .flat_map(|line| line.nodes.iter())
            .filter(|node| node.has_class(marker))
            .filter_map(|node| match node {
                GlyphNode::Reel { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn reel_count(&self) -> usize {
        self.lines.iter().map(|l| l.reel_ids().count()).sum()
    }

    /// The text a reader sees once every reel has settled.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.label.clone())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// HTML rendition of the markup.
    ///
    /// Each phrase becomes an `<h1>` labelled with the phrase. Reels are an
    /// `overflow-hidden` viewport around a `char-reel` column of
    /// `char-reel-item` spans.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<section class=\"slot-reveal\">");
        for line in &self.lines {
            let _ = write!(out, "<h1 class=\"slot-text\" aria-label=\"{}\">", escape(&line.label));
            for node in &line.nodes {
                match node {
                    GlyphNode::Spacer { width } => {
                        let _ = write!(out, "<span class=\"spacer w-{width}\"> </span>");
                    }
                    GlyphNode::Static { ch } => {
                        let _ = write!(
                            out,
                            "<div class=\"glyph\"><span aria-hidden=\"true\">{}</span></div>",
                            escape_char(*ch)
                        );
                    }
                    GlyphNode::Reel { frames, .. } => {
                        out.push_str("<div class=\"glyph overflow-hidden\">");
                        let _ = write!(out, "<div class=\"{REEL_MARKER}\">");
                        for ch in frames {
                            let _ = write!(
                                out,
                                "<span class=\"char-reel-item\" aria-hidden=\"true\">{}</span>",
                                escape_char(*ch)
                            );
                        }
                        out.push_str("</div></div>");
                    }
                }
            }
            out.push_str("</h1>");
        }
        out.push_str("</section>");
        out
    }
}

fn escape_char(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '"' => "&quot;".to_string(),
        '\'' => "&#39;".to_string(),
        c => c.to_string(),
    }
}

fn escape(s: &str) -> String {
    s.chars().map(escape_char).collect()
}

// =============================================================================
// Slot Text Component
// =============================================================================

/// Props for [`slot_text`].
#[derive(Debug, Clone, Copy)]
pub struct SlotTextProps<'a> {
    pub text: &'a str,
    /// Row of the animation mask for this phrase.
    pub animated: &'a [bool],
    /// Position of the phrase in the list (used for reel identity).
    pub phrase_index: usize,
    /// Duplicate frames stacked above the final glyph.
    pub reel_length: usize,
    pub spacer_width: u16,
}

impl Default for SlotTextProps<'_> {
    fn default() -> Self {
        Self {
            text: "",
            animated: &[],
            phrase_index: 0,
            reel_length: 1,
            spacer_width: 2,
        }
    }
}

/// Render one phrase.
///
/// Mask entries past the end of `animated` count as static, and spaces are
/// always spacers whatever the mask says.
pub fn slot_text(props: SlotTextProps<'_>) -> PhraseLine {
    let nodes = props
        .text
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            if ch == ' ' {
                return GlyphNode::Spacer {
                    width: props.spacer_width,
                };
            }
            if props.animated.get(index).copied().unwrap_or(false) {
                GlyphNode::Reel {
                    id: CharPosition::new(props.phrase_index, index),
                    frames: vec![ch; props.reel_length + 1],
                }
            } else {
                GlyphNode::Static { ch }
            }
        })
        .collect();

    PhraseLine {
        label: props.text.to_string(),
        nodes,
    }
}

/// Render every phrase against its mask row.
pub fn render_phrases(
    phrases: &[String],
    mask: &AnimationMask,
    reel_length: usize,
    spacer_width: u16,
) -> Markup {
    Markup {
        lines: phrases
            .iter()
            .enumerate()
            .map(|(phrase_index, text)| {
                slot_text(SlotTextProps {
                    text,
                    animated: mask.row(phrase_index),
                    phrase_index,
                    reel_length,
                    spacer_width,
                })
            })
            .collect(),
    }
}
