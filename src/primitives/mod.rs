//! Primitives - the markup a slot reveal renders to.
//!
//! - [`slot_text`] - one phrase as spacers, static glyphs and reels
//! - [`render_phrases`] - every phrase, in order, as a [`Markup`] tree
//!
//! Markup is plain data. It is rebuilt on every render pass from the current
//! mask; the animation engine finds reels in it by their marker class.

mod slot_text;

pub use slot_text::{render_phrases, slot_text, GlyphNode, Markup, PhraseLine, SlotTextProps};
