//! Layout Module - page geometry via Taffy.
//!
//! The page is three viewport-tall sections stacked in a column:
//!
//! ```text
//! ┌──────────────┐  intro      (scroll hint)
//! ├──────────────┤
//! │  Learn it    │  phrases    (the scroll trigger element)
//! │  Tweak it    │
//! │   Use it     │
//! ├──────────────┤
//! │   The End.   │  outro
//! └──────────────┘
//! ```
//!
//! Every phrase line is a fixed-size leaf; Taffy centers them inside the
//! phrase section.

mod page;

pub use page::{compute_page_layout, LinePlacement, PageLayout, INTRO_TEXT, OUTRO_TEXT};
