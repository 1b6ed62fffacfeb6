//! # slot-reveal
//!
//! Slot-machine text reveal for the terminal.
//!
//! A handful of characters in each phrase are turned into one-character
//! "reels". When the phrase section scrolls into the middle of the viewport
//! the reels slide into place on a staggered, eased timeline, and slide back
//! when it scrolls away upward.
//!
//! ## Architecture
//!
//! ```text
//! phrases Signal → selector (derived, memoized) → AnimationMask
//!   → slot_text markup → taffy page layout → AnimationEngine setup
//!   → scroll / tick → rasterize → DiffRenderer
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (CharPosition, AnimationMask, Viewport, Cell)
//! - [`selector`] - Which characters animate (odd-quota and global-quota policies)
//! - [`primitives`] - The slot text primitive: phrases + mask → markup
//! - [`layout`] - Taffy page layout and the scroll trigger rectangle
//! - [`engine`] - Animation engine trait, timelines, scroll triggers, easing
//! - [`renderer`] - Frame buffers and diff rendering with crossterm
//! - [`presenter`] - [`SlotReveal`], the mounted component and its lifecycle
//! - [`config`] - [`RevealConfig`], loadable from JSON
//! - [`error`] - Error types

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod presenter;
pub mod primitives;
pub mod renderer;
pub mod selector;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{RevealConfig, SelectionPolicy};
pub use error::{ConfigError, EngineError, Error, LayoutError, Result};

pub use selector::{selector_for, GlobalQuotaSelector, OddQuotaSelector, Selector};

pub use primitives::{render_phrases, slot_text, GlyphNode, Markup, PhraseLine, SlotTextProps};

pub use layout::{compute_page_layout, LinePlacement, PageLayout};

pub use engine::{
    AnimationEngine, ContextId, Ease, NativeEngine, Plugin, ScrollTriggerSpec, TimelineId,
    ToggleAction, ToggleActions, TriggerId, TweenSpec, REEL_MARKER,
};

pub use renderer::{rasterize, DiffRenderer, FrameBuffer};

pub use presenter::{
    AnimationHandles, PresenterState, RevealProps, SlotReveal, DEFAULT_PHRASES,
};
