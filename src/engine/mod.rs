//! Animation Engine - timelines, tweens and scroll triggers.
//!
//! The presenter never reaches for a global animation library. It is handed
//! an [`AnimationEngine`] and only talks to it through this trait, so tests
//! can swap in a counting double and the demo can use [`NativeEngine`].
//!
//! # Capabilities
//!
//! - **Plugins** - `register_plugin` must succeed for [`Plugin::ScrollTrigger`]
//!   before triggers can be registered
//! - **Scoped contexts** - everything created under a [`ContextId`] is released
//!   by one `revert`
//! - **Timelines** - `create_timeline` + `tween_to`
//! - **Marker collection** - `collect_by_marker` finds every reel in the markup
//! - **Scroll triggers** - a band in viewport percentages plus a four-way
//!   [`ToggleActions`] policy
//!
//! # Example
//!
//! ```ignore
//! let engine = NativeEngine::with_seed(1);
//! engine.register_plugin(Plugin::ScrollTrigger)?;
//!
//! let ctx = engine.create_context();
//! let tl = engine.create_timeline(ctx)?;
//! engine.tween_to(tl, &reels, &TweenSpec::default())?;
//! engine.register_scroll_trigger(tl, trigger_spec)?;
//!
//! engine.update_scroll(12.0, 24.0);
//! engine.tick(1.0 / 60.0);
//!
//! engine.revert(ctx); // timelines + triggers gone
//! ```

mod ease;
mod native;
mod spec;
mod timeline;
mod trigger;

pub use ease::Ease;
pub use native::NativeEngine;
pub use spec::{
    Anchor, BandEdge, Stagger, StaggerFrom, ToggleAction, ToggleActions, TriggerRect, TweenSpec,
    ScrollTriggerSpec,
};
pub use timeline::{Playback, Timeline};
pub use trigger::{Region, ScrollTrigger, ToggleEvent};

use std::fmt;

use crate::error::EngineError;
use crate::primitives::Markup;
use crate::types::ReelId;

// =============================================================================
// Handles
// =============================================================================

macro_rules! engine_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

engine_id!(
    /// A revertible creation scope.
    ContextId
);
engine_id!(
    /// A timeline created inside a context.
    TimelineId
);
engine_id!(
    /// A scroll trigger bound to a timeline.
    TriggerId
);

/// Optional engine extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plugin {
    ScrollTrigger,
}

impl Plugin {
    pub const fn name(self) -> &'static str {
        match self {
            Plugin::ScrollTrigger => "ScrollTrigger",
        }
    }
}

/// Marker class carried by every reel in the markup.
pub const REEL_MARKER: &str = "char-reel";

// =============================================================================
// AnimationEngine trait
// =============================================================================

/// Capability object the presenter animates through.
///
/// Methods take `&self`: engines are shared as `Rc<dyn AnimationEngine>`
/// on a single UI thread and keep their state behind interior mutability.
pub trait AnimationEngine {
    /// Make a plugin available. Fails if the engine cannot provide it.
    fn register_plugin(&self, plugin: Plugin) -> Result<(), EngineError>;

    /// Open a new creation scope.
    fn create_context(&self) -> ContextId;

    /// Release every timeline and trigger created in `context` and restore
    /// the reels they moved. Reverting twice is a no-op.
    fn revert(&self, context: ContextId);

    /// Create an empty, paused timeline in `context`.
    fn create_timeline(&self, context: ContextId) -> Result<TimelineId, EngineError>;

    /// Append a tween moving `targets` to the end of `timeline`.
    fn tween_to(
        &self,
        timeline: TimelineId,
        targets: &[ReelId],
        tween: &TweenSpec,
    ) -> Result<(), EngineError>;

    /// Drive `timeline` from scroll position. The trigger has no region
    /// until the next [`update_scroll`](AnimationEngine::update_scroll).
    fn register_scroll_trigger(
        &self,
        timeline: TimelineId,
        trigger: ScrollTriggerSpec,
    ) -> Result<TriggerId, EngineError>;

    /// Move a trigger's element after a relayout. The band is recomputed and
    /// the current region is re-read from `scroll_y` without firing toggles,
    /// so the bound timeline keeps its progress.
    fn refresh_trigger(
        &self,
        trigger: TriggerId,
        rect: TriggerRect,
        scroll_y: f32,
        viewport_height: f32,
    ) -> Result<(), EngineError>;

    /// Every reel in `markup` carrying `marker`, in document order.
    fn collect_by_marker(&self, markup: &Markup, marker: &str) -> Vec<ReelId> {
        markup.collect_by_marker(marker)
    }

    /// Report the current scroll offset and viewport height (both in rows).
    fn update_scroll(&self, scroll_y: f32, viewport_height: f32);

    /// Advance running timelines by `dt` seconds.
    fn tick(&self, dt: f32);

    /// Current vertical offset of a reel, as a percentage of its height.
    fn reel_y_percent(&self, reel: ReelId) -> f32;

    /// Number of live scroll triggers.
    fn active_triggers(&self) -> usize;

    /// Number of live timelines.
    fn active_timelines(&self) -> usize;

    /// True while any timeline is moving.
    fn is_animating(&self) -> bool;
}
