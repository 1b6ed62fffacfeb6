//! Presenter lifecycle states.

use crate::engine::{ContextId, TimelineId, TriggerId};

/// Engine handles owned by one animation setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHandles {
    pub context: ContextId,
    pub timeline: TimelineId,
    pub trigger: TriggerId,
}

/// Where a mounted slot reveal is in its lifecycle.
///
/// ```text
///            render                     render (mask changed)
///   Idle ───────────► RenderedStatic ◄────────────┐
///    ▲  └───────────► Animating ──── teardown ────┘
///    └──── unmount ◄──────┘
/// ```
///
/// At most one [`AnimationHandles`] set is alive per presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresenterState {
    /// Nothing rendered, nothing registered.
    #[default]
    Idle,
    /// Rendered without animation: no reels, or no usable engine.
    RenderedStatic,
    /// Rendered with a live timeline and scroll trigger.
    Animating(AnimationHandles),
}

impl PresenterState {
    pub fn is_animating(&self) -> bool {
        matches!(self, PresenterState::Animating(_))
    }

    pub fn handles(&self) -> Option<AnimationHandles> {
        match self {
            PresenterState::Animating(handles) => Some(*handles),
            _ => None,
        }
    }
}
