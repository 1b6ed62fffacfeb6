//! Value types describing tweens and scroll triggers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ease::Ease;
use crate::error::ConfigError;

// =============================================================================
// TWEENS
// =============================================================================

/// Where the stagger distribution starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerFrom {
    Start,
    End,
    #[default]
    Random,
}

/// Spread of start times across a group of targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stagger {
    /// Seconds between the first and the last target's start.
    pub amount: f32,
    pub from: StaggerFrom,
}

impl Stagger {
    pub const NONE: Self = Self {
        amount: 0.0,
        from: StaggerFrom::Start,
    };
}

impl Default for Stagger {
    fn default() -> Self {
        Self {
            amount: 0.6,
            from: StaggerFrom::Random,
        }
    }
}

/// A tween moving targets vertically to `y_percent` of their own height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub y_percent: f32,
    /// Seconds per target.
    pub duration: f32,
    pub ease: Ease,
    pub stagger: Stagger,
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self {
            y_percent: -50.0,
            duration: 1.0,
            ease: Ease::Power2InOut,
            stagger: Stagger::default(),
        }
    }
}

// =============================================================================
// SCROLL TRIGGERS
// =============================================================================

/// Point on the trigger element an edge is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Top,
    Center,
    Bottom,
}

/// "When `anchor` of the trigger meets `viewport_percent` of the viewport."
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandEdge {
    pub anchor: Anchor,
    pub viewport_percent: f32,
}

impl BandEdge {
    pub const fn new(anchor: Anchor, viewport_percent: f32) -> Self {
        Self {
            anchor,
            viewport_percent,
        }
    }

    /// Scroll offset at which this edge is met.
    pub fn scroll_position(&self, rect: TriggerRect, viewport_height: f32) -> f32 {
        let anchor_y = match self.anchor {
            Anchor::Top => rect.top,
            Anchor::Center => rect.top + rect.height / 2.0,
            Anchor::Bottom => rect.top + rect.height,
        };
        anchor_y - self.viewport_percent / 100.0 * viewport_height
    }
}

/// Document-space rows covered by the trigger element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TriggerRect {
    pub top: f32,
    pub height: f32,
}

impl TriggerRect {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

/// What a timeline does when its trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    None,
}

impl FromStr for ToggleAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "play" => ToggleAction::Play,
            "pause" => ToggleAction::Pause,
            "resume" => ToggleAction::Resume,
            "reverse" => ToggleAction::Reverse,
            "restart" => ToggleAction::Restart,
            "reset" => ToggleAction::Reset,
            "complete" => ToggleAction::Complete,
            "none" => ToggleAction::None,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToggleAction::Play => "play",
            ToggleAction::Pause => "pause",
            ToggleAction::Resume => "resume",
            ToggleAction::Reverse => "reverse",
            ToggleAction::Restart => "restart",
            ToggleAction::Reset => "reset",
            ToggleAction::Complete => "complete",
            ToggleAction::None => "none",
        })
    }
}

/// Actions for entering forward, leaving forward, entering backward and
/// leaving backward, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    /// Play on the way down, reverse on the way back up.
    pub const PLAY_REVERSE: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reverse,
    };
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self::PLAY_REVERSE
    }
}

impl FromStr for ToggleActions {
    type Err = ConfigError;

    /// Parse the four-word form, e.g. `"play none none reverse"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::ToggleActions(s.to_string());
        let words: Vec<ToggleAction> = s
            .split_whitespace()
            .map(|w| w.parse().map_err(|_| bad()))
            .collect::<Result<_, _>>()?;
        match words.as_slice() {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter: *on_enter,
                on_leave: *on_leave,
                on_enter_back: *on_enter_back,
                on_leave_back: *on_leave_back,
            }),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for ToggleActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.on_enter, self.on_leave, self.on_enter_back, self.on_leave_back
        )
    }
}

/// Scroll trigger registration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTriggerSpec {
    pub trigger: TriggerRect,
    pub start: BandEdge,
    pub end: BandEdge,
    pub toggle_actions: ToggleActions,
}

impl ScrollTriggerSpec {
    /// Scroll range `[low, high]` covered by the band. Edges given in either
    /// order describe the same band.
    pub fn band(&self, viewport_height: f32) -> (f32, f32) {
        let a = self.start.scroll_position(self.trigger, viewport_height);
        let b = self.end.scroll_position(self.trigger, viewport_height);
        (a.min(b), a.max(b))
    }
}
