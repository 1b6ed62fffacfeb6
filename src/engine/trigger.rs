//! Scroll trigger region tracking.
//!
//! The band splits scroll space into three regions. Crossing from one region
//! to another emits the matching events; staying put emits nothing, so the
//! same scroll position can be reported any number of times.
//!
//! ```text
//!   Before  | Active |  After
//!  ---------[========]---------> scroll_y
//!     Enter -->    Leave -->
//!     <-- LeaveBack    <-- EnterBack
//! ```

use super::spec::{ScrollTriggerSpec, ToggleAction, TriggerRect};
use super::TimelineId;

/// Where the scroll position sits relative to the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Before,
    Active,
    After,
}

/// A band crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// A registered trigger bound to one timeline.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    spec: ScrollTriggerSpec,
    timeline: TimelineId,
    region: Option<Region>,
}

impl ScrollTrigger {
    pub fn new(spec: ScrollTriggerSpec, timeline: TimelineId) -> Self {
        Self {
            spec,
            timeline,
            region: None,
        }
    }

    pub fn timeline(&self) -> TimelineId {
        self.timeline
    }

    pub fn spec(&self) -> &ScrollTriggerSpec {
        &self.spec
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    fn classify(&self, scroll_y: f32, viewport_height: f32) -> Region {
        let (low, high) = self.spec.band(viewport_height);
        if scroll_y < low {
            Region::Before
        } else if scroll_y > high {
            Region::After
        } else {
            Region::Active
        }
    }

    /// Feed a scroll position and collect the crossings since the last one.
    ///
    /// The first report is treated as coming from `Before`, so a page that
    /// loads already scrolled past the band still plays.
    pub fn update(&mut self, scroll_y: f32, viewport_height: f32) -> Vec<ToggleEvent> {
        let next = self.classify(scroll_y, viewport_height);
        let prev = self.region.unwrap_or(Region::Before);
        self.region = Some(next);

        use Region::*;
        use ToggleEvent::*;
        match (prev, next) {
            (Before, Active) => vec![Enter],
            (Before, After) => vec![Enter, Leave],
            (Active, After) => vec![Leave],
            (After, Active) => vec![EnterBack],
            (After, Before) => vec![EnterBack, LeaveBack],
            (Active, Before) => vec![LeaveBack],
            _ => Vec::new(),
        }
    }

    /// Move the trigger element and re-read the region at `scroll_y`
    /// without emitting events. A trigger that has never been updated stays
    /// unknown.
    pub fn refresh(&mut self, rect: TriggerRect, scroll_y: f32, viewport_height: f32) {
        self.spec.trigger = rect;
        if self.region.is_some() {
            self.region = Some(self.classify(scroll_y, viewport_height));
        }
    }

    /// Toggle action configured for `event`.
    pub fn action_for(&self, event: ToggleEvent) -> ToggleAction {
        let actions = &self.spec.toggle_actions;
        match event {
            ToggleEvent::Enter => actions.on_enter,
            ToggleEvent::Leave => actions.on_leave,
            ToggleEvent::EnterBack => actions.on_enter_back,
            ToggleEvent::LeaveBack => actions.on_leave_back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::spec::{Anchor, BandEdge, ToggleActions, TriggerRect};

    // Band is [22.8, 25.2] for a 24-row viewport.
    fn trigger() -> ScrollTrigger {
        ScrollTrigger::new(
            ScrollTriggerSpec {
                trigger: TriggerRect::new(24.0, 24.0),
                start: BandEdge::new(Anchor::Center, 45.0),
                end: BandEdge::new(Anchor::Center, 55.0),
                toggle_actions: ToggleActions::PLAY_REVERSE,
            },
            TimelineId(1),
        )
    }

    #[test]
    fn test_starts_unknown() {
        assert_eq!(trigger().region(), None);
    }

    #[test]
    fn test_forward_then_back() {
        let mut t = trigger();
        assert!(t.update(0.0, 24.0).is_empty());
        assert_eq!(t.update(24.0, 24.0), vec![ToggleEvent::Enter]);
        assert_eq!(t.update(30.0, 24.0), vec![ToggleEvent::Leave]);
        assert_eq!(t.update(24.0, 24.0), vec![ToggleEvent::EnterBack]);
        assert_eq!(t.update(10.0, 24.0), vec![ToggleEvent::LeaveBack]);
    }

    #[test]
    fn test_same_region_is_idempotent() {
        let mut t = trigger();
        assert_eq!(t.update(23.0, 24.0), vec![ToggleEvent::Enter]);
        assert!(t.update(23.5, 24.0).is_empty());
        assert!(t.update(24.0, 24.0).is_empty());
    }

    #[test]
    fn test_jump_across_band_emits_both() {
        let mut t = trigger();
        t.update(0.0, 24.0);
        assert_eq!(t.update(40.0, 24.0), vec![ToggleEvent::Enter, ToggleEvent::Leave]);
        assert_eq!(t.update(0.0, 24.0), vec![ToggleEvent::EnterBack, ToggleEvent::LeaveBack]);
    }

    #[test]
    fn test_loaded_past_band() {
        let mut t = trigger();
        assert_eq!(t.update(40.0, 24.0), vec![ToggleEvent::Enter, ToggleEvent::Leave]);
        assert_eq!(t.region(), Some(Region::After));
    }

    #[test]
    fn test_refresh_is_silent() {
        let mut t = trigger();
        t.update(0.0, 24.0);
        t.update(24.0, 24.0);
        t.update(40.0, 24.0);

        // Taller viewport: band moves to [24.3, 26.7], still behind us
        t.refresh(TriggerRect::new(25.0, 25.0), 40.0, 25.0);
        assert_eq!(t.region(), Some(Region::After));
        assert!(t.update(40.0, 25.0).is_empty());
        assert_eq!(t.update(25.0, 25.0), vec![ToggleEvent::EnterBack]);
    }

    #[test]
    fn test_refresh_into_band_does_not_enter() {
        let mut t = trigger();
        t.update(30.0, 24.0);
        t.refresh(TriggerRect::new(30.0, 24.0), 30.0, 24.0);
        assert_eq!(t.region(), Some(Region::Active));
    }

    #[test]
    fn test_refresh_before_first_update() {
        let mut t = trigger();
        t.refresh(TriggerRect::new(10.0, 10.0), 0.0, 24.0);
        assert_eq!(t.region(), None);
        assert_eq!(t.spec().trigger, TriggerRect::new(10.0, 10.0));
    }

    #[test]
    fn test_play_reverse_policy() {
        let t = trigger();
        assert_eq!(t.action_for(ToggleEvent::Enter), ToggleAction::Play);
        assert_eq!(t.action_for(ToggleEvent::Leave), ToggleAction::None);
        assert_eq!(t.action_for(ToggleEvent::EnterBack), ToggleAction::None);
        assert_eq!(t.action_for(ToggleEvent::LeaveBack), ToggleAction::Reverse);
    }
}
