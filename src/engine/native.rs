//! Native Engine - in-process implementation of [`AnimationEngine`].
//!
//! All state lives in one `RefCell` so the engine can be shared as
//! `Rc<dyn AnimationEngine>`. Contexts own the timelines and triggers created
//! under them; reverting a context drops both, which is what keeps re-setup
//! from stacking scroll listeners.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use super::spec::{ScrollTriggerSpec, TriggerRect, TweenSpec};
use super::timeline::Timeline;
use super::trigger::ScrollTrigger;
use super::{AnimationEngine, ContextId, Plugin, TimelineId, TriggerId};
use crate::error::EngineError;
use crate::types::ReelId;

#[derive(Debug, Default)]
struct ContextRecord {
    timelines: Vec<TimelineId>,
    triggers: Vec<TriggerId>,
}

#[derive(Debug, Default)]
struct EngineState {
    next_id: u64,
    plugins: HashSet<Plugin>,
    contexts: BTreeMap<ContextId, ContextRecord>,
    timelines: BTreeMap<TimelineId, Timeline>,
    triggers: BTreeMap<TriggerId, ScrollTrigger>,
}

impl EngineState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Run one trigger against a scroll position and apply its toggles.
    fn drive_trigger(&mut self, id: TriggerId, scroll_y: f32, viewport_height: f32) {
        let Some(trigger) = self.triggers.get_mut(&id) else {
            return;
        };
        let events = trigger.update(scroll_y, viewport_height);
        if events.is_empty() {
            return;
        }
        let actions: Vec<_> = events.iter().map(|&e| (e, trigger.action_for(e))).collect();
        let timeline_id = trigger.timeline();

        if let Some(timeline) = self.timelines.get_mut(&timeline_id) {
            for (event, action) in actions {
                trace!(trigger = %id, timeline = %timeline_id, ?event, %action, "scroll toggle");
                timeline.apply(action);
            }
        }
    }
}

/// In-process animation engine.
pub struct NativeEngine {
    state: RefCell<EngineState>,
    rng: RefCell<StdRng>,
    provides_scroll_trigger: bool,
}

impl NativeEngine {
    /// Engine with every plugin available and an entropy-seeded stagger order.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy(), true)
    }

    /// Engine with a reproducible stagger order.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), true)
    }

    /// Engine whose plugins cannot be registered.
    pub fn without_plugins() -> Self {
        Self::from_rng(StdRng::seed_from_u64(0), false)
    }

    fn from_rng(rng: StdRng, provides_scroll_trigger: bool) -> Self {
        Self {
            state: RefCell::new(EngineState::default()),
            rng: RefCell::new(rng),
            provides_scroll_trigger,
        }
    }

    /// Normalized progress of a timeline, if it is still alive.
    pub fn timeline_progress(&self, timeline: TimelineId) -> Option<f32> {
        self.state.borrow().timelines.get(&timeline).map(Timeline::progress)
    }

    pub fn active_contexts(&self) -> usize {
        self.state.borrow().contexts.len()
    }
}

impl Default for NativeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationEngine for NativeEngine {
    fn register_plugin(&self, plugin: Plugin) -> Result<(), EngineError> {
        match plugin {
            Plugin::ScrollTrigger if !self.provides_scroll_trigger => {
                Err(EngineError::PluginUnavailable(plugin.name()))
            }
            _ => {
                self.state.borrow_mut().plugins.insert(plugin);
                Ok(())
            }
        }
    }

    fn create_context(&self) -> ContextId {
        let mut state = self.state.borrow_mut();
        let id = ContextId(state.next_id());
        state.contexts.insert(id, ContextRecord::default());
        debug!(context = %id, "animation context created");
        id
    }

    fn revert(&self, context: ContextId) {
        let mut state = self.state.borrow_mut();
        let Some(record) = state.contexts.remove(&context) else {
            return;
        };
        for trigger in &record.triggers {
            state.triggers.remove(trigger);
        }
        for timeline in &record.timelines {
            state.timelines.remove(timeline);
        }
        debug!(
            context = %context,
            timelines = record.timelines.len(),
            triggers = record.triggers.len(),
            "animation context reverted"
        );
    }

    fn create_timeline(&self, context: ContextId) -> Result<TimelineId, EngineError> {
        let mut state = self.state.borrow_mut();
        if !state.contexts.contains_key(&context) {
            return Err(EngineError::UnknownContext(context.0));
        }
        let id = TimelineId(state.next_id());
        state.timelines.insert(id, Timeline::new(context));
        if let Some(record) = state.contexts.get_mut(&context) {
            record.timelines.push(id);
        }
        Ok(id)
    }

    fn tween_to(
        &self,
        timeline: TimelineId,
        targets: &[ReelId],
        tween: &TweenSpec,
    ) -> Result<(), EngineError> {
        let mut state = self.state.borrow_mut();
        let tl = state
            .timelines
            .get_mut(&timeline)
            .ok_or(EngineError::UnknownTimeline(timeline.0))?;
        tl.add_tween(targets, tween, &mut *self.rng.borrow_mut());
        Ok(())
    }

    fn register_scroll_trigger(
        &self,
        timeline: TimelineId,
        trigger: ScrollTriggerSpec,
    ) -> Result<TriggerId, EngineError> {
        let mut state = self.state.borrow_mut();
        if !state.plugins.contains(&Plugin::ScrollTrigger) {
            return Err(EngineError::PluginUnavailable(Plugin::ScrollTrigger.name()));
        }
        let context = state
            .timelines
            .get(&timeline)
            .map(Timeline::context)
            .ok_or(EngineError::UnknownTimeline(timeline.0))?;

        let id = TriggerId(state.next_id());
        state.triggers.insert(id, ScrollTrigger::new(trigger, timeline));
        if let Some(record) = state.contexts.get_mut(&context) {
            record.triggers.push(id);
        }
        Ok(id)
    }

    fn refresh_trigger(
        &self,
        trigger: TriggerId,
        rect: TriggerRect,
        scroll_y: f32,
        viewport_height: f32,
    ) -> Result<(), EngineError> {
        let mut state = self.state.borrow_mut();
        let registered = state
            .triggers
            .get_mut(&trigger)
            .ok_or(EngineError::UnknownTrigger(trigger.0))?;
        registered.refresh(rect, scroll_y, viewport_height);
        debug!(trigger = %trigger, top = rect.top, height = rect.height, "scroll trigger refreshed");
        Ok(())
    }

    fn update_scroll(&self, scroll_y: f32, viewport_height: f32) {
        let mut state = self.state.borrow_mut();
        let ids: Vec<TriggerId> = state.triggers.keys().copied().collect();
        for id in ids {
            state.drive_trigger(id, scroll_y, viewport_height);
        }
    }

    fn tick(&self, dt: f32) {
        for timeline in self.state.borrow_mut().timelines.values_mut() {
            timeline.tick(dt);
        }
    }

    fn reel_y_percent(&self, reel: ReelId) -> f32 {
        self.state
            .borrow()
            .timelines
            .values()
            .find_map(|tl| tl.value_of(reel))
            .unwrap_or(0.0)
    }

    fn active_triggers(&self) -> usize {
        self.state.borrow().triggers.len()
    }

    fn active_timelines(&self) -> usize {
        self.state.borrow().timelines.len()
    }

    fn is_animating(&self) -> bool {
        self.state.borrow().timelines.values().any(Timeline::is_running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::spec::{Anchor, BandEdge, ToggleActions, TriggerRect};
    use crate::types::CharPosition;

    fn trigger_spec() -> ScrollTriggerSpec {
        ScrollTriggerSpec {
            trigger: TriggerRect::new(24.0, 24.0),
            start: BandEdge::new(Anchor::Center, 45.0),
            end: BandEdge::new(Anchor::Center, 55.0),
            toggle_actions: ToggleActions::PLAY_REVERSE,
        }
    }

    fn reels() -> Vec<ReelId> {
        vec![CharPosition::new(0, 0), CharPosition::new(0, 2), CharPosition::new(1, 1)]
    }

    fn setup() -> (NativeEngine, ContextId, TimelineId) {
        let engine = NativeEngine::with_seed(3);
        engine.register_plugin(Plugin::ScrollTrigger).unwrap();
        let ctx = engine.create_context();
        let tl = engine.create_timeline(ctx).unwrap();
        engine.tween_to(tl, &reels(), &TweenSpec::default()).unwrap();
        (engine, ctx, tl)
    }

    #[test]
    fn test_missing_plugin() {
        let engine = NativeEngine::without_plugins();
        assert_eq!(
            engine.register_plugin(Plugin::ScrollTrigger),
            Err(EngineError::PluginUnavailable("ScrollTrigger"))
        );
    }

    #[test]
    fn test_trigger_requires_plugin() {
        let engine = NativeEngine::with_seed(1);
        let ctx = engine.create_context();
        let tl = engine.create_timeline(ctx).unwrap();
        assert!(matches!(
            engine.register_scroll_trigger(tl, trigger_spec()),
            Err(EngineError::PluginUnavailable(_))
        ));
        assert_eq!(engine.active_triggers(), 0);
    }

    #[test]
    fn test_unknown_handles() {
        let engine = NativeEngine::with_seed(1);
        assert_eq!(
            engine.create_timeline(ContextId(99)),
            Err(EngineError::UnknownContext(99))
        );
        assert_eq!(
            engine.tween_to(TimelineId(5), &reels(), &TweenSpec::default()),
            Err(EngineError::UnknownTimeline(5))
        );
    }

    #[test]
    fn test_scroll_plays_and_reverses() {
        let (engine, _ctx, tl) = setup();
        engine.register_scroll_trigger(tl, trigger_spec()).unwrap();

        engine.update_scroll(0.0, 24.0);
        engine.tick(0.5);
        assert_eq!(engine.timeline_progress(tl), Some(0.0));

        // Into the band: play
        engine.update_scroll(24.0, 24.0);
        assert!(engine.is_animating());
        engine.tick(5.0);
        assert_eq!(engine.timeline_progress(tl), Some(1.0));
        for reel in reels() {
            assert!((engine.reel_y_percent(reel) + 50.0).abs() < 1e-4);
        }

        // Past the band and back into it: nothing
        engine.update_scroll(40.0, 24.0);
        engine.update_scroll(24.0, 24.0);
        assert!(!engine.is_animating());

        // Back above the band: reverse
        engine.update_scroll(0.0, 24.0);
        engine.tick(5.0);
        assert_eq!(engine.timeline_progress(tl), Some(0.0));
    }

    #[test]
    fn test_registration_waits_for_next_scroll_report() {
        let (engine, _ctx, tl) = setup();
        engine.update_scroll(24.0, 24.0);
        engine.register_scroll_trigger(tl, trigger_spec()).unwrap();
        assert!(!engine.is_animating());

        // Only the height reported now counts: 100 rows puts the band at
        // [-19, -9], so row 24 is past it and the trigger enters then leaves
        engine.update_scroll(24.0, 100.0);
        assert!(engine.is_animating());
    }

    #[test]
    fn test_refresh_keeps_completed_timeline() {
        let (engine, _ctx, tl) = setup();
        let trigger = engine.register_scroll_trigger(tl, trigger_spec()).unwrap();
        engine.update_scroll(24.0, 24.0);
        engine.tick(5.0);
        engine.update_scroll(40.0, 24.0);

        engine
            .refresh_trigger(trigger, TriggerRect::new(25.0, 25.0), 40.0, 25.0)
            .unwrap();
        engine.update_scroll(40.0, 25.0);
        assert!(!engine.is_animating());
        assert_eq!(engine.timeline_progress(tl), Some(1.0));
        for reel in reels() {
            assert!((engine.reel_y_percent(reel) + 50.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_refresh_unknown_trigger() {
        let engine = NativeEngine::with_seed(1);
        assert_eq!(
            engine.refresh_trigger(TriggerId(7), TriggerRect::default(), 0.0, 24.0),
            Err(EngineError::UnknownTrigger(7))
        );
    }

    #[test]
    fn test_revert_releases_everything() {
        let (engine, ctx, tl) = setup();
        engine.register_scroll_trigger(tl, trigger_spec()).unwrap();
        engine.update_scroll(24.0, 24.0);
        engine.tick(0.5);
        assert_eq!(engine.active_triggers(), 1);
        assert_eq!(engine.active_timelines(), 1);

        engine.revert(ctx);
        assert_eq!(engine.active_triggers(), 0);
        assert_eq!(engine.active_timelines(), 0);
        assert_eq!(engine.active_contexts(), 0);
        assert_eq!(engine.reel_y_percent(reels()[0]), 0.0);

        // Scrolling after revert reaches nothing; reverting again is a no-op
        engine.update_scroll(0.0, 24.0);
        engine.revert(ctx);
        assert!(!engine.is_animating());
    }

    #[test]
    fn test_untouched_reel_is_at_rest() {
        let engine = NativeEngine::with_seed(1);
        assert_eq!(engine.reel_y_percent(CharPosition::new(7, 7)), 0.0);
    }
}
