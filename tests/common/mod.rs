//! Counting animation engine double.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use slot_reveal::engine::{ScrollTriggerSpec, TriggerRect};
use slot_reveal::{
    AnimationEngine, ContextId, EngineError, Plugin, ReelId, TimelineId, TriggerId, TweenSpec,
};

#[derive(Debug, Default)]
struct MockContext {
    timelines: Vec<TimelineId>,
    triggers: Vec<TriggerId>,
}

/// Records every call and tracks what is currently registered.
#[derive(Debug, Default)]
pub struct MockEngine {
    pub missing_plugin: bool,
    next_id: Cell<u64>,
    contexts: RefCell<BTreeMap<ContextId, MockContext>>,
    timeline_owner: RefCell<BTreeMap<TimelineId, ContextId>>,
    pub tweened: RefCell<Vec<(TimelineId, Vec<ReelId>, TweenSpec)>>,
    pub triggers_registered: Cell<usize>,
    pub trigger_specs: RefCell<Vec<ScrollTriggerSpec>>,
    pub refreshes: RefCell<Vec<(TriggerId, TriggerRect)>>,
    pub reverts: Cell<usize>,
    pub scroll_updates: RefCell<Vec<(f32, f32)>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_plugin() -> Self {
        Self {
            missing_plugin: true,
            ..Default::default()
        }
    }

    pub fn active_contexts(&self) -> usize {
        self.contexts.borrow().len()
    }

    fn next(&self) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl AnimationEngine for MockEngine {
    fn register_plugin(&self, plugin: Plugin) -> Result<(), EngineError> {
        if self.missing_plugin {
            return Err(EngineError::PluginUnavailable(plugin.name()));
        }
        Ok(())
    }

    fn create_context(&self) -> ContextId {
        let id = ContextId(self.next());
        self.contexts.borrow_mut().insert(id, MockContext::default());
        id
    }

    fn revert(&self, context: ContextId) {
        if let Some(ctx) = self.contexts.borrow_mut().remove(&context) {
            let mut owners = self.timeline_owner.borrow_mut();
            for timeline in ctx.timelines {
                owners.remove(&timeline);
            }
            self.reverts.set(self.reverts.get() + 1);
        }
    }

    fn create_timeline(&self, context: ContextId) -> Result<TimelineId, EngineError> {
        let id = TimelineId(self.next());
        let mut contexts = self.contexts.borrow_mut();
        let ctx = contexts
            .get_mut(&context)
            .ok_or(EngineError::UnknownContext(context.0))?;
        ctx.timelines.push(id);
        self.timeline_owner.borrow_mut().insert(id, context);
        Ok(id)
    }

    fn tween_to(
        &self,
        timeline: TimelineId,
        targets: &[ReelId],
        tween: &TweenSpec,
    ) -> Result<(), EngineError> {
        if !self.timeline_owner.borrow().contains_key(&timeline) {
            return Err(EngineError::UnknownTimeline(timeline.0));
        }
        self.tweened
            .borrow_mut()
            .push((timeline, targets.to_vec(), *tween));
        Ok(())
    }

    fn register_scroll_trigger(
        &self,
        timeline: TimelineId,
        trigger: ScrollTriggerSpec,
    ) -> Result<TriggerId, EngineError> {
        let context = *self
            .timeline_owner
            .borrow()
            .get(&timeline)
            .ok_or(EngineError::UnknownTimeline(timeline.0))?;
        let id = TriggerId(self.next());
        if let Some(ctx) = self.contexts.borrow_mut().get_mut(&context) {
            ctx.triggers.push(id);
        }
        self.triggers_registered
            .set(self.triggers_registered.get() + 1);
        self.trigger_specs.borrow_mut().push(trigger);
        Ok(id)
    }

    fn refresh_trigger(
        &self,
        trigger: TriggerId,
        rect: TriggerRect,
        _scroll_y: f32,
        _viewport_height: f32,
    ) -> Result<(), EngineError> {
        let known = self
            .contexts
            .borrow()
            .values()
            .any(|c| c.triggers.contains(&trigger));
        if !known {
            return Err(EngineError::UnknownTrigger(trigger.0));
        }
        self.refreshes.borrow_mut().push((trigger, rect));
        Ok(())
    }

    fn update_scroll(&self, scroll_y: f32, viewport_height: f32) {
        self.scroll_updates
            .borrow_mut()
            .push((scroll_y, viewport_height));
    }

    fn tick(&self, _dt: f32) {}

    fn reel_y_percent(&self, _reel: ReelId) -> f32 {
        0.0
    }

    fn active_triggers(&self) -> usize {
        self.contexts
            .borrow()
            .values()
            .map(|c| c.triggers.len())
            .sum()
    }

    fn active_timelines(&self) -> usize {
        self.timeline_owner.borrow().len()
    }

    fn is_animating(&self) -> bool {
        false
    }
}
