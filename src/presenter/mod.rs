//! Slot Reveal Presenter - phrases in, animated markup out.
//!
//! The presenter wires the pipeline explicitly:
//!
//! ```text
//! phrases Signal → mask derived → teardown previous setup → markup + layout
//!                                                        → setup new timeline + trigger
//! ```
//!
//! The mask lives in a `derived`, so it is computed once per phrase change
//! and cached across renders. Animation setup is re-run only when the mask
//! was recomputed, and the previous context is always reverted first, so no
//! more than one scroll trigger exists per presenter. A resize only moves the
//! trigger band; a reveal that has already played stays played.
//!
//! # Example
//!
//! ```ignore
//! use slot_reveal::{SlotReveal, RevealProps, Viewport};
//!
//! let mut reveal = SlotReveal::mount(RevealProps::default());
//! reveal.render(Viewport::new(80, 24))?;
//!
//! reveal.scroll_to(24);
//! reveal.tick(1.0 / 60.0);
//! let frame = reveal.frame();
//!
//! reveal.set_phrases(vec!["Ship it".into()]);
//! reveal.render(Viewport::new(80, 24))?; // recompute, revert, set up again
//!
//! reveal.unmount();
//! ```

mod state;

pub use state::{AnimationHandles, PresenterState};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use spark_signals::{derived, signal, Signal};
use tracing::{debug, error, warn};

use crate::config::RevealConfig;
use crate::engine::{
    AnimationEngine, ContextId, NativeEngine, Plugin, ScrollTriggerSpec, Stagger, StaggerFrom,
    ToggleActions, TweenSpec, REEL_MARKER,
};
use crate::error::{EngineError, Result};
use crate::layout::{compute_page_layout, PageLayout};
use crate::primitives::{render_phrases, Markup};
use crate::renderer::{rasterize, FrameBuffer};
use crate::selector::{selector_for, Selector};
use crate::types::{AnimationMask, ReelId, Viewport};

/// Phrases shown when none are supplied.
pub const DEFAULT_PHRASES: [&str; 3] = ["Learn it", "Tweak it", "Use it"];

// =============================================================================
// Props
// =============================================================================

/// Everything a slot reveal is mounted with.
pub struct RevealProps {
    /// Phrases in render order. `None` uses [`DEFAULT_PHRASES`].
    pub phrases: Option<Vec<String>>,
    pub config: RevealConfig,
    /// Animation engine. `None` means no engine is available and the
    /// phrases render statically.
    pub engine: Option<Rc<dyn AnimationEngine>>,
    /// Random source for selection. `None` seeds from entropy.
    pub rng: Option<Box<dyn RngCore>>,
    /// Selection policy. `None` uses the one named by `config.policy`.
    pub selector: Option<Box<dyn Selector>>,
}

impl Default for RevealProps {
    fn default() -> Self {
        Self {
            phrases: None,
            config: RevealConfig::default(),
            engine: Some(Rc::new(NativeEngine::new())),
            rng: None,
            selector: None,
        }
    }
}

// =============================================================================
// SlotReveal
// =============================================================================

/// A mounted slot reveal.
pub struct SlotReveal {
    config: RevealConfig,
    engine: Option<Rc<dyn AnimationEngine>>,
    phrases: Signal<Vec<String>>,
    read_mask: Box<dyn Fn() -> AnimationMask>,
    /// Number of times the selector has run.
    selector_runs: Rc<Cell<u64>>,
    state: PresenterState,
    /// Mask generation and viewport the current setup was built for.
    setup_key: Option<(u64, Viewport)>,
    markup: Markup,
    layout: Option<PageLayout>,
    scroll_y: u16,
}

impl SlotReveal {
    /// Mount a slot reveal. No markup or animation exists until the first
    /// [`render`].
    ///
    /// [`render`]: SlotReveal::render
    pub fn mount(props: RevealProps) -> Self {
        let RevealProps {
            phrases,
            config,
            engine,
            rng,
            selector,
        } = props;

        let phrases = signal(phrases.unwrap_or_else(Self::default_phrases));
        let selector: Rc<dyn Selector> = match selector {
            Some(s) => Rc::from(s),
            None => Rc::from(selector_for(&config)),
        };
        let rng: Rc<RefCell<Box<dyn RngCore>>> = Rc::new(RefCell::new(
            rng.unwrap_or_else(|| Box::new(StdRng::from_entropy())),
        ));
        let selector_runs = Rc::new(Cell::new(0u64));

        let phrases_for_mask = phrases.clone();
        let runs_for_mask = selector_runs.clone();
        let mask_derived = derived(move || {
            // Read phrases (creates reactive dependency)
            let list = phrases_for_mask.get();
            let mask = selector.select(&list, &mut **rng.borrow_mut());

            runs_for_mask.set(runs_for_mask.get() + 1);
            debug!(
                run = runs_for_mask.get(),
                phrases = list.len(),
                reels = mask.total(),
                "animation mask computed"
            );
            mask
        });

        Self {
            config,
            engine,
            phrases,
            read_mask: Box::new(move || mask_derived.get()),
            selector_runs,
            state: PresenterState::Idle,
            setup_key: None,
            markup: Markup::default(),
            layout: None,
            scroll_y: 0,
        }
    }

    /// Default props, seeded selection.
    pub fn with_seed(seed: u64) -> Self {
        Self::mount(RevealProps {
            rng: Some(Box::new(StdRng::seed_from_u64(seed))),
            engine: Some(Rc::new(NativeEngine::with_seed(seed))),
            ..Default::default()
        })
    }

    /// [`DEFAULT_PHRASES`] as an owned list.
    pub fn default_phrases() -> Vec<String> {
        DEFAULT_PHRASES.iter().map(|s| s.to_string()).collect()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn phrases(&self) -> Vec<String> {
        self.phrases.get()
    }

    /// The memoized mask (computes it on first use).
    pub fn mask(&self) -> AnimationMask {
        (self.read_mask)()
    }

    pub fn selector_runs(&self) -> u64 {
        self.selector_runs.get()
    }

    /// Mask generation the current animation setup was built from.
    pub fn mask_generation(&self) -> Option<u64> {
        self.setup_key.map(|(generation, _)| generation)
    }

    pub fn state(&self) -> PresenterState {
        self.state
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    pub fn layout(&self) -> Option<&PageLayout> {
        self.layout.as_ref()
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn scroll_y(&self) -> u16 {
        self.scroll_y
    }

    /// True while a reel is moving.
    pub fn is_animating(&self) -> bool {
        self.state.is_animating() && self.engine.as_ref().is_some_and(|e| e.is_animating())
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Replace the phrase list. The next [`render`](SlotReveal::render)
    /// recomputes the mask and rebuilds the animation.
    pub fn set_phrases(&mut self, phrases: Vec<String>) {
        self.phrases.set(phrases);
    }

    /// Render pass: read the mask, rebuild markup and layout, and re-run
    /// animation setup if the mask changed. A viewport-only change keeps the
    /// timeline and moves the trigger band.
    pub fn render(&mut self, viewport: Viewport) -> Result<()> {
        let mask = self.mask();
        let generation = self.selector_runs.get();
        let needs_setup = self.mask_generation() != Some(generation);
        let resized = !needs_setup && self.setup_key.map(|(_, v)| v) != Some(viewport);

        if needs_setup {
            self.teardown();
        }

        let phrases = self.phrases.get();
        self.markup = render_phrases(
            &phrases,
            &mask,
            self.config.reel_length,
            self.config.spacer_width,
        );
        let layout = compute_page_layout(&self.markup, viewport, self.config.line_gap)?;
        self.scroll_y = self.scroll_y.min(layout.max_scroll());
        self.layout = Some(layout);

        if needs_setup {
            self.state = self.setup();
        } else if resized {
            self.refresh();
        }
        self.setup_key = Some((generation, viewport));
        Ok(())
    }

    /// Point the live trigger at the relaid-out phrase section. Falls back
    /// to a full rebuild if the engine no longer knows the trigger.
    fn refresh(&mut self) {
        let PresenterState::Animating(handles) = self.state else {
            return;
        };
        let (Some(engine), Some(layout)) = (self.engine.as_ref(), self.layout.as_ref()) else {
            return;
        };
        let viewport_height = layout.viewport.height as f32;
        let refreshed = engine.refresh_trigger(
            handles.trigger,
            layout.trigger,
            self.scroll_y as f32,
            viewport_height,
        );
        match refreshed {
            Ok(()) => engine.update_scroll(self.scroll_y as f32, viewport_height),
            Err(err) => {
                warn!(%err, "scroll trigger refresh failed; rebuilding animation");
                self.teardown();
                self.state = self.setup();
            }
        }
    }

    /// Revert all animation state and return to `Idle`.
    pub fn unmount(&mut self) {
        self.teardown();
        self.setup_key = None;
        self.layout = None;
        self.markup = Markup::default();
    }

    fn teardown(&mut self) {
        if let PresenterState::Animating(handles) = self.state {
            if let Some(engine) = &self.engine {
                engine.revert(handles.context);
            }
            debug!(context = %handles.context, "slot reveal animation torn down");
        }
        self.state = PresenterState::Idle;
    }

    fn setup(&self) -> PresenterState {
        let Some(engine) = self.engine.as_ref() else {
            error!("animation engine unavailable; rendering slot text statically");
            return PresenterState::RenderedStatic;
        };
        if let Err(err) = engine.register_plugin(Plugin::ScrollTrigger) {
            error!(%err, "scroll trigger unavailable; rendering slot text statically");
            return PresenterState::RenderedStatic;
        }

        let reels = engine.collect_by_marker(&self.markup, REEL_MARKER);
        if reels.is_empty() {
            debug!("no reels to animate");
            return PresenterState::RenderedStatic;
        }

        let context = engine.create_context();
        match self.build_animation(engine.as_ref(), context, &reels) {
            Ok(handles) => {
                debug!(
                    context = %handles.context,
                    reels = reels.len(),
                    "slot reveal animation set up"
                );
                PresenterState::Animating(handles)
            }
            Err(err) => {
                engine.revert(context);
                error!(%err, "animation setup failed; rendering slot text statically");
                PresenterState::RenderedStatic
            }
        }
    }

    fn build_animation(
        &self,
        engine: &dyn AnimationEngine,
        context: ContextId,
        reels: &[ReelId],
    ) -> std::result::Result<AnimationHandles, EngineError> {
        let (trigger_rect, viewport_height) = self
            .layout
            .as_ref()
            .map(|layout| (layout.trigger, layout.viewport.height))
            .unwrap_or_default();

        let timeline = engine.create_timeline(context)?;
        engine.tween_to(
            timeline,
            reels,
            &TweenSpec {
                y_percent: self.config.reel_travel_percent(),
                duration: self.config.duration,
                ease: self.config.ease,
                stagger: Stagger {
                    amount: self.config.stagger_amount,
                    from: StaggerFrom::Random,
                },
            },
        )?;

        let toggle_actions = self.config.toggle_actions().unwrap_or_else(|err| {
            warn!(%err, "using default toggle actions");
            ToggleActions::default()
        });
        let trigger = engine.register_scroll_trigger(
            timeline,
            ScrollTriggerSpec {
                trigger: trigger_rect,
                start: self.config.band_start,
                end: self.config.band_end,
                toggle_actions,
            },
        )?;
        engine.update_scroll(self.scroll_y as f32, viewport_height as f32);

        Ok(AnimationHandles {
            context,
            timeline,
            trigger,
        })
    }

    // -------------------------------------------------------------------------
    // Driving
    // -------------------------------------------------------------------------

    /// Scroll the page to `y` rows (clamped to the page).
    pub fn scroll_to(&mut self, y: u16) {
        let Some(layout) = &self.layout else {
            self.scroll_y = y;
            return;
        };
        self.scroll_y = y.min(layout.max_scroll());
        if self.state.is_animating() {
            if let Some(engine) = &self.engine {
                engine.update_scroll(self.scroll_y as f32, layout.viewport.height as f32);
            }
        }
    }

    /// Scroll by a signed number of rows.
    pub fn scroll_by(&mut self, delta: i32) {
        let y = (self.scroll_y as i32 + delta).clamp(0, u16::MAX as i32) as u16;
        self.scroll_to(y);
    }

    /// Advance the animation clock by `dt` seconds.
    pub fn tick(&self, dt: f32) {
        if self.state.is_animating() {
            if let Some(engine) = &self.engine {
                engine.tick(dt);
            }
        }
    }

    /// Draw the current viewport. Empty until the first render.
    pub fn frame(&self) -> FrameBuffer {
        let Some(layout) = &self.layout else {
            return FrameBuffer::new(0, 0);
        };
        let engine = self.engine.as_ref().filter(|_| self.state.is_animating());
        rasterize(&self.markup, layout, self.scroll_y, |reel| {
            engine.map_or(0.0, |e| e.reel_y_percent(reel))
        })
    }
}

impl Drop for SlotReveal {
    fn drop(&mut self) {
        self.teardown();
    }
}
