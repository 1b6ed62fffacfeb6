//! Timeline playback.
//!
//! A timeline is a list of tracks, one per (tween, target). Each track knows
//! when it starts, how long it runs and where it moves its reel. Playback is
//! a single clock that runs forward or backward and is sampled on demand.

use rand::seq::SliceRandom;
use rand::Rng;

use super::spec::{StaggerFrom, ToggleAction, TweenSpec};
use super::ease::Ease;
use super::ContextId;
use crate::types::ReelId;

/// Clock direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Paused,
    Forward,
    Backward,
}

#[derive(Debug, Clone)]
struct Track {
    reel: ReelId,
    start: f32,
    duration: f32,
    from: f32,
    to: f32,
    ease: Ease,
}

impl Track {
    fn value_at(&self, time: f32) -> f32 {
        let t = if self.duration <= 0.0 {
            if time >= self.start { 1.0 } else { 0.0 }
        } else {
            (time - self.start) / self.duration
        };
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    fn end(&self) -> f32 {
        self.start + self.duration
    }
}

/// A playable sequence of tweens.
#[derive(Debug, Clone)]
pub struct Timeline {
    context: ContextId,
    tracks: Vec<Track>,
    time: f32,
    playback: Playback,
    reversed: bool,
}

impl Timeline {
    pub fn new(context: ContextId) -> Self {
        Self {
            context,
            tracks: Vec::new(),
            time: 0.0,
            playback: Playback::Paused,
            reversed: false,
        }
    }

    pub fn context(&self) -> ContextId {
        self.context
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f32 {
        self.tracks.iter().map(Track::end).fold(0.0, f32::max)
    }

    /// Normalized position in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let duration = self.duration();
        if duration <= 0.0 { 0.0 } else { self.time / duration }
    }

    /// Start offsets for `count` targets under the tween's stagger.
    pub fn stagger_offsets<R: Rng + ?Sized>(tween: &TweenSpec, count: usize, rng: &mut R) -> Vec<f32> {
        if count <= 1 {
            return vec![0.0; count];
        }
        let mut ranks: Vec<usize> = (0..count).collect();
        match tween.stagger.from {
            StaggerFrom::Start => {}
            StaggerFrom::End => ranks.reverse(),
            StaggerFrom::Random => ranks.shuffle(rng),
        }
        let step = tween.stagger.amount.max(0.0) / (count - 1) as f32;
        ranks.into_iter().map(|rank| rank as f32 * step).collect()
    }

    /// Append a tween for `targets`, starting where the timeline currently ends.
    pub fn add_tween<R: Rng + ?Sized>(&mut self, targets: &[ReelId], tween: &TweenSpec, rng: &mut R) {
        let base = self.duration();
        let offsets = Self::stagger_offsets(tween, targets.len(), rng);

        for (&reel, offset) in targets.iter().zip(offsets) {
            let from = self.final_value(reel).unwrap_or(0.0);
            self.tracks.push(Track {
                reel,
                start: base + offset,
                duration: tween.duration.max(0.0),
                from,
                to: tween.y_percent,
                ease: tween.ease,
            });
        }
    }

    fn final_value(&self, reel: ReelId) -> Option<f32> {
        self.tracks.iter().rev().find(|t| t.reel == reel).map(|t| t.to)
    }

    pub fn targets(&self, reel: ReelId) -> bool {
        self.tracks.iter().any(|t| t.reel == reel)
    }

    /// Reel offset at the current time, if this timeline moves the reel.
    pub fn value_of(&self, reel: ReelId) -> Option<f32> {
        let mut value = None;
        for track in self.tracks.iter().filter(|t| t.reel == reel) {
            if value.is_none() || self.time >= track.start {
                value = Some(track.value_at(self.time));
            }
        }
        value
    }

    pub fn play(&mut self) {
        self.reversed = false;
        self.playback = Playback::Forward;
    }

    pub fn reverse(&mut self) {
        self.reversed = true;
        self.playback = Playback::Backward;
    }

    pub fn pause(&mut self) {
        self.playback = Playback::Paused;
    }

    pub fn resume(&mut self) {
        self.playback = if self.reversed {
            Playback::Backward
        } else {
            Playback::Forward
        };
    }

    pub fn seek(&mut self, time: f32) {
        self.time = time.clamp(0.0, self.duration());
    }

    /// Apply a trigger toggle.
    pub fn apply(&mut self, action: ToggleAction) {
        match action {
            ToggleAction::Play => self.play(),
            ToggleAction::Pause => self.pause(),
            ToggleAction::Resume => self.resume(),
            ToggleAction::Reverse => self.reverse(),
            ToggleAction::Restart => {
                self.seek(0.0);
                self.play();
            }
            ToggleAction::Reset => {
                self.seek(0.0);
                self.reversed = false;
                self.pause();
            }
            ToggleAction::Complete => {
                let end = self.duration();
                self.seek(end);
                self.pause();
            }
            ToggleAction::None => {}
        }
    }

    /// Advance the clock. Playback stops at either end.
    pub fn tick(&mut self, dt: f32) {
        let duration = self.duration();
        match self.playback {
            Playback::Paused => {}
            Playback::Forward => {
                self.time = (self.time + dt).min(duration);
                if self.time >= duration {
                    self.playback = Playback::Paused;
                }
            }
            Playback::Backward => {
                self.time = (self.time - dt).max(0.0);
                if self.time <= 0.0 {
                    self.playback = Playback::Paused;
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.playback != Playback::Paused
    }
}
