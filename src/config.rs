//! Configuration for the slot reveal widget.
//!
//! Every field has a default matching the stock widget, so a partial JSON
//! document only needs the keys it overrides:
//!
//! ```ignore
//! let config = RevealConfig::from_json_str(r#"{ "policy": "global_quota", "global_quota": 6 }"#)?;
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{Anchor, BandEdge, Ease, ToggleActions};
use crate::error::ConfigError;

/// Which selector decides the animated characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Per phrase: an odd count drawn from `odd_quotas`, with at least one
    /// letter between any two reels.
    OddQuota,
    /// Across all phrases: up to `global_quota` reels, never two neighbours
    /// in the same phrase.
    GlobalQuota,
}

impl Default for SelectionPolicy {
    #[cfg(not(feature = "global-quota"))]
    fn default() -> Self {
        SelectionPolicy::OddQuota
    }

    #[cfg(feature = "global-quota")]
    fn default() -> Self {
        SelectionPolicy::GlobalQuota
    }
}

/// Widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub policy: SelectionPolicy,
    /// Candidate per-phrase reel counts for [`SelectionPolicy::OddQuota`].
    pub odd_quotas: Vec<usize>,
    /// Total reel budget for [`SelectionPolicy::GlobalQuota`].
    pub global_quota: usize,
    /// Duplicate frames stacked above the final glyph in each reel.
    pub reel_length: usize,
    /// Seconds each reel takes to slide.
    pub duration: f32,
    /// Seconds across which reel start times are spread.
    pub stagger_amount: f32,
    pub ease: Ease,
    pub band_start: BandEdge,
    pub band_end: BandEdge,
    /// Four-word toggle form, e.g. `"play none none reverse"`.
    pub toggle_actions: String,
    /// Columns used for a space between words.
    pub spacer_width: u16,
    /// Blank rows between phrases.
    pub line_gap: u16,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            policy: SelectionPolicy::default(),
            odd_quotas: vec![1, 3, 5, 7, 9],
            global_quota: 8,
            reel_length: 1,
            duration: 1.0,
            stagger_amount: 0.6,
            ease: Ease::Power2InOut,
            band_start: BandEdge::new(Anchor::Center, 45.0),
            band_end: BandEdge::new(Anchor::Center, 55.0),
            toggle_actions: "play none none reverse".to_string(),
            spacer_width: 2,
            line_gap: 1,
        }
    }
}

impl RevealConfig {
    /// Parse a JSON document. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.toggle_actions()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parsed form of [`RevealConfig::toggle_actions`].
    pub fn toggle_actions(&self) -> Result<ToggleActions, ConfigError> {
        self.toggle_actions.parse()
    }

    /// Reel travel as a percentage of the reel height (negative = upward).
    ///
    /// With one duplicate frame the reel holds two cells and moves by one.
    pub fn reel_travel_percent(&self) -> f32 {
        let frames = self.reel_length as f32 + 1.0;
        -100.0 * (self.reel_length as f32 / frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ToggleAction;

    #[test]
    fn test_defaults() {
        let config = RevealConfig::default();
        assert_eq!(config.odd_quotas, vec![1, 3, 5, 7, 9]);
        assert_eq!(config.global_quota, 8);
        assert!((config.duration - 1.0).abs() < f32::EPSILON);
        assert!((config.stagger_amount - 0.6).abs() < f32::EPSILON);
        assert_eq!(config.ease, Ease::Power2InOut);
    }

    #[test]
    fn test_reel_travel_is_half_for_two_frames() {
        let config = RevealConfig::default();
        assert!((config.reel_travel_percent() + 50.0).abs() < 0.001);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            RevealConfig::from_json_str(r#"{ "policy": "global_quota", "global_quota": 6 }"#).unwrap();
        assert_eq!(config.policy, SelectionPolicy::GlobalQuota);
        assert_eq!(config.global_quota, 6);
        assert_eq!(config.odd_quotas, vec![1, 3, 5, 7, 9]);
        assert_eq!(config.spacer_width, 2);
    }

    #[test]
    fn test_band_edges_from_json() {
        let config = RevealConfig::from_json_str(
            r#"{ "band_start": { "anchor": "top", "viewport_percent": 80.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.band_start, BandEdge::new(Anchor::Top, 80.0));
        assert_eq!(config.band_end, BandEdge::new(Anchor::Center, 55.0));
    }

    #[test]
    fn test_toggle_actions_parse() {
        let actions = RevealConfig::default().toggle_actions().unwrap();
        assert_eq!(actions.on_enter, ToggleAction::Play);
        assert_eq!(actions.on_leave_back, ToggleAction::Reverse);
    }

    #[test]
    fn test_bad_toggle_actions_rejected() {
        let err = RevealConfig::from_json_str(r#"{ "toggle_actions": "play bounce" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ToggleActions(_)));
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(matches!(
            RevealConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
