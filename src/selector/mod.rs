//! Character Selector - decides which letters animate.
//!
//! Two policies share the same output shape, an [`AnimationMask`]:
//!
//! - [`OddQuotaSelector`] - per phrase, an odd number of reels with at least
//!   one real letter between any two of them.
//! - [`GlobalQuotaSelector`] - a fixed budget of reels across the whole list,
//!   never two neighbours in the same phrase.
//!
//! Both draw from the injected random source, so a seeded generator gives
//! reproducible masks.
//!
//! # Example
//!
//! ```ignore
//! use rand::{rngs::StdRng, SeedableRng};
//! use slot_reveal::selector::{OddQuotaSelector, Selector};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let phrases = vec!["Learn it".to_string(), "Use it".to_string()];
//! let mask = OddQuotaSelector::default().select(&phrases, &mut rng);
//! assert_eq!(mask.row(1).len(), 6);
//! ```

mod global_quota;
mod odd_quota;

pub use global_quota::GlobalQuotaSelector;
pub use odd_quota::OddQuotaSelector;

use rand::RngCore;

use crate::config::{RevealConfig, SelectionPolicy};
use crate::types::AnimationMask;

// =============================================================================
// Selector trait
// =============================================================================

/// A character selection policy.
pub trait Selector {
    /// Compute a fresh mask for `phrases`.
    fn select(&self, phrases: &[String], rng: &mut dyn RngCore) -> AnimationMask;
}

/// Build the selector named by the config.
pub fn selector_for(config: &RevealConfig) -> Box<dyn Selector> {
    match config.policy {
        SelectionPolicy::OddQuota => Box::new(OddQuotaSelector::new(config.odd_quotas.clone())),
        SelectionPolicy::GlobalQuota => Box::new(GlobalQuotaSelector::new(config.global_quota)),
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Indices of every character that can become a reel (anything but a space).
pub fn letter_indices(chars: &[char]) -> Vec<usize> {
    chars
        .iter()
        .enumerate()
        .filter(|(_, c)| **c != ' ')
        .map(|(i, _)| i)
        .collect()
}

/// True when the characters strictly between `a` and `b` include a
/// non-whitespace character.
pub fn has_letter_between(chars: &[char], a: usize, b: usize) -> bool {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    if hi <= lo + 1 {
        return false;
    }
    chars[lo + 1..hi.min(chars.len())]
        .iter()
        .any(|c| !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_letter_indices_skip_spaces() {
        assert_eq!(letter_indices(&chars("Use it")), vec![0, 1, 2, 4, 5]);
        assert!(letter_indices(&chars("   ")).is_empty());
        assert!(letter_indices(&chars("")).is_empty());
    }

    #[test]
    fn test_has_letter_between() {
        let use_it = chars("Use it");
        assert!(has_letter_between(&use_it, 0, 2));
        assert!(has_letter_between(&use_it, 5, 0));
        assert!(!has_letter_between(&use_it, 0, 1));
        assert!(!has_letter_between(&use_it, 1, 1));
        // Only a space between 'e' (2) and 'i' (4)
        assert!(!has_letter_between(&use_it, 2, 4));
    }

    #[test]
    fn test_selector_for_policy() {
        let mut rng = StdRng::seed_from_u64(1);
        let phrases = vec!["abcdefghijklmnop".to_string(); 4];

        let config = RevealConfig {
            policy: SelectionPolicy::GlobalQuota,
            global_quota: 3,
            ..Default::default()
        };
        let mask = selector_for(&config).select(&phrases, &mut rng);
        assert_eq!(mask.total(), 3);

        let config = RevealConfig {
            policy: SelectionPolicy::OddQuota,
            odd_quotas: vec![1],
            ..Default::default()
        };
        let mask = selector_for(&config).select(&phrases, &mut rng);
        assert_eq!(mask.total(), 4);
    }
}
