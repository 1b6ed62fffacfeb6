//! Per-phrase odd quota with a letter-gap rule.
//!
//! For each phrase independently:
//!
//! 1. Candidates are the indices of non-space characters.
//! 2. The target is drawn uniformly from the configured quotas that fit the
//!    candidate count (falling back to 1 when none fit).
//! 3. Candidates are shuffled and accepted greedily as long as every pair of
//!    accepted indices has a non-whitespace character strictly between them.
//!
//! If the shuffle exhausts the candidates before reaching the target and the
//! accepted count is even, the last accepted index is released so the line
//! keeps an odd number of reels.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::{has_letter_between, letter_indices, Selector};
use crate::types::{AnimationMask, CharPosition};

/// Reel counts used when none are configured.
pub const DEFAULT_ODD_QUOTAS: [usize; 5] = [1, 3, 5, 7, 9];

/// Odd-quota selection policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OddQuotaSelector {
    quotas: Vec<usize>,
}

impl OddQuotaSelector {
    /// Create a selector drawing from `quotas`. Even and zero entries are
    /// dropped since the line must end up with an odd reel count.
    pub fn new(quotas: Vec<usize>) -> Self {
        let mut quotas: Vec<usize> = quotas.into_iter().filter(|q| q % 2 == 1).collect();
        quotas.sort_unstable();
        quotas.dedup();
        Self { quotas }
    }

    pub fn quotas(&self) -> &[usize] {
        &self.quotas
    }

    /// Quotas that fit `letters` candidates, or `[1]` if none do.
    pub fn allowed_counts(&self, letters: usize) -> Vec<usize> {
        let allowed: Vec<usize> = self.quotas.iter().copied().filter(|&q| q <= letters).collect();
        if allowed.is_empty() { vec![1] } else { allowed }
    }

    /// Select reel indices for a single phrase.
    pub fn select_phrase<R: Rng + ?Sized>(&self, phrase: &str, rng: &mut R) -> Vec<usize> {
        let chars: Vec<char> = phrase.chars().collect();
        let mut candidates = letter_indices(&chars);
        if candidates.is_empty() {
            return Vec::new();
        }

        let allowed = self.allowed_counts(candidates.len());
        let target = allowed[rng.gen_range(0..allowed.len())];

        candidates.shuffle(rng);

        let mut selected: Vec<usize> = Vec::with_capacity(target);
        for candidate in candidates {
            if selected.len() >= target {
                break;
            }
            let spaced = selected
                .iter()
                .all(|&chosen| has_letter_between(&chars, candidate, chosen));
            if spaced {
                selected.push(candidate);
            }
        }

        if selected.len() % 2 == 0 {
            selected.pop();
        }
        selected
    }
}

impl Default for OddQuotaSelector {
    fn default() -> Self {
        Self::new(DEFAULT_ODD_QUOTAS.to_vec())
    }
}

impl Selector for OddQuotaSelector {
    fn select(&self, phrases: &[String], rng: &mut dyn RngCore) -> AnimationMask {
        let mut mask = AnimationMask::empty_for(phrases);
        for (p, phrase) in phrases.iter().enumerate() {
            for index in self.select_phrase(phrase, rng) {
                mask.mark(CharPosition::new(p, index));
            }
        }
        mask
    }
}
