//! Global fixed quota with a no-adjacency rule.
//!
//! Every non-space character across the whole phrase list goes into one pool.
//! The pool is shuffled and accepted greedily until the quota is met, skipping
//! any candidate that sits directly next to an accepted one in the same phrase.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::{letter_indices, Selector};
use crate::types::{AnimationMask, CharPosition};

/// Reel budget used when none is configured.
pub const DEFAULT_GLOBAL_QUOTA: usize = 8;

/// Global-quota selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalQuotaSelector {
    quota: usize,
}

impl GlobalQuotaSelector {
    pub fn new(quota: usize) -> Self {
        Self { quota }
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Every candidate position across `phrases`, in reading order.
    pub fn candidate_pool(phrases: &[String]) -> Vec<CharPosition> {
        phrases
            .iter()
            .enumerate()
            .flat_map(|(p, phrase)| {
                let chars: Vec<char> = phrase.chars().collect();
                letter_indices(&chars)
                    .into_iter()
                    .map(move |i| CharPosition::new(p, i))
            })
            .collect()
    }

    /// Select reel positions across `phrases`.
    pub fn select_positions<R: Rng + ?Sized>(
        &self,
        phrases: &[String],
        rng: &mut R,
    ) -> Vec<CharPosition> {
        let mut pool = Self::candidate_pool(phrases);
        pool.shuffle(rng);

        let mut accepted: HashSet<CharPosition> = HashSet::new();
        let mut selected = Vec::with_capacity(self.quota.min(pool.len()));

        for candidate in pool {
            if selected.len() >= self.quota {
                break;
            }
            let left = candidate
                .index
                .checked_sub(1)
                .map(|i| CharPosition::new(candidate.phrase, i));
            let right = CharPosition::new(candidate.phrase, candidate.index + 1);

            let touches = left.is_some_and(|l| accepted.contains(&l)) || accepted.contains(&right);
            if !touches {
                accepted.insert(candidate);
                selected.push(candidate);
            }
        }
        selected
    }
}

impl Default for GlobalQuotaSelector {
    fn default() -> Self {
        Self::new(DEFAULT_GLOBAL_QUOTA)
    }
}

impl Selector for GlobalQuotaSelector {
    fn select(&self, phrases: &[String], rng: &mut dyn RngCore) -> AnimationMask {
        let mut mask = AnimationMask::empty_for(phrases);
        for pos in self.select_positions(phrases, rng) {
            mask.mark(pos);
        }
        mask
    }
}
