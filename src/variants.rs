//! Cosmetic duck skins and the shuffle-without-repeat selection bag.

use crate::constants::VARIANT_COUNT;
use rand::seq::SliceRandom;
use rand::Rng;

/// Display names for the skins, indexed by variant id.
pub const VARIANT_NAMES: [&str; VARIANT_COUNT as usize] = [
    "Classic", "Golden", "Midnight", "Mallard", "Snowy", "Rubber",
];

pub fn variant_name(variant: u32) -> &'static str {
    VARIANT_NAMES
        .get(variant as usize)
        .copied()
        .unwrap_or(VARIANT_NAMES[0])
}

/// Draws variants without repeating until every skin has been seen once,
/// then reshuffles and starts over.
///
/// Purely a client-side convenience; the bag is reseeded each session and
/// never synchronized across devices.
#[derive(Debug, Clone, Default)]
pub struct VariantBag {
    remaining: Vec<u32>,
}

impl VariantBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the next variant, refilling and reshuffling only once the bag
    /// is exhausted.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> u32 {
        if self.remaining.is_empty() {
            self.remaining = (0..VARIANT_COUNT).collect();
            self.remaining.shuffle(rng);
        }
        // Non-empty by construction
        self.remaining.pop().unwrap_or(0)
    }

    pub fn left_in_bag(&self) -> usize {
        self.remaining.len()
    }
}
