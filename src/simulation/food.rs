//! Plastic debris drifting in the world as food.
//!
//! Debris is passive: created at world init and by the population maintainer,
//! destroyed the instant any cell overlaps it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// Smallest cosmetic radius for newly spawned debris.
pub const MIN_RADIUS: f32 = 3.0;
/// Largest cosmetic radius for newly spawned debris.
pub const MAX_RADIUS: f32 = 6.0;

/// The five debris types, each with a fixed nutrition value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    /// Plastic bottle.
    Bottle,
    /// Plastic bag.
    Bag,
    /// Fishing net fragment.
    Net,
    /// Drink can.
    Can,
    /// Microplastic cluster.
    Microplastic,
}

impl FoodKind {
    /// Every debris type, for uniform random draws.
    pub const ALL: [Self; 5] = [
        Self::Bottle,
        Self::Bag,
        Self::Net,
        Self::Can,
        Self::Microplastic,
    ];

    /// Fixed nutrition value of this debris type.
    pub fn value(self) -> f32 {
        match self {
            Self::Bottle => 10.0,
            Self::Bag => 6.0,
            Self::Net => 14.0,
            Self::Can => 8.0,
            Self::Microplastic => 3.0,
        }
    }
}

/// A piece of debris that cells can consume.
///
/// The radius is purely cosmetic/perceptual and is fixed at spawn; eating
/// math only uses it for the overlap test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    /// Position in world units.
    pub pos: Vec2,
    /// Debris type, which fixes the nutrition value.
    pub kind: FoodKind,
    /// Cosmetic radius.
    pub radius: f32,
    consumed: bool,
}

impl Food {
    /// Creates a piece of debris at a known position.
    pub fn new(pos: Vec2, kind: FoodKind, radius: f32) -> Self {
        Self {
            pos,
            kind,
            radius,
            consumed: false,
        }
    }

    /// Creates a piece of debris with uniform random position, type, and
    /// cosmetic radius.
    pub fn spawn_random(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        let kind = FoodKind::ALL[rng.random_range(0..FoodKind::ALL.len())];
        Self::new(
            Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height)),
            kind,
            rng.random_range(MIN_RADIUS..MAX_RADIUS),
        )
    }

    /// Nutrition value of this debris.
    pub fn value(&self) -> f32 {
        self.kind.value()
    }

    /// True once a cell has consumed this debris.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Marks this debris as consumed; it is filtered out at sub-step end.
    pub fn consume(&mut self) {
        self.consumed = true;
    }
}
