//! Shared positional and mass state for circular bodies.
//!
//! Every simulated body (player cell, AI drifter) is a circle whose radius is
//! derived from its mass. Food carries its own cosmetic radius and does not
//! use this type.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::vec2::Vec2;

/// A body must be at least this much bigger in radius to eat another.
pub const EAT_RADIUS_RATIO: f32 = 1.1;

/// Fraction of the defender's radius forgiven in the engulfment test, so
/// eating feels responsive without full geometric containment.
pub const ENGULF_FORGIVENESS: f32 = 0.3;

/// A circular body with a mass-derived radius.
///
/// The radius is always `sqrt(mass / π)`. [`Body::set_mass`] is the only way
/// to change size and keeps the two in lockstep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    /// Center position in world units.
    pub pos: Vec2,
    mass: f32,
    radius: f32,
}

impl Body {
    /// Creates a body at `pos` with the given mass.
    pub fn new(pos: Vec2, mass: f32) -> Self {
        Self {
            pos,
            mass,
            radius: radius_for_mass(mass),
        }
    }

    /// Current mass.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Current radius, derived from mass.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Sets the mass and recomputes the derived radius.
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
        self.radius = radius_for_mass(mass);
    }

    /// True when the two circles overlap.
    pub fn collides_with(&self, other: &Self) -> bool {
        self.pos.distance_to(other.pos) < self.radius + other.radius
    }

    /// Asymmetric eating predicate.
    ///
    /// Requires this body to be more than 10% bigger in radius, and the
    /// other's center to lie within `radius - other.radius * 0.3` of this
    /// center. Both directions can never hold for the same pair.
    pub fn can_eat(&self, other: &Self) -> bool {
        if self.radius <= other.radius * EAT_RADIUS_RATIO {
            return false;
        }
        self.pos.distance_to(other.pos) < self.radius - other.radius * ENGULF_FORGIVENESS
    }

    /// Size-dependent speed cap shared by player cells and AI drifters.
    ///
    /// Larger bodies move slower: `max(1, 10 * radius^-0.439 * 1.5)` world
    /// units per sub-step at unit scale.
    pub fn max_speed(&self) -> f32 {
        (10.0 * self.radius.powf(-0.439) * 1.5).max(1.0)
    }
}

/// Radius of a circle whose area equals `mass`.
pub fn radius_for_mass(mass: f32) -> f32 {
    (mass / PI).sqrt()
}
