//! Pairwise collision resolution: eating and bounce.
//!
//! The predicates and the bounce math are pure; the world applies the
//! results to its collections. Bounce is gated to pairs of similar size so a
//! much-bigger cell can still glide over prey it cannot yet engulf.

use super::entity::{Body, EAT_RADIUS_RATIO};
use super::vec2::Vec2;

/// Mass gained per point of debris nutrition value.
pub const FOOD_MASS_FACTOR: f32 = 5.0;

/// Restitution for cell-on-cell bounces.
pub const BOUNCE_RESTITUTION: f32 = 0.6;

/// Restitution for the soft self-separation of sibling player cells waiting
/// on their merge window.
pub const SELF_SEPARATION_RESTITUTION: f32 = 0.1;

/// Which way, if either, a pair resolves as an eat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EatOutcome {
    /// The first body engulfs the second.
    First,
    /// The second body engulfs the first.
    Second,
    /// Neither body can eat the other.
    Neither,
}

/// Evaluates the asymmetric eating predicate for a pair.
///
/// At most one direction can hold, so the outcome is unambiguous.
pub fn eat_outcome(a: &Body, b: &Body) -> EatOutcome {
    if a.can_eat(b) {
        EatOutcome::First
    } else if b.can_eat(a) {
        EatOutcome::Second
    } else {
        EatOutcome::Neither
    }
}

/// True when two non-eating cells are close enough in size to bounce.
///
/// Pairs whose radii differ by more than the eating ratio pass through each
/// other instead.
pub fn should_bounce(a: &Body, b: &Body) -> bool {
    let (big, small) = if a.radius() >= b.radius() {
        (a.radius(), b.radius())
    } else {
        (b.radius(), a.radius())
    };
    big <= small * EAT_RADIUS_RATIO
}

/// Kinematic state of one body entering a bounce.
#[derive(Debug, Clone, Copy)]
pub struct BounceBody {
    /// Center position.
    pub pos: Vec2,
    /// Current velocity.
    pub vel: Vec2,
    /// Mass, used to weight the correction and the impulse.
    pub mass: f32,
    /// Radius, used for the overlap test.
    pub radius: f32,
}

/// Resolves an overlap between two bodies.
///
/// Applies a mass-weighted positional correction (each body pushed out
/// proportionally to the other's mass) and, when the bodies approach along
/// the contact normal, an impulse-based elastic response with the given
/// restitution. Returns the updated pair, or `None` when the bodies do not
/// overlap.
pub fn resolve_bounce(
    a: BounceBody,
    b: BounceBody,
    restitution: f32,
) -> Option<(BounceBody, BounceBody)> {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let overlap = a.radius + b.radius - dist;
    if overlap <= 0.0 {
        return None;
    }
    let normal = if dist <= f32::EPSILON {
        Vec2::UNIT_X
    } else {
        delta / dist
    };

    let total_mass = a.mass + b.mass;
    let mut out_a = a;
    let mut out_b = b;
    out_a.pos = a.pos - normal * (overlap * (b.mass / total_mass));
    out_b.pos = b.pos + normal * (overlap * (a.mass / total_mass));

    let relative = b.vel - a.vel;
    let approaching = relative.dot(normal);
    if approaching < 0.0 {
        let impulse = -(1.0 + restitution) * approaching / (1.0 / a.mass + 1.0 / b.mass);
        out_a.vel = a.vel - normal * (impulse / a.mass);
        out_b.vel = b.vel + normal * (impulse / b.mass);
    }

    Some((out_a, out_b))
}
