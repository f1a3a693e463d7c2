//! AI drifters, difficulty tiers, and steering behavior.
//!
//! Each drifter perceives nearby debris, threats, and prey once per sub-step
//! and picks exactly one steering force: flee, chase, seek food, or wander.
//! Perception and eating use the same size threshold, so a drifter never
//! chases something it could not actually eat.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::ops::Range;
use tracing::debug;

use super::entity::{Body, EAT_RADIUS_RATIO};
use super::food::Food;
use super::params::{BoundaryMode, Config};
use super::spatial::SpatialIndex;
use super::vec2::Vec2;

/// Threat reaction distance as a multiple of the drifter's own radius.
const FLEE_RANGE_RADII: f32 = 4.0;

/// Prey is only preferred over food when meaningfully closer: its distance
/// must beat the nearest food distance scaled by this factor.
const PREY_OVER_FOOD_BIAS: f32 = 0.8;

/// Wander steering circle, projected ahead of the current heading.
const WANDER_CIRCLE_DISTANCE: f32 = 40.0;
const WANDER_CIRCLE_RADIUS: f32 = 18.0;
/// Bounded per-sub-step jitter applied to the wander angle, in radians.
const WANDER_JITTER: f32 = 0.35;

/// Mass range for newly spawned drifters.
pub const SPAWN_MASS_RANGE: Range<f32> = 150.0..600.0;

/// Names drawn at spawn.
const NAMES: &[&str] = &[
    "Kelp", "Brine", "Drift", "Moray", "Sargasso", "Nori", "Plankton", "Squall", "Abyss", "Coral",
    "Riptide", "Fathom", "Murk", "Gull", "Barnacle", "Tempest",
];

/// Difficulty tier selecting a fixed steering parameter bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Short sight, weak steering, often ignores the player.
    Easy,
    /// Balanced perception and steering.
    Normal,
    /// Long sight, strong steering, rarely ignores the player.
    Hard,
}

/// Fixed per-tier steering parameters.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyProfile {
    /// Perception radius as a multiple of the drifter's body radius.
    pub view_radius_multiplier: f32,
    /// Hard cap on steering force magnitude.
    pub max_force: f32,
    /// Probability of not perceiving the player at all this sub-step.
    pub ignore_player_chance: f64,
    /// Weight applied to the flee force.
    pub flee_weight: f32,
    /// Weight applied to the food-seeking force.
    pub food_weight: f32,
    /// Weight applied to the prey-chasing force.
    pub prey_weight: f32,
    /// Weight applied to the wander force.
    pub wander_weight: f32,
}

impl Difficulty {
    /// Parameter bundle for this tier.
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => DifficultyProfile {
                view_radius_multiplier: 6.0,
                max_force: 0.25,
                ignore_player_chance: 0.5,
                flee_weight: 1.2,
                food_weight: 1.0,
                prey_weight: 0.8,
                wander_weight: 0.6,
            },
            Self::Normal => DifficultyProfile {
                view_radius_multiplier: 9.0,
                max_force: 0.4,
                ignore_player_chance: 0.25,
                flee_weight: 1.5,
                food_weight: 1.0,
                prey_weight: 1.1,
                wander_weight: 0.6,
            },
            Self::Hard => DifficultyProfile {
                view_radius_multiplier: 13.0,
                max_force: 0.6,
                ignore_player_chance: 0.05,
                flee_weight: 1.8,
                food_weight: 1.0,
                prey_weight: 1.4,
                wander_weight: 0.6,
            },
        }
    }
}

/// Nearest perceived target position and center distance per category.
#[derive(Debug, Default)]
struct Perception {
    food: Option<(Vec2, f32)>,
    threat: Option<(Vec2, f32)>,
    prey: Option<(Vec2, f32)>,
}

/// An autonomous drifter.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Display name.
    pub name: String,
    /// Position and mass-derived size.
    pub body: Body,
    /// Velocity in world units per sub-step at unit scale.
    pub vel: Vec2,
    /// Steering acceleration; reset to zero every sub-step.
    pub acc: Vec2,
    /// Tier selecting the steering parameter bundle.
    pub difficulty: Difficulty,
    /// Wander heading state, advanced by bounded random jitter.
    pub wander_angle: f32,
    /// RGB render color picked at spawn.
    pub color: [f32; 3],
    /// Set when this drifter has been eaten or left the world.
    pub removed: bool,
}

impl Agent {
    /// Creates a drifter with random position, mass, name, and color.
    pub fn spawn_random(
        rng: &mut impl Rng,
        difficulty: Difficulty,
        width: f32,
        height: f32,
    ) -> Self {
        let mass = rng.random_range(SPAWN_MASS_RANGE);
        let pos = Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height));
        Self {
            name: NAMES[rng.random_range(0..NAMES.len())].to_string(),
            body: Body::new(pos, mass),
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            difficulty,
            wander_angle: rng.random_range(0.0..TAU),
            color: [
                rng.random_range(0.3..1.0),
                rng.random_range(0.3..1.0),
                rng.random_range(0.3..1.0),
            ],
            removed: false,
        }
    }

    /// Steering force toward `target`, clamped to `max_force`.
    ///
    /// Desired velocity is the unit vector toward the target scaled by the
    /// size-dependent max speed; the force is desired minus current velocity.
    pub fn seek(&self, target: Vec2, max_force: f32) -> Vec2 {
        let desired = (target - self.body.pos).normalized() * self.body.max_speed();
        (desired - self.vel).clamped(max_force)
    }

    /// Steering force directly away from `target`; the negated seek.
    pub fn flee(&self, target: Vec2, max_force: f32) -> Vec2 {
        -self.seek(target, max_force)
    }

    /// Smooth idle steering.
    ///
    /// Advances the wander angle by a bounded random delta and seeks a point
    /// on a small circle projected ahead of the current heading.
    pub fn wander(&mut self, rng: &mut impl Rng, max_force: f32) -> Vec2 {
        self.wander_angle += rng.random_range(-WANDER_JITTER..WANDER_JITTER);
        let heading = if self.vel.length_squared() > 0.0 {
            self.vel.normalized()
        } else {
            Vec2::from_angle(self.wander_angle)
        };
        let circle_center = self.body.pos + heading * WANDER_CIRCLE_DISTANCE;
        let target = circle_center + Vec2::from_angle(self.wander_angle) * WANDER_CIRCLE_RADIUS;
        self.seek(target, max_force)
    }

    /// Perceives the nearest food, threat, and prey within view range.
    ///
    /// "Larger" and "smaller" use the same 1.1 radius ratio as the eating
    /// rule. The player's representative cell is skipped entirely with the
    /// tier's ignore chance.
    fn perceive(
        &self,
        self_index: usize,
        index: &SpatialIndex,
        foods: &[Food],
        profile: &DifficultyProfile,
        rng: &mut impl Rng,
    ) -> Perception {
        let view_range = self.body.radius() * profile.view_radius_multiplier;
        let skip_player = rng.random_bool(profile.ignore_player_chance);
        let mut perception = Perception::default();

        for (dist_sq, fi) in index.query_food(self.body.pos, view_range) {
            if foods[fi].is_consumed() {
                continue;
            }
            let dist = dist_sq.sqrt();
            if perception.food.is_none_or(|(_, best)| dist < best) {
                perception.food = Some((foods[fi].pos, dist));
            }
        }

        for (dist_sq, ci) in index.query_cells(self.body.pos, view_range) {
            let view = index.views()[ci];
            if !view.is_player && view.index == self_index {
                continue;
            }
            if view.is_player && skip_player {
                continue;
            }
            let dist = dist_sq.sqrt();
            if view.radius > self.body.radius() * EAT_RADIUS_RATIO {
                if perception.threat.is_none_or(|(_, best)| dist < best) {
                    perception.threat = Some((view.pos, dist));
                }
            } else if self.body.radius() > view.radius * EAT_RADIUS_RATIO
                && perception.prey.is_none_or(|(_, best)| dist < best)
            {
                perception.prey = Some((view.pos, dist));
            }
        }

        perception
    }

    /// Advances this drifter one sub-step: perceive, steer, integrate.
    pub fn update(
        &mut self,
        self_index: usize,
        index: &SpatialIndex,
        foods: &[Food],
        config: &Config,
        rng: &mut impl Rng,
        scale: f32,
    ) {
        let profile = self.difficulty.profile();
        let seen = self.perceive(self_index, index, foods, &profile, rng);

        // One force per sub-step, picked by priority: flee a close threat,
        // chase meaningfully-closer prey, seek food, chase remaining prey,
        // wander.
        let mut force = None;
        if let Some((threat_pos, threat_dist)) = seen.threat {
            if threat_dist < FLEE_RANGE_RADII * self.body.radius() {
                force = Some(self.flee(threat_pos, profile.max_force) * profile.flee_weight);
            }
        }
        if force.is_none() {
            force = match (seen.prey, seen.food) {
                (Some((prey_pos, prey_dist)), Some((_, food_dist)))
                    if prey_dist < food_dist * PREY_OVER_FOOD_BIAS =>
                {
                    Some(self.seek(prey_pos, profile.max_force) * profile.prey_weight)
                }
                (_, Some((food_pos, _))) => {
                    Some(self.seek(food_pos, profile.max_force) * profile.food_weight)
                }
                (Some((prey_pos, _)), None) => {
                    Some(self.seek(prey_pos, profile.max_force) * profile.prey_weight)
                }
                (None, None) => None,
            };
        }
        let force =
            force.unwrap_or_else(|| self.wander(rng, profile.max_force) * profile.wander_weight);

        self.acc = force;
        self.vel = (self.vel + self.acc * scale).clamped(self.body.max_speed());
        self.body.pos += self.vel * scale;
        self.acc = Vec2::ZERO;

        self.apply_boundary(config);
    }

    fn apply_boundary(&mut self, config: &Config) {
        let r = self.body.radius();
        match config.boundary_mode {
            BoundaryMode::Clamp => {
                self.body.pos.x = self.body.pos.x.max(r).min(config.world_width - r);
                self.body.pos.y = self.body.pos.y.max(r).min(config.world_height - r);
            }
            BoundaryMode::Leave => {
                let margin = 2.0 * r;
                let p = self.body.pos;
                if p.x < -margin
                    || p.y < -margin
                    || p.x > config.world_width + margin
                    || p.y > config.world_height + margin
                {
                    self.removed = true;
                    debug!(name = %self.name, "drifter left the world");
                }
            }
        }
    }
}
