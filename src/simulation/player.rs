//! Player cells and pointer-driven control.
//!
//! The player is 1..=`max_player_cells` cells that all steer toward the same
//! pointer target. Splits give cells a decaying launch impulse and a merge
//! delay; boost trades mass for speed.

use rand::Rng;

use super::entity::Body;
use super::params::{Config, SUBSTEP_HZ};
use super::vec2::Vec2;

/// Geometric decay applied to the split impulse per unit of sub-step scale.
const IMPULSE_DECAY: f32 = 0.92;

/// Launch impulse share given to the child cell on a split.
pub const SPLIT_IMPULSE_CHILD: f32 = 14.0;
/// Launch impulse share given to the parent cell on a split.
pub const SPLIT_IMPULSE_PARENT: f32 = 4.0;

/// Externally-owned control state, sampled once per sub-step.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// World-space point the cells steer toward.
    pub target: Vec2,
    /// True while the boost control is held.
    pub boost: bool,
}

/// One of the player's cells.
#[derive(Debug, Clone)]
pub struct PlayerCell {
    /// Display name, shared by all of the player's cells.
    pub name: String,
    /// Position and mass-derived size.
    pub body: Body,
    /// Velocity in world units per sub-step at unit scale.
    pub vel: Vec2,
    /// Decaying launch kick from a recent split.
    pub impulse: Vec2,
    /// Simulation time after which this cell may re-merge with a sibling.
    pub merge_ready_at: f32,
    /// RGB render color, shared by all of the player's cells.
    pub color: [f32; 3],
    /// Set when this cell has been eaten or absorbed by a sibling.
    pub removed: bool,
}

impl PlayerCell {
    /// Creates a cell at `pos` with the given mass.
    pub fn new(name: String, pos: Vec2, mass: f32, color: [f32; 3]) -> Self {
        Self {
            name,
            body: Body::new(pos, mass),
            vel: Vec2::ZERO,
            impulse: Vec2::ZERO,
            merge_ready_at: 0.0,
            color,
            removed: false,
        }
    }

    /// Picks a random pastel render color for a new run.
    pub fn random_color(rng: &mut impl Rng) -> [f32; 3] {
        [
            rng.random_range(0.4..1.0),
            rng.random_range(0.4..1.0),
            rng.random_range(0.4..1.0),
        ]
    }

    /// Advances this cell one sub-step toward the pointer target.
    ///
    /// The desired velocity follows the size-dependent speed curve, the
    /// decaying split impulse rides on top, and the whole circle is kept
    /// inside world bounds regardless of the AI boundary mode.
    pub fn steer(&mut self, input: PlayerInput, config: &Config, scale: f32) {
        let boosting = input.boost && self.body.mass() > config.min_boost_mass;

        let mut speed = self.body.max_speed();
        if boosting {
            speed *= config.boost_multiplier;
        }
        let desired = (input.target - self.body.pos).normalized() * speed;

        self.vel = desired + self.impulse;
        self.impulse = self.impulse * IMPULSE_DECAY.powf(scale);
        self.body.pos += self.vel * scale;

        let r = self.body.radius();
        self.body.pos.x = self.body.pos.x.max(r).min(config.world_width - r);
        self.body.pos.y = self.body.pos.y.max(r).min(config.world_height - r);

        if boosting {
            let dt = scale / SUBSTEP_HZ;
            let drained =
                self.body.mass() * (1.0 - config.boost_drain_fraction_per_second * dt);
            self.body.set_mass(drained.max(config.min_boost_mass));
        }
    }
}
