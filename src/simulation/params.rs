//! Engine configuration.
//!
//! A [`Config`] is accepted once at construction. The engine never reads
//! external state afterwards; the frontend mutates input through the world's
//! setters instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lower bound of the supported game speed multiplier.
pub const MIN_GAME_SPEED: f32 = 0.25;
/// Upper bound of the supported game speed multiplier.
pub const MAX_GAME_SPEED: f32 = 4.0;
/// Simulated seconds advanced by one sub-step at unit scale: `scale / 60`.
pub const SUBSTEP_HZ: f32 = 60.0;

/// How overlapping cells that cannot eat each other are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    /// Overlaps pass through freely.
    None,
    /// Similar-size overlaps get a physical separation impulse.
    Bounce,
}

/// Policy for AI drifters reaching the world edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Centers are clamped inside `[radius, dimension - radius]`.
    Clamp,
    /// Drifters may exit; they despawn once out by more than two radii.
    Leave,
}

/// Difficulty selection mode for spawned AI drifters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    /// Every drifter is easy.
    Easy,
    /// Every drifter is normal.
    Normal,
    /// Every drifter is hard.
    Hard,
    /// Tiers drawn from [`Config::ai_mix`], or fixed fallback weights.
    Mixed,
}

/// Explicit per-tier counts, consulted only when [`BotDifficulty::Mixed`] is
/// configured. The counts act as weights for the spawn draw.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DifficultyMix {
    /// Weight for easy drifters.
    pub easy: u32,
    /// Weight for normal drifters.
    pub normal: u32,
    /// Weight for hard drifters.
    pub hard: u32,
}

/// Simulation parameters accepted at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// World width in world units.
    pub world_width: f32,
    /// World height in world units.
    pub world_height: f32,
    /// Resolution policy for non-eating cell overlaps.
    pub collision_mode: CollisionMode,
    /// Edge policy for AI drifters. The player is always clamped.
    pub boundary_mode: BoundaryMode,
    /// Difficulty selection mode for spawned drifters.
    pub bot_difficulty: BotDifficulty,
    /// Explicit tier mix, used only when `bot_difficulty` is mixed.
    pub ai_mix: Option<DifficultyMix>,
    /// Drifters created at world init.
    pub initial_ai_count: usize,
    /// Floor below which drifters are respawned.
    pub min_ai: usize,
    /// Drifters spawned per maintenance pass when below the floor.
    pub respawn_batch: usize,
    /// Debris created at world init.
    pub initial_food_count: usize,
    /// Floor below which debris is respawned.
    pub min_food: usize,
    /// Speed multiplier for the stepping loop, clamped to `[0.25, 4]`.
    pub game_speed: f32,
    /// Name shown on the player's cells.
    pub player_name: String,
    /// Mass of the player's starting cell.
    pub initial_player_mass: f32,
    /// Hard cap on concurrent player cells.
    pub max_player_cells: usize,
    /// Smallest cell mass that may split.
    pub min_split_mass: f32,
    /// Cooldown between splits, in simulated seconds.
    pub split_cooldown_seconds: f32,
    /// Delay before split cells may re-merge, in simulated seconds.
    pub merge_delay_seconds: f32,
    /// Speed multiplier applied while boosting.
    pub boost_multiplier: f32,
    /// Fraction of cell mass drained per simulated second while boosting.
    pub boost_drain_fraction_per_second: f32,
    /// Mass floor below which boost has no effect and drain stops.
    pub min_boost_mass: f32,
    /// Countdown at the start of a run, in simulated seconds.
    pub round_seconds: f32,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_width: 3000.0,
            world_height: 2000.0,
            collision_mode: CollisionMode::Bounce,
            boundary_mode: BoundaryMode::Clamp,
            bot_difficulty: BotDifficulty::Mixed,
            ai_mix: None,
            initial_ai_count: 12,
            min_ai: 8,
            respawn_batch: 4,
            initial_food_count: 150,
            min_food: 100,
            game_speed: 1.0,
            player_name: "player".to_string(),
            initial_player_mass: 300.0,
            max_player_cells: 4,
            min_split_mass: 900.0,
            split_cooldown_seconds: 8.0,
            merge_delay_seconds: 12.0,
            boost_multiplier: 1.8,
            boost_drain_fraction_per_second: 0.25,
            min_boost_mass: 150.0,
            round_seconds: 300.0,
            seed: None,
        }
    }
}

impl Config {
    /// Game speed clamped to the supported `[0.25, 4]` range.
    pub fn clamped_game_speed(&self) -> f32 {
        self.game_speed.clamp(MIN_GAME_SPEED, MAX_GAME_SPEED)
    }

    /// Rejects configurations the engine cannot run with.
    ///
    /// An empty mixed difficulty mix is not an error; it falls back to fixed
    /// weights at spawn time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(ConfigError::InvalidWorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if self.max_player_cells == 0 {
            return Err(ConfigError::NoPlayerCells);
        }
        if self.initial_player_mass <= 0.0 {
            return Err(ConfigError::InvalidPlayerMass(self.initial_player_mass));
        }
        Ok(())
    }
}

/// Configuration the engine cannot run with.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// World dimensions must both be positive.
    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidWorldSize {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The player needs at least one cell slot.
    #[error("max_player_cells must be at least 1")]
    NoPlayerCells,
    /// Bodies require strictly positive mass.
    #[error("initial player mass must be positive, got {0}")]
    InvalidPlayerMass(f32),
}
