//! Population floors for food and agents.
//!
//! Runs once per external tick: debris and drifter counts are topped back up
//! in batches whenever they fall below their configured floors.

use rand::Rng;
use tracing::debug;

use super::agent::{Agent, Difficulty};
use super::food::Food;
use super::params::{BotDifficulty, Config, DifficultyMix};

/// Debris spawned per maintenance pass when below the floor.
pub const FOOD_RESPAWN_BATCH: usize = 10;

/// Tier weights used when a mixed config has no usable counts.
const FALLBACK_WEIGHTS: [(Difficulty, u32); 3] = [
    (Difficulty::Easy, 40),
    (Difficulty::Normal, 40),
    (Difficulty::Hard, 20),
];

/// Tier weights resolved once at construction from the configured mode and
/// mix, eliminating the mode/mix branching from the spawn path.
#[derive(Debug, Clone)]
pub struct DifficultyDistribution {
    weights: [(Difficulty, u32); 3],
}

impl DifficultyDistribution {
    /// Resolves the configured mode and mix into explicit weights.
    ///
    /// A fixed tier puts all weight on that tier. Mixed mode uses the
    /// configured counts as weights, or falls back to 40/40/20 when the mix
    /// is absent or sums to zero.
    pub fn resolve(mode: BotDifficulty, mix: Option<&DifficultyMix>) -> Self {
        let fixed = |tier| {
            [
                (Difficulty::Easy, u32::from(tier == Difficulty::Easy)),
                (Difficulty::Normal, u32::from(tier == Difficulty::Normal)),
                (Difficulty::Hard, u32::from(tier == Difficulty::Hard)),
            ]
        };
        let weights = match mode {
            BotDifficulty::Easy => fixed(Difficulty::Easy),
            BotDifficulty::Normal => fixed(Difficulty::Normal),
            BotDifficulty::Hard => fixed(Difficulty::Hard),
            BotDifficulty::Mixed => match mix {
                Some(m) if m.easy + m.normal + m.hard > 0 => [
                    (Difficulty::Easy, m.easy),
                    (Difficulty::Normal, m.normal),
                    (Difficulty::Hard, m.hard),
                ],
                _ => FALLBACK_WEIGHTS,
            },
        };
        Self { weights }
    }

    /// Draws a tier by weighted random choice.
    pub fn sample(&self, rng: &mut impl Rng) -> Difficulty {
        // The total is positive for every output of `resolve`.
        let total: u32 = self.weights.iter().map(|(_, w)| w).sum();
        let mut roll = rng.random_range(0..total);
        for (tier, weight) in self.weights {
            if roll < weight {
                return tier;
            }
            roll -= weight;
        }
        self.weights[0].0
    }
}

/// Tops debris back up to the floor with a fixed batch.
pub fn maintain_food(food: &mut Vec<Food>, config: &Config, rng: &mut impl Rng) {
    let live = food.iter().filter(|f| !f.is_consumed()).count();
    if live >= config.min_food {
        return;
    }
    for _ in 0..FOOD_RESPAWN_BATCH {
        food.push(Food::spawn_random(
            rng,
            config.world_width,
            config.world_height,
        ));
    }
    debug!(spawned = FOOD_RESPAWN_BATCH, live, "replenished debris");
}

/// Tops drifters back up to the floor with a configured batch, drawing each
/// tier from the resolved distribution.
pub fn maintain_agents(
    agents: &mut Vec<Agent>,
    distribution: &DifficultyDistribution,
    config: &Config,
    rng: &mut impl Rng,
) {
    if agents.len() >= config.min_ai {
        return;
    }
    for _ in 0..config.respawn_batch {
        let tier = distribution.sample(rng);
        agents.push(Agent::spawn_random(
            rng,
            tier,
            config.world_width,
            config.world_height,
        ));
    }
    debug!(spawned = config.respawn_batch, "respawned drifters");
}
