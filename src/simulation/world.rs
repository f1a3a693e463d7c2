//! The world, the stepping loop, and the public engine surface.
//!
//! One `update()` call per external tick, internally unrolled into 1-4
//! fixed-size sub-steps depending on the game speed multiplier. Each
//! sub-step runs player control, AI steering, collision/eating, and
//! split/merge; population maintenance runs once per tick.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use super::agent::Agent;
use super::collision::{
    self, BOUNCE_RESTITUTION, BounceBody, EatOutcome, FOOD_MASS_FACTOR,
    SELF_SEPARATION_RESTITUTION,
};
use super::food::{self, Food};
use super::params::{CollisionMode, Config, SUBSTEP_HZ};
use super::player::{PlayerCell, PlayerInput, SPLIT_IMPULSE_CHILD, SPLIT_IMPULSE_PARENT};
use super::population::{self, DifficultyDistribution};
use super::spatial::SpatialIndex;
use super::vec2::Vec2;

/// Why a run ended.
///
/// The first reason latched wins; later termination triggers only stop the
/// clock and never overwrite it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOverReason {
    /// The player's last cell was eaten.
    Eaten,
    /// The round countdown reached zero.
    Timeout,
    /// An external `stop` call ended the run.
    Stopped,
}

/// Read-only snapshot exposed to the surrounding application.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Accumulated score from eaten debris.
    pub score: f32,
    /// Remaining round time in simulated seconds.
    pub time_left: f32,
    /// Latched termination reason, if the run has ended.
    pub game_over_reason: Option<GameOverReason>,
    /// Combined mass of all live player cells.
    pub player_mass: f32,
    /// Live player cell count.
    pub player_cells: usize,
}

/// The simulated world.
///
/// Collections and clocks are public so the render layer can read positions,
/// radii, and colors directly; [`World::game_state`] is the sanctioned
/// snapshot for everything else.
pub struct World {
    /// Parameters fixed at construction.
    pub config: Config,
    /// The player's cells; between 1 and `max_player_cells` while alive.
    pub players: Vec<PlayerCell>,
    /// Live AI drifters.
    pub agents: Vec<Agent>,
    /// Live debris.
    pub food: Vec<Food>,
    /// Monotonic simulation time in seconds.
    pub elapsed: f32,
    /// Round countdown in simulated seconds.
    pub time_left: f32,
    /// True between `start` and any termination.
    pub running: bool,
    /// Accumulated score from eaten debris.
    pub score: f32,
    /// Latched termination reason; the first writer wins.
    pub game_over_reason: Option<GameOverReason>,
    /// Pointer/boost state the frontend overwrites between ticks.
    pub input: PlayerInput,
    split_cooldown: f32,
    distribution: DifficultyDistribution,
    rng: StdRng,
}

impl World {
    /// Creates a world in the idle state.
    ///
    /// The difficulty distribution and the RNG are resolved here, once; the
    /// same seed reproduces an identical run.
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let distribution =
            DifficultyDistribution::resolve(config.bot_difficulty, config.ai_mix.as_ref());
        Self {
            players: Vec::new(),
            agents: Vec::new(),
            food: Vec::new(),
            elapsed: 0.0,
            time_left: config.round_seconds,
            running: false,
            score: 0.0,
            game_over_reason: None,
            input: PlayerInput::default(),
            split_cooldown: 0.0,
            distribution,
            rng,
            config,
        }
    }

    /// (Re)initializes the run and transitions to running.
    pub fn start(&mut self) {
        let center = Vec2::new(self.config.world_width / 2.0, self.config.world_height / 2.0);
        let color = PlayerCell::random_color(&mut self.rng);
        self.players = vec![PlayerCell::new(
            self.config.player_name.clone(),
            center,
            self.config.initial_player_mass,
            color,
        )];

        self.agents.clear();
        for _ in 0..self.config.initial_ai_count {
            let tier = self.distribution.sample(&mut self.rng);
            self.agents.push(Agent::spawn_random(
                &mut self.rng,
                tier,
                self.config.world_width,
                self.config.world_height,
            ));
        }

        self.food.clear();
        for _ in 0..self.config.initial_food_count {
            self.food.push(Food::spawn_random(
                &mut self.rng,
                self.config.world_width,
                self.config.world_height,
            ));
        }

        self.elapsed = 0.0;
        self.time_left = self.config.round_seconds;
        self.score = 0.0;
        self.game_over_reason = None;
        self.split_cooldown = 0.0;
        self.input = PlayerInput {
            target: center,
            boost: false,
        };
        self.running = true;
        info!(
            agents = self.agents.len(),
            food = self.food.len(),
            "run started"
        );
    }

    /// Forces the run to end with the given reason.
    ///
    /// A reason latched earlier in the same run is kept.
    pub fn stop(&mut self, reason: GameOverReason) {
        self.end(reason);
    }

    fn end(&mut self, reason: GameOverReason) {
        if self.game_over_reason.is_none() {
            self.game_over_reason = Some(reason);
            info!(?reason, score = self.score, "run ended");
        }
        self.running = false;
    }

    /// Sets the world-space pointer target the player cells steer toward.
    pub fn set_pointer_target(&mut self, x: f32, y: f32) {
        self.input.target = Vec2::new(x, y);
    }

    /// Sets whether the boost control is held.
    pub fn set_boost(&mut self, held: bool) {
        self.input.boost = held;
    }

    /// Remaining split cooldown in simulated seconds.
    pub fn split_cooldown(&self) -> f32 {
        self.split_cooldown
    }

    /// Attempts to split the player's largest cell toward a world-space
    /// point.
    ///
    /// Returns `false` with no side effects while the cooldown is positive,
    /// the cell cap is reached, or the largest cell is below the minimum
    /// split mass. Total player mass is conserved across a split.
    pub fn try_split(&mut self, target_x: f32, target_y: f32) -> bool {
        if !self.running || self.split_cooldown > 0.0 {
            return false;
        }
        if self.players.len() >= self.config.max_player_cells {
            return false;
        }
        let Some(largest) = self
            .players
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.body.mass().total_cmp(&b.1.body.mass()))
            .map(|(i, _)| i)
        else {
            return false;
        };
        let parent_mass = self.players[largest].body.mass();
        if parent_mass < self.config.min_split_mass {
            return false;
        }

        let half = parent_mass / 2.0;
        let target = Vec2::new(target_x, target_y);
        let merge_at = self.elapsed + self.config.merge_delay_seconds;

        let parent = &mut self.players[largest];
        let dir = (target - parent.body.pos).normalized();
        parent.body.set_mass(half);
        parent.impulse += dir * SPLIT_IMPULSE_PARENT;
        parent.merge_ready_at = merge_at;

        let spawn_pos = parent.body.pos + dir * (parent.body.radius() * 2.0);
        let mut child = PlayerCell::new(parent.name.clone(), spawn_pos, half, parent.color);
        child.impulse = dir * SPLIT_IMPULSE_CHILD;
        child.merge_ready_at = merge_at;
        self.players.push(child);

        self.split_cooldown = self.config.split_cooldown_seconds;
        debug!(mass = half, "player split");
        true
    }

    /// Advances the simulation by one external tick.
    ///
    /// The clamped game speed determines `ceil(speed)` sub-steps of
    /// `speed / substeps` scale each, keeping per-sub-step displacement
    /// bounded at high multipliers. No sub-steps run once the world has
    /// ended.
    pub fn update(&mut self) {
        if !self.running {
            return;
        }
        let speed = self.config.clamped_game_speed();
        let substeps = speed.ceil() as usize;
        let scale = speed / substeps as f32;
        for _ in 0..substeps {
            if !self.running {
                break;
            }
            self.sub_step(scale);
        }
        if self.running {
            population::maintain_food(&mut self.food, &self.config, &mut self.rng);
            population::maintain_agents(
                &mut self.agents,
                &self.distribution,
                &self.config,
                &mut self.rng,
            );
        }
    }

    /// Read-only snapshot for the HUD and leaderboard layers.
    pub fn game_state(&self) -> GameState {
        GameState {
            score: self.score,
            time_left: self.time_left,
            game_over_reason: self.game_over_reason,
            player_mass: self.players.iter().map(|c| c.body.mass()).sum(),
            player_cells: self.players.len(),
        }
    }

    fn sub_step(&mut self, scale: f32) {
        let dt = scale / SUBSTEP_HZ;
        self.elapsed += dt;
        self.time_left -= dt;
        self.split_cooldown = (self.split_cooldown - dt).max(0.0);

        // Player control: inputs are sampled once per sub-step.
        let input = self.input;
        for cell in &mut self.players {
            cell.steer(input, &self.config, scale);
        }

        // AI steering reads positions through the index built after the
        // player moved, so drifters perceive the player's current position.
        let index = SpatialIndex::build(&self.players, &self.agents, &self.food);
        for i in 0..self.agents.len() {
            let (config, rng, foods) = (&self.config, &mut self.rng, &self.food);
            self.agents[i].update(i, &index, foods, config, rng, scale);
        }

        self.resolve_food_pass(&index);
        self.resolve_cell_pass();
        self.resolve_merge_pass();

        self.food.retain(|f| !f.is_consumed());
        self.agents.retain(|a| !a.removed);
        let player_was_alive = !self.players.is_empty();
        self.players.retain(|c| !c.removed);
        if player_was_alive && self.players.is_empty() {
            self.end(GameOverReason::Eaten);
        }

        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            self.end(GameOverReason::Timeout);
        }
    }

    /// Debris is consumed by whichever cell touches it first in iteration
    /// order: player cells, then drifters.
    fn resolve_food_pass(&mut self, index: &SpatialIndex) {
        for cell in &mut self.players {
            let reach = cell.body.radius() + food::MAX_RADIUS;
            for (_, fi) in index.query_food(cell.body.pos, reach) {
                let item = &mut self.food[fi];
                if item.is_consumed() {
                    continue;
                }
                if cell.body.pos.distance_to(item.pos) < cell.body.radius() + item.radius {
                    item.consume();
                    cell.body
                        .set_mass(cell.body.mass() + item.value() * FOOD_MASS_FACTOR);
                    self.score += item.value();
                    debug!(kind = ?item.kind, "player ate debris");
                }
            }
        }
        for agent in &mut self.agents {
            let reach = agent.body.radius() + food::MAX_RADIUS;
            for (_, fi) in index.query_food(agent.body.pos, reach) {
                let item = &mut self.food[fi];
                if item.is_consumed() {
                    continue;
                }
                if agent.body.pos.distance_to(item.pos) < agent.body.radius() + item.radius {
                    item.consume();
                    agent
                        .body
                        .set_mass(agent.body.mass() + item.value() * FOOD_MASS_FACTOR);
                }
            }
        }
    }

    /// Cell-on-cell eating, plus bounce for similar-size pairs.
    fn resolve_cell_pass(&mut self) {
        let bounce_enabled = self.config.collision_mode == CollisionMode::Bounce;

        // Player cells vs drifters.
        for pi in 0..self.players.len() {
            for ai in 0..self.agents.len() {
                if self.players[pi].removed || self.agents[ai].removed {
                    continue;
                }
                let p_body = self.players[pi].body;
                let a_body = self.agents[ai].body;
                match collision::eat_outcome(&p_body, &a_body) {
                    EatOutcome::First => {
                        self.agents[ai].removed = true;
                        self.players[pi]
                            .body
                            .set_mass(p_body.mass() + a_body.mass());
                        debug!(name = %self.agents[ai].name, "player ate a drifter");
                    }
                    EatOutcome::Second => {
                        self.players[pi].removed = true;
                        self.agents[ai]
                            .body
                            .set_mass(a_body.mass() + p_body.mass());
                        debug!(name = %self.agents[ai].name, "a drifter ate a player cell");
                    }
                    EatOutcome::Neither => {
                        if bounce_enabled && collision::should_bounce(&p_body, &a_body) {
                            let resolved = collision::resolve_bounce(
                                BounceBody {
                                    pos: p_body.pos,
                                    vel: self.players[pi].vel,
                                    mass: p_body.mass(),
                                    radius: p_body.radius(),
                                },
                                BounceBody {
                                    pos: a_body.pos,
                                    vel: self.agents[ai].vel,
                                    mass: a_body.mass(),
                                    radius: a_body.radius(),
                                },
                                BOUNCE_RESTITUTION,
                            );
                            if let Some((na, nb)) = resolved {
                                self.players[pi].body.pos = na.pos;
                                self.players[pi].vel = na.vel;
                                self.agents[ai].body.pos = nb.pos;
                                self.agents[ai].vel = nb.vel;
                            }
                        }
                    }
                }
            }
        }

        // Drifters vs drifters.
        for i in 0..self.agents.len() {
            for j in (i + 1)..self.agents.len() {
                if self.agents[i].removed || self.agents[j].removed {
                    continue;
                }
                let body_i = self.agents[i].body;
                let body_j = self.agents[j].body;
                match collision::eat_outcome(&body_i, &body_j) {
                    EatOutcome::First => {
                        self.agents[j].removed = true;
                        self.agents[i]
                            .body
                            .set_mass(body_i.mass() + body_j.mass());
                    }
                    EatOutcome::Second => {
                        self.agents[i].removed = true;
                        self.agents[j]
                            .body
                            .set_mass(body_j.mass() + body_i.mass());
                    }
                    EatOutcome::Neither => {
                        if bounce_enabled && collision::should_bounce(&body_i, &body_j) {
                            let resolved = collision::resolve_bounce(
                                BounceBody {
                                    pos: body_i.pos,
                                    vel: self.agents[i].vel,
                                    mass: body_i.mass(),
                                    radius: body_i.radius(),
                                },
                                BounceBody {
                                    pos: body_j.pos,
                                    vel: self.agents[j].vel,
                                    mass: body_j.mass(),
                                    radius: body_j.radius(),
                                },
                                BOUNCE_RESTITUTION,
                            );
                            if let Some((na, nb)) = resolved {
                                self.agents[i].body.pos = na.pos;
                                self.agents[i].vel = na.vel;
                                self.agents[j].body.pos = nb.pos;
                                self.agents[j].vel = nb.vel;
                            }
                        }
                    }
                }
            }
        }
    }

    /// Sibling player cells merge once both merge windows have passed and
    /// they overlap; earlier overlaps get a soft separation instead.
    fn resolve_merge_pass(&mut self) {
        for i in 0..self.players.len() {
            for j in (i + 1)..self.players.len() {
                if self.players[i].removed || self.players[j].removed {
                    continue;
                }
                let body_i = self.players[i].body;
                let body_j = self.players[j].body;
                if !body_i.collides_with(&body_j) {
                    continue;
                }
                let both_ready = self.elapsed >= self.players[i].merge_ready_at
                    && self.elapsed >= self.players[j].merge_ready_at;
                if both_ready {
                    let (keep, gone) = if body_i.mass() >= body_j.mass() {
                        (i, j)
                    } else {
                        (j, i)
                    };
                    self.players[keep]
                        .body
                        .set_mass(body_i.mass() + body_j.mass());
                    self.players[gone].removed = true;
                    debug!("player cells merged");
                } else if let Some((na, nb)) = collision::resolve_bounce(
                    BounceBody {
                        pos: body_i.pos,
                        vel: self.players[i].vel,
                        mass: body_i.mass(),
                        radius: body_i.radius(),
                    },
                    BounceBody {
                        pos: body_j.pos,
                        vel: self.players[j].vel,
                        mass: body_j.mass(),
                        radius: body_j.radius(),
                    },
                    SELF_SEPARATION_RESTITUTION,
                ) {
                    self.players[i].body.pos = na.pos;
                    self.players[i].vel = na.vel;
                    self.players[j].body.pos = nb.pos;
                    self.players[j].vel = nb.vel;
                }
            }
        }
    }
}
