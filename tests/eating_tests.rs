#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::f32::consts::PI;

use gyre::simulation::agent::{Agent, Difficulty};
use gyre::simulation::collision::{self, BounceBody, EatOutcome};
use gyre::simulation::entity::Body;
use gyre::simulation::food::{Food, FoodKind};
use gyre::simulation::params::{BotDifficulty, BoundaryMode, CollisionMode, Config};
use gyre::simulation::vec2::Vec2;
use gyre::simulation::world::{GameOverReason, World};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn create_test_config() -> Config {
    Config {
        world_width: 1000.0,
        world_height: 1000.0,
        collision_mode: CollisionMode::Bounce,
        boundary_mode: BoundaryMode::Clamp,
        bot_difficulty: BotDifficulty::Normal,
        ai_mix: None,
        initial_ai_count: 0,
        min_ai: 0,
        respawn_batch: 0,
        initial_food_count: 0,
        min_food: 0,
        game_speed: 1.0,
        player_name: "tester".to_string(),
        initial_player_mass: 1000.0,
        max_player_cells: 4,
        min_split_mass: 900.0,
        split_cooldown_seconds: 8.0,
        merge_delay_seconds: 12.0,
        boost_multiplier: 1.8,
        boost_drain_fraction_per_second: 0.25,
        min_boost_mass: 150.0,
        round_seconds: 300.0,
        seed: Some(7),
    }
}

/// Body with an exact radius, via `mass = radius^2 * pi`.
fn body_with_radius(pos: Vec2, radius: f32) -> Body {
    Body::new(pos, radius * radius * PI)
}

fn test_agent(rng: &mut StdRng, pos: Vec2, mass: f32) -> Agent {
    let mut agent = Agent::spawn_random(rng, Difficulty::Normal, 1000.0, 1000.0);
    agent.body = Body::new(pos, mass);
    agent.vel = Vec2::ZERO;
    agent
}

#[test]
fn test_can_eat_requires_ten_percent_radius_margin() {
    let origin = Vec2::ZERO;
    let attacker = body_with_radius(origin, 20.0);

    // Ratio 1.081 is under the 1.1 floor: never edible, even at zero
    // distance.
    let close_call = body_with_radius(origin, 18.5);
    assert!(!attacker.can_eat(&close_call));
    assert!(!close_call.can_eat(&attacker));

    // Ratio 1.33: edible only within the engulfment distance
    // 20 - 15 * 0.3 = 15.5.
    let engulfed = body_with_radius(Vec2::new(15.4, 0.0), 15.0);
    assert!(attacker.can_eat(&engulfed));

    let too_far = body_with_radius(Vec2::new(15.6, 0.0), 15.0);
    assert!(!attacker.can_eat(&too_far));
}

#[test]
fn test_can_eat_is_asymmetric() {
    let pairs = [(20.0, 15.0), (20.0, 18.5), (30.0, 5.0), (10.0, 10.0)];
    for (ra, rb) in pairs {
        for dist in [0.0, 5.0, 12.0, 25.0] {
            let a = body_with_radius(Vec2::ZERO, ra);
            let b = body_with_radius(Vec2::new(dist, 0.0), rb);
            assert!(
                !(a.can_eat(&b) && b.can_eat(&a)),
                "mutual can_eat for radii {ra}/{rb} at distance {dist}"
            );
        }
    }
}

#[test]
fn test_player_eats_adjacent_bottle() {
    let config = create_test_config();
    let mut world = World::new(config);
    world.start();

    let pos = world.players[0].body.pos;
    world.set_pointer_target(pos.x, pos.y);
    world.food.push(Food::new(pos, FoodKind::Bottle, 4.0));

    world.update();

    assert!(world.food.is_empty());
    assert!((world.players[0].body.mass() - 1050.0).abs() < 1e-2);
    assert_eq!(world.score, 10.0);
}

#[test]
fn test_eating_a_drifter_conserves_mass() {
    let config = create_test_config();
    let mut world = World::new(config);
    world.start();

    let pos = world.players[0].body.pos;
    world.players[0].body = body_with_radius(pos, 20.0);
    world.set_pointer_target(pos.x, pos.y);

    let mut rng = StdRng::seed_from_u64(3);
    let agent_mass = 300.0;
    world.agents.push(test_agent(&mut rng, pos, agent_mass));

    let player_mass = world.players[0].body.mass();
    world.update();

    assert!(world.agents.is_empty());
    assert!((world.players[0].body.mass() - (player_mass + agent_mass)).abs() < 1e-2);
    assert!(world.running);
}

#[test]
fn test_last_cell_eaten_ends_run() {
    let mut config = create_test_config();
    config.initial_player_mass = 300.0;
    let mut world = World::new(config);
    world.start();

    let pos = world.players[0].body.pos;
    world.set_pointer_target(pos.x, pos.y);

    let mut rng = StdRng::seed_from_u64(3);
    let predator_mass = 400.0 * PI; // radius 20 vs the player's ~9.8
    world.agents.push(test_agent(&mut rng, pos, predator_mass));

    world.update();

    assert!(world.players.is_empty());
    assert!(!world.running);
    assert_eq!(world.game_over_reason, Some(GameOverReason::Eaten));
}

#[test]
fn test_eat_outcome_is_exclusive() {
    let a = body_with_radius(Vec2::ZERO, 20.0);
    let b = body_with_radius(Vec2::new(10.0, 0.0), 15.0);
    assert_eq!(collision::eat_outcome(&a, &b), EatOutcome::First);
    assert_eq!(collision::eat_outcome(&b, &a), EatOutcome::Second);

    let peer = body_with_radius(Vec2::new(10.0, 0.0), 19.0);
    assert_eq!(collision::eat_outcome(&a, &peer), EatOutcome::Neither);
}

#[test]
fn test_bounce_is_gated_by_size_ratio() {
    // A cell stalking prey it cannot yet engulf glides over it instead of
    // bumping.
    let big = body_with_radius(Vec2::ZERO, 20.0);
    let small = body_with_radius(Vec2::new(18.0, 0.0), 15.0);
    assert!(!collision::should_bounce(&big, &small));

    let peer = body_with_radius(Vec2::new(18.0, 0.0), 18.5);
    assert!(collision::should_bounce(&big, &peer));
}

#[test]
fn test_bounce_separates_and_reflects() {
    let a = BounceBody {
        pos: Vec2::ZERO,
        vel: Vec2::new(2.0, 0.0),
        mass: 1.0,
        radius: 10.0,
    };
    let b = BounceBody {
        pos: Vec2::new(10.0, 0.0),
        vel: Vec2::new(-2.0, 0.0),
        mass: 1.0,
        radius: 10.0,
    };

    let (na, nb) = collision::resolve_bounce(a, b, 0.6).expect("overlapping pair");

    // Positional correction removes the overlap, split by mass.
    assert!((na.pos.x - -5.0).abs() < 1e-3);
    assert!((nb.pos.x - 15.0).abs() < 1e-3);
    // Equal masses approaching head-on leave with mirrored velocities.
    assert!((na.vel.x - -1.2).abs() < 1e-3);
    assert!((nb.vel.x - 1.2).abs() < 1e-3);

    // Non-overlapping pairs are untouched.
    let apart = BounceBody {
        pos: Vec2::new(100.0, 0.0),
        ..b
    };
    assert!(collision::resolve_bounce(a, apart, 0.6).is_none());
}
