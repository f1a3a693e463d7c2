#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::f32::consts::PI;

use gyre::simulation::agent::{Agent, Difficulty};
use gyre::simulation::entity::Body;
use gyre::simulation::food::{Food, FoodKind};
use gyre::simulation::params::{BotDifficulty, BoundaryMode, CollisionMode, Config};
use gyre::simulation::vec2::Vec2;
use gyre::simulation::world::World;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn create_test_config() -> Config {
    Config {
        world_width: 1000.0,
        world_height: 1000.0,
        collision_mode: CollisionMode::None,
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
        initial_player_mass: 1.0,
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

fn test_agent(rng: &mut StdRng, pos: Vec2, radius: f32, difficulty: Difficulty) -> Agent {
    let mut agent = Agent::spawn_random(rng, difficulty, 1000.0, 1000.0);
    agent.body = Body::new(pos, radius * radius * PI);
    agent.vel = Vec2::ZERO;
    agent
}

/// Parks the player's single cell in a corner, out of every perception
/// radius used below.
fn park_player(world: &mut World) {
    world.players[0].body.pos = Vec2::new(5.0, 5.0);
    world.set_pointer_target(5.0, 5.0);
}

#[test]
fn test_normalizing_a_zero_vector_is_safe() {
    assert_eq!(Vec2::ZERO.normalized(), Vec2::UNIT_X);
    assert!((Vec2::new(3.0, 4.0).normalized().length() - 1.0).abs() < 1e-5);
}

#[test]
fn test_seek_points_toward_target_and_is_clamped() {
    let mut rng = StdRng::seed_from_u64(5);
    let agent = test_agent(&mut rng, Vec2::new(100.0, 100.0), 10.0, Difficulty::Normal);

    let force = agent.seek(Vec2::new(200.0, 100.0), 0.5);
    assert!(force.x > 0.0);
    assert!((force.y).abs() < 1e-4);
    assert!(force.length() <= 0.5 + 1e-4);
}

#[test]
fn test_flee_is_the_negated_seek() {
    let mut rng = StdRng::seed_from_u64(5);
    let agent = test_agent(&mut rng, Vec2::new(100.0, 100.0), 10.0, Difficulty::Normal);

    let target = Vec2::new(180.0, 40.0);
    let seek = agent.seek(target, 0.5);
    let flee = agent.flee(target, 0.5);
    assert!((seek.x + flee.x).abs() < 1e-5);
    assert!((seek.y + flee.y).abs() < 1e-5);
}

#[test]
fn test_wander_force_stays_bounded() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut agent = test_agent(&mut rng, Vec2::new(100.0, 100.0), 10.0, Difficulty::Normal);

    for _ in 0..100 {
        let force = agent.wander(&mut rng, 0.4);
        assert!(force.length() <= 0.4 + 1e-4);
    }
}

#[test]
fn test_agent_flees_a_nearby_threat() {
    let config = create_test_config();
    let mut world = World::new(config);
    world.start();

    // A radius-20 player cell threatens a radius-10 drifter placed inside
    // its 4-radius flee ring but outside the engulfment distance.
    world.players[0].body = Body::new(Vec2::new(500.0, 500.0), 400.0 * PI);
    world.set_pointer_target(500.0, 500.0);

    let mut rng = StdRng::seed_from_u64(5);
    world
        .agents
        .push(test_agent(&mut rng, Vec2::new(465.0, 500.0), 10.0, Difficulty::Hard));

    for _ in 0..15 {
        world.update();
    }

    assert_eq!(world.agents.len(), 1);
    let distance = world.agents[0]
        .body
        .pos
        .distance_to(world.players[0].body.pos);
    assert!(distance > 45.0, "drifter did not flee, distance {distance}");
}

#[test]
fn test_agent_seeks_visible_food() {
    let config = create_test_config();
    let mut world = World::new(config);
    world.start();
    park_player(&mut world);

    let mut rng = StdRng::seed_from_u64(5);
    world
        .agents
        .push(test_agent(&mut rng, Vec2::new(500.0, 500.0), 10.0, Difficulty::Normal));
    world
        .food
        .push(Food::new(Vec2::new(560.0, 500.0), FoodKind::Can, 4.0));

    let mass_before = world.agents[0].body.mass();
    for _ in 0..40 {
        world.update();
        if world.food.is_empty() {
            break;
        }
    }

    assert!(world.food.is_empty(), "drifter never reached the debris");
    assert!(world.agents[0].body.mass() > mass_before);
}

#[test]
fn test_prey_preferred_only_when_meaningfully_closer() {
    // Prey at 50 vs food at 80: 50 < 80 * 0.8, so the chase wins.
    let config = create_test_config();
    let mut world = World::new(config);
    world.start();
    park_player(&mut world);

    let mut rng = StdRng::seed_from_u64(5);
    world
        .agents
        .push(test_agent(&mut rng, Vec2::new(500.0, 500.0), 20.0, Difficulty::Hard));
    world
        .agents
        .push(test_agent(&mut rng, Vec2::new(450.0, 500.0), 10.0, Difficulty::Easy));
    world
        .food
        .push(Food::new(Vec2::new(580.0, 500.0), FoodKind::Can, 4.0));

    for _ in 0..3 {
        world.update();
    }
    assert!(
        world.agents[0].vel.x < 0.0,
        "hunter should chase the closer prey"
    );

    // Prey at 50 vs food at 55: not meaningfully closer, food wins.
    let config = create_test_config();
    let mut world = World::new(config);
    world.start();
    park_player(&mut world);

    let mut rng = StdRng::seed_from_u64(5);
    world
        .agents
        .push(test_agent(&mut rng, Vec2::new(500.0, 500.0), 20.0, Difficulty::Hard));
    world
        .agents
        .push(test_agent(&mut rng, Vec2::new(450.0, 500.0), 10.0, Difficulty::Easy));
    world
        .food
        .push(Food::new(Vec2::new(555.0, 500.0), FoodKind::Can, 4.0));

    for _ in 0..3 {
        world.update();
    }
    assert!(
        world.agents[0].vel.x > 0.0,
        "hunter should seek the food instead"
    );
}

#[test]
fn test_clamp_mode_keeps_drifters_inside() {
    let mut config = create_test_config();
    config.boundary_mode = BoundaryMode::Clamp;
    config.initial_ai_count = 10;
    config.initial_food_count = 20;
    let mut world = World::new(config);
    world.start();

    for _ in 0..60 {
        world.update();
        for agent in &world.agents {
            let r = agent.body.radius();
            assert!(agent.body.pos.x >= r - 1e-3);
            assert!(agent.body.pos.x <= 1000.0 - r + 1e-3);
            assert!(agent.body.pos.y >= r - 1e-3);
            assert!(agent.body.pos.y <= 1000.0 - r + 1e-3);
        }
    }
}

#[test]
fn test_leave_mode_despawns_far_out_drifters() {
    let mut config = create_test_config();
    config.boundary_mode = BoundaryMode::Leave;
    let mut world = World::new(config);
    world.start();
    park_player(&mut world);

    // Center out past the left edge by 2 * radius + 1.
    let mut rng = StdRng::seed_from_u64(5);
    world
        .agents
        .push(test_agent(&mut rng, Vec2::new(-21.0, 500.0), 10.0, Difficulty::Normal));

    world.update();

    assert!(world.agents.is_empty());
}
