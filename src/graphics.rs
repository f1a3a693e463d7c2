use gyre::simulation::food::FoodKind;
use gyre::simulation::world::World;
use macroquad::prelude::*;

/// World coordinate of the top-left screen corner: the camera follows the
/// player's largest cell and falls back to the world center.
pub fn camera_offset(world: &World) -> (f32, f32) {
    let focus = world
        .players
        .iter()
        .max_by(|a, b| a.body.mass().total_cmp(&b.body.mass()))
        .map(|cell| cell.body.pos)
        .unwrap_or_else(|| {
            gyre::simulation::vec2::Vec2::new(
                world.config.world_width / 2.0,
                world.config.world_height / 2.0,
            )
        });
    (
        focus.x - screen_width() / 2.0,
        focus.y - screen_height() / 2.0,
    )
}

fn kind_color(kind: FoodKind) -> Color {
    match kind {
        FoodKind::Bottle => Color::from_rgba(80, 160, 255, 255),
        FoodKind::Bag => Color::from_rgba(200, 200, 210, 255),
        FoodKind::Net => Color::from_rgba(255, 150, 60, 255),
        FoodKind::Can => Color::from_rgba(180, 120, 220, 255),
        FoodKind::Microplastic => Color::from_rgba(120, 220, 160, 255),
    }
}

fn rgb(color: [f32; 3]) -> Color {
    Color::new(color[0], color[1], color[2], 1.0)
}

pub fn draw_world(world: &World) {
    let (ox, oy) = camera_offset(world);

    // world border
    draw_rectangle_lines(
        -ox,
        -oy,
        world.config.world_width,
        world.config.world_height,
        4.0,
        DARKGRAY,
    );

    for item in &world.food {
        if !item.is_consumed() {
            draw_circle(item.pos.x - ox, item.pos.y - oy, item.radius, kind_color(item.kind));
        }
    }

    for agent in &world.agents {
        let x = agent.body.pos.x - ox;
        let y = agent.body.pos.y - oy;
        draw_circle(x, y, agent.body.radius(), rgb(agent.color));
        draw_name(&agent.name, x, y - agent.body.radius() - 6.0);
    }

    for cell in &world.players {
        let x = cell.body.pos.x - ox;
        let y = cell.body.pos.y - oy;
        draw_circle(x, y, cell.body.radius(), rgb(cell.color));
        draw_circle_lines(x, y, cell.body.radius(), 2.0, BLACK);
    }
    if let Some(largest) = world
        .players
        .iter()
        .max_by(|a, b| a.body.mass().total_cmp(&b.body.mass()))
    {
        draw_name(
            &largest.name,
            largest.body.pos.x - ox,
            largest.body.pos.y - oy - largest.body.radius() - 6.0,
        );
    }
}

pub fn draw_hud(world: &World) {
    let state = world.game_state();
    let line = format!(
        "score {:.0}   time {:.0}s   mass {:.0}   cells {}",
        state.score, state.time_left, state.player_mass, state.player_cells
    );
    draw_text(&line, 12.0, 24.0, 24.0, BLACK);

    if let Some(reason) = state.game_over_reason {
        let text = format!("game over: {reason:?} - press Enter for a new run");
        let size = measure_text(&text, None, 30, 1.0);
        draw_text(
            &text,
            screen_width() / 2.0 - size.width / 2.0,
            screen_height() / 2.0,
            30.0,
            DARKGRAY,
        );
    }
}

fn draw_name(name: &str, x: f32, y: f32) {
    let size = measure_text(name, None, 16, 1.0);
    draw_text(name, x - size.width / 2.0, y, 16.0, BLACK);
}
