use anyhow::Context;
use macroquad::prelude::*;
use tracing::info;

use gyre::simulation::params::Config;
use gyre::simulation::world::World;

mod graphics;

/// Reads `gyre.json` next to the binary if present, otherwise defaults.
fn load_config() -> anyhow::Result<Config> {
    match std::fs::read_to_string("gyre.json") {
        Ok(text) => {
            let config: Config =
                serde_json::from_str(&text).context("gyre.json is not a valid config")?;
            config.validate().context("gyre.json rejected")?;
            Ok(config)
        }
        Err(_) => Ok(Config::default()),
    }
}

#[macroquad::main("Gyre")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err:#}");
            return;
        }
    };

    let mut world = World::new(config.clone());
    let mut reported = false;

    loop {
        if !world.running && world.game_over_reason.is_none() {
            clear_background(LIGHTGRAY);
            let text = "Start a new run by pressing Enter";
            let font_size = 30.0;
            let text_size = measure_text(text, None, font_size as _, 1.0);
            draw_text(
                text,
                screen_width() / 2. - text_size.width / 2.,
                screen_height() / 2. - text_size.height / 2.,
                font_size,
                DARKGRAY,
            );
            if is_key_pressed(KeyCode::Enter) {
                world.start();
            }
            next_frame().await;
            continue;
        }

        if world.running {
            let (mx, my) = mouse_position();
            let (ox, oy) = graphics::camera_offset(&world);
            world.set_pointer_target(mx + ox, my + oy);
            world.set_boost(is_mouse_button_down(MouseButton::Left));
            if is_key_pressed(KeyCode::Space) {
                world.try_split(mx + ox, my + oy);
            }
            world.update();
        } else {
            if !reported {
                // the snapshot the scoring layer would submit
                match serde_json::to_string(&world.game_state()) {
                    Ok(payload) => info!(%payload, "final snapshot"),
                    Err(err) => info!(%err, "snapshot serialization failed"),
                }
                reported = true;
            }
            // a new run needs a fresh world; the ended one stays readable
            if is_key_pressed(KeyCode::Enter) {
                world = World::new(config.clone());
                world.start();
                reported = false;
            }
        }

        clear_background(Color::from_rgba(225, 240, 250, 255));
        graphics::draw_world(&world);
        graphics::draw_hud(&world);

        next_frame().await
    }
}
