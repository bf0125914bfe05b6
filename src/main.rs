use clap::Parser;
use macroquad::prelude::*;

mod agent;
mod camera;
mod clock;
mod config;
mod error;
mod evolution;
mod input;
mod network;
mod obstacle;
mod renderer;
mod simulation;
mod spawner;
mod stats;
mod targeting;
mod ui;

use camera::PlayfieldView;
use config::CliArgs;
use evolution::NeuroEvolution;
use input::{Action, InputMap};
use simulation::Game;
use ui::UiState;

fn window_conf() -> Conf {
    Conf {
        window_title: "flapgen: neuroevolution flappy birds".to_string(),
        window_width: 500 + ui::PANEL_WIDTH as i32,
        window_height: 512,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match CliArgs::parse().load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };

    let input_map = InputMap::from_keybinds(&config.keybinds);
    log::info!(
        "keys: flap {:?}, pause {:?}",
        input_map.key_for(Action::Flap),
        input_map.key_for(Action::Pause)
    );
    let view = PlayfieldView::new(config.width, config.height, ui::PANEL_WIDTH);
    let mut game: Game<NeuroEvolution> = match Game::new(config) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };
    let mut ui_state = UiState::default();

    loop {
        for action in input_map.pressed(is_key_pressed) {
            match action {
                Action::Flap => game.flap_all(),
                Action::Pause => game.toggle_pause(),
            }
        }

        if let Err(e) = game.run_clock(get_frame_time() as f64) {
            log::error!("simulation halted: {e}");
            std::process::exit(1);
        }

        renderer::draw(&game, &view);
        ui::draw_ui(&mut game, &mut ui_state);

        next_frame().await;
    }
}
