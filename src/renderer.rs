use macroquad::prelude::*;

use crate::agent::Agent;
use crate::camera::PlayfieldView;
use crate::config::{self, Config};
use crate::evolution::Evolution;
use crate::obstacle::{Obstacle, ObstaclePair};
use crate::simulation::Game;

const BG_COLOR: Color = Color::new(0.05, 0.06, 0.09, 1.0);
const SKY_COLOR: Color = Color::new(0.44, 0.77, 0.81, 1.0);
const SKYLINE_COLOR: Color = Color::new(0.62, 0.86, 0.78, 1.0);
const GROUND_COLOR: Color = Color::new(0.87, 0.84, 0.58, 1.0);
const PIPE_COLOR: Color = Color::new(0.45, 0.75, 0.18, 1.0);
const PIPE_LIP_COLOR: Color = Color::new(0.33, 0.58, 0.12, 1.0);
const AGENT_COLOR: Color = Color::new(0.98, 0.80, 0.18, 1.0);
const WING_COLOR: Color = Color::new(0.96, 0.93, 0.80, 1.0);
const BEAK_COLOR: Color = Color::new(0.95, 0.45, 0.15, 1.0);
const HITBOX_COLOR: Color = Color::new(1.0, 0.15, 0.15, 0.9);
const TARGET_COLOR: Color = DARKGREEN;

const PIPE_LIP_HEIGHT: f32 = 24.0;
const PIPE_LIP_OVERHANG: f32 = 3.0;
const GROUND_HEIGHT: f32 = 16.0;
const SKYLINE: [f32; 8] = [40.0, 70.0, 55.0, 90.0, 35.0, 65.0, 80.0, 45.0];

/// Draw one frame from the current simulation state. Never mutates it.
pub fn draw<E: Evolution>(game: &Game<E>, view: &PlayfieldView) {
    clear_background(BG_COLOR);
    set_camera(&view.to_macroquad_camera());

    let config = &game.config;
    draw_background(game.background_x, config);

    render_obstacles(&game.obstacles, config.debug_mode);

    if config.debug_mode {
        draw_circle(game.target.x, game.target.y, 5.0, TARGET_COLOR);
    }

    for agent in game.agents.iter().filter(|a| a.alive) {
        render_agent(agent, config.animate_agent, config.debug_mode);
    }

    draw_hud(game);
    set_default_camera();
}

fn draw_background(offset: f32, config: &Config) {
    draw_rectangle(0.0, 0.0, config.width, config.height, SKY_COLOR);

    let tile = config::BACKGROUND_TILE_WIDTH;
    let shift = (offset % tile).floor();
    let tiles = (config.width / tile).ceil() as usize + 1;
    let building_width = tile / SKYLINE.len() as f32;
    let base = config.height - GROUND_HEIGHT;

    for i in 0..tiles {
        let tile_x = i as f32 * tile - shift;
        for (j, height) in SKYLINE.iter().enumerate() {
            let x = tile_x + j as f32 * building_width;
            draw_rectangle(x, base - height, building_width - 2.0, *height, SKYLINE_COLOR);
        }
    }
    draw_rectangle(0.0, base, config.width, GROUND_HEIGHT, GROUND_COLOR);
}

pub fn render_obstacles(pairs: &[ObstaclePair], debug: bool) {
    for pair in pairs {
        draw_obstacle(&pair.top, debug);
        draw_obstacle(&pair.bottom, debug);

        if debug {
            let (left, right) = (pair.x(), pair.top.right());
            for y in [pair.gap_top(), pair.gap_bottom()] {
                draw_line(left, y, right, y, 1.0, TARGET_COLOR);
            }
        }
    }
}

fn draw_obstacle(obstacle: &Obstacle, debug: bool) {
    let Rect { x, y, w, h } = obstacle.rect();
    draw_rectangle(x, y, w, h, PIPE_COLOR);

    // The lip sits on the gap side.
    let lip_y = if obstacle.leading { y + h - PIPE_LIP_HEIGHT } else { y };
    draw_rectangle(
        x - PIPE_LIP_OVERHANG,
        lip_y,
        w + PIPE_LIP_OVERHANG * 2.0,
        PIPE_LIP_HEIGHT,
        PIPE_LIP_COLOR,
    );

    if debug {
        draw_rectangle_lines(x, y, w, h, 2.0, HITBOX_COLOR);
    }
}

pub fn render_agent(agent: &Agent, animate: bool, debug: bool) {
    let center = agent.center();
    let tilt = (agent.velocity * 6.0).clamp(-25.0, 70.0);
    draw_ellipse(center.x, center.y, agent.width * 0.5, agent.height * 0.5, tilt, AGENT_COLOR);

    // Three wing frames cycling every 5 ticks.
    let wing_offset = if animate {
        [-4.0, 0.0, 4.0][(agent.age / 5 % 3) as usize]
    } else {
        0.0
    };
    draw_ellipse(
        center.x - agent.width * 0.2,
        center.y + wing_offset,
        agent.width * 0.22,
        agent.height * 0.18,
        0.0,
        WING_COLOR,
    );

    draw_circle(center.x + agent.width * 0.22, center.y - agent.height * 0.15, 3.0, WHITE);
    draw_circle(center.x + agent.width * 0.26, center.y - agent.height * 0.15, 1.5, BLACK);
    draw_triangle(
        vec2(center.x + agent.width * 0.4, center.y - 2.0),
        vec2(center.x + agent.width * 0.4, center.y + 4.0),
        vec2(center.x + agent.width * 0.6, center.y + 1.0),
        BEAK_COLOR,
    );

    if debug {
        let Rect { x, y, w, h } = agent.rect();
        draw_rectangle_lines(x, y, w, h, 2.0, HITBOX_COLOR);
    }
}

/// White text with a black outline, baseline at `y`.
pub fn draw_text(text: &str, x: f32, y: f32) {
    let outline = config::TEXT_LINE_WIDTH;
    for (dx, dy) in [(-outline, 0.0), (outline, 0.0), (0.0, -outline), (0.0, outline)] {
        macroquad::text::draw_text(text, x + dx, y + dy, config::FONT_SIZE, BLACK);
    }
    macroquad::text::draw_text(text, x, y, config::FONT_SIZE, WHITE);
}

fn draw_hud<E: Evolution>(game: &Game<E>) {
    let x = 10.0;
    let y = 20.0 + config::TEXT_LINE_WIDTH * 2.0;
    let line = config::FONT_SIZE;

    draw_text(
        &format!("Current Score: {}, High Score: {}", game.score, game.high_score),
        x,
        y,
    );
    draw_text(
        &format!("Alive: {}/{}", game.alive_count(), game.config.population_size),
        x,
        y + line,
    );
    draw_text(&format!("Generation: {}", game.generation_count), x, y + line * 2.0);

    if game.paused {
        draw_text("PAUSED", game.config.width * 0.5 - 40.0, game.config.height * 0.5);
    }
}
