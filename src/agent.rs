use macroquad::prelude::*;

use crate::config::{self, Config};
use crate::obstacle::ObstaclePair;

/// A bird. Horizontal position is fixed; only the vertical axis integrates.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub pos: Vec2,
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
    /// Ticks survived, drives the wing animation.
    pub age: u32,
    gravity: f32,
    flap_velocity: f32,
    floor: f32,
}

impl Agent {
    pub fn new(config: &Config) -> Self {
        Self {
            pos: vec2(config.agent_x, config.height * 0.5 - config::AGENT_HEIGHT * 0.5),
            velocity: 0.0,
            width: config::AGENT_WIDTH,
            height: config::AGENT_HEIGHT,
            alive: true,
            age: 0,
            gravity: config.gravity,
            flap_velocity: config.flap_velocity,
            floor: config.height,
        }
    }

    pub fn flap(&mut self) {
        if self.alive {
            self.velocity = self.flap_velocity;
        }
    }

    /// One physics step followed by collision against the field edges and `obstacles`.
    pub fn update(&mut self, obstacles: &[ObstaclePair]) {
        if !self.alive {
            return;
        }

        self.velocity += self.gravity;
        self.pos.y += self.velocity;
        self.age += 1;

        if self.pos.y < 0.0 || self.pos.y + self.height > self.floor {
            self.alive = false;
            return;
        }

        let hitbox = self.rect();
        if obstacles.iter().any(|pair| pair.overlaps(&hitbox)) {
            self.alive = false;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + vec2(self.width * 0.5, self.height * 0.5)
    }
}
