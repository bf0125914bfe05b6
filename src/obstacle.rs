use macroquad::prelude::*;

use crate::config::{self, Config};

/// One pipe. `leading` pipes hang from the top, the others rise from the bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub leading: bool,
    pub speed: f32,
    /// Set once the obstacle has fully left the playfield on the left.
    pub expired: bool,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, leading: bool, config: &Config) -> Self {
        Self {
            pos: vec2(x, y),
            width: config::OBSTACLE_WIDTH,
            height: config::OBSTACLE_HEIGHT,
            leading,
            speed: config.obstacle_speed,
            expired: false,
        }
    }

    pub fn update(&mut self) {
        self.pos.x -= self.speed;
        if self.right() < 0.0 {
            self.expired = true;
        }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// Two obstacles sharing one vertical gap.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstaclePair {
    pub top: Obstacle,
    pub bottom: Obstacle,
}

impl ObstaclePair {
    /// Build a pair at the trailing edge whose gap starts at `gap_top`.
    pub fn spawn(gap_top: f32, config: &Config) -> Self {
        let top = Obstacle::new(config.width, gap_top - config::OBSTACLE_HEIGHT, true, config);
        let bottom = Obstacle::new(config.width, gap_top + config.gap_size, false, config);
        Self { top, bottom }
    }

    pub fn x(&self) -> f32 {
        self.top.pos.x
    }

    pub fn gap_top(&self) -> f32 {
        self.top.bottom()
    }

    pub fn gap_bottom(&self) -> f32 {
        self.bottom.pos.y
    }

    pub fn update(&mut self) {
        self.top.update();
        self.bottom.update();
    }

    pub fn expired(&self) -> bool {
        self.top.expired && self.bottom.expired
    }

    pub fn overlaps(&self, rect: &Rect) -> bool {
        self.top.rect().overlaps(rect) || self.bottom.rect().overlaps(rect)
    }
}
