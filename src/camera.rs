use macroquad::prelude::*;

/// Maps the fixed-size playfield onto the window, anchored at the top-left
/// and scaled uniformly to fit the space left of the control panel.
pub struct PlayfieldView {
    pub width: f32,
    pub height: f32,
    /// Screen pixels reserved on the right for the egui panel.
    pub reserved_right: f32,
}

impl PlayfieldView {
    pub fn new(width: f32, height: f32, reserved_right: f32) -> Self {
        Self {
            width,
            height,
            reserved_right,
        }
    }

    /// Uniform playfield -> screen scale for a given screen size.
    pub fn scale_for(&self, screen: Vec2) -> f32 {
        let available = vec2((screen.x - self.reserved_right).max(1.0), screen.y.max(1.0));
        (available.x / self.width).min(available.y / self.height)
    }

    /// Camera target that puts playfield x = 0 at the left screen edge and
    /// centers it vertically.
    pub fn target_for(&self, screen: Vec2) -> Vec2 {
        let scale = self.scale_for(screen);
        vec2(screen.x / scale * 0.5, self.height * 0.5)
    }

    pub fn to_macroquad_camera(&self) -> Camera2D {
        let screen = vec2(screen_width(), screen_height());
        let scale = self.scale_for(screen);
        Camera2D {
            target: self.target_for(screen),
            zoom: vec2(scale / screen.x * 2.0, -scale / screen.y * 2.0),
            ..Default::default()
        }
    }
}
