pub mod graphs;
pub mod toolbar;

use crate::evolution::Evolution;
use crate::simulation::Game;

/// Width of the right-hand control panel in screen pixels.
pub const PANEL_WIDTH: f32 = 240.0;

/// Tracks which UI panels are open.
pub struct UiState {
    pub show_graphs: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self { show_graphs: true }
    }
}

/// Draw all egui UI panels.
pub fn draw_ui<E: Evolution>(game: &mut Game<E>, ui_state: &mut UiState) {
    egui_macroquad::ui(|ctx| {
        toolbar::draw_toolbar(ctx, game, ui_state);

        if ui_state.show_graphs {
            graphs::draw_graphs(ctx, &game.history);
        }
    });

    egui_macroquad::draw();
}
