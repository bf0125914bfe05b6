use egui;

use super::{UiState, PANEL_WIDTH};
use crate::config;
use crate::evolution::Evolution;
use crate::simulation::Game;

/// Side panel with run controls and live metrics.
pub fn draw_toolbar<E: Evolution>(ctx: &egui::Context, game: &mut Game<E>, ui_state: &mut UiState) {
    egui::SidePanel::right("toolbar")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(3.0);
            title_badge(ui, "FLAPGEN");
            ui.separator();

            compact_group(ui, "Sim", |ui| {
                let pause_label = if game.paused { "Play" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    game.toggle_pause();
                }
                if ui.button("Reset").clicked() {
                    game.reset_session();
                }
            });

            compact_group(ui, "Speed", |ui| {
                for speed in [1.0, 2.0, 5.0, 10.0] {
                    speed_button(ui, game, speed);
                }
            });

            let mut speed = game.config.speed_multiplier;
            let slider = egui::Slider::new(
                &mut speed,
                config::MIN_SPEED_MULTIPLIER..=config::MAX_SPEED_MULTIPLIER,
            )
            .step_by(0.25)
            .suffix("x");
            if ui.add(slider).changed() {
                game.config.set_speed_multiplier(speed);
            }

            compact_group(ui, "View", |ui| {
                ui.checkbox(&mut game.config.debug_mode, "Debug");
                ui.toggle_value(&mut ui_state.show_graphs, "Graphs");
            });

            ui.add_space(4.0);
            ui.separator();
            metric_chip(ui, "Generation", format!("{}", game.generation_count));
            metric_chip(ui, "Score", format!("{}", game.score));
            metric_chip(ui, "High Score", format!("{}", game.high_score));
            metric_chip(
                ui,
                "Alive",
                format!("{}/{}", game.alive_count(), game.config.population_size),
            );
            metric_chip(ui, "Deaths", format!("{}", game.history.deaths_this_generation));
            metric_chip(ui, "Tick", format!("{:.1}ms", game.clock_interval() * 1000.0));
            if game.paused {
                status_chip(ui, "PAUSED", egui::Color32::from_rgb(230, 180, 90));
            }
        });
}

fn speed_button<E: Evolution>(ui: &mut egui::Ui, game: &mut Game<E>, speed: f32) {
    let label = format!("{speed}x");
    let selected = (game.config.speed_multiplier - speed).abs() < 0.01;
    if ui.selectable_label(selected, label).clicked() {
        game.config.set_speed_multiplier(speed);
    }
}

fn title_badge(ui: &mut egui::Ui, label: &str) {
    let text = egui::RichText::new(label)
        .strong()
        .color(egui::Color32::from_rgb(190, 220, 255));
    ui.label(text);
}

fn compact_group(ui: &mut egui::Ui, heading: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.horizontal_wrapped(|ui| {
            ui.label(
                egui::RichText::new(heading)
                    .small()
                    .color(egui::Color32::from_rgb(150, 170, 185)),
            );
            add_contents(ui);
        });
    });
}

fn metric_chip(ui: &mut egui::Ui, key: &str, value: String) {
    let text = egui::RichText::new(format!("{key}: {value}"))
        .small()
        .color(egui::Color32::from_rgb(205, 215, 225));
    ui.label(text);
}

fn status_chip(ui: &mut egui::Ui, label: &str, color: egui::Color32) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(label).small().strong().color(color));
    });
}
