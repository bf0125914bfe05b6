use egui;

use crate::stats::{GenerationHistory, RingBuffer};

/// Score per generation graphs.
pub fn draw_graphs(ctx: &egui::Context, history: &GenerationHistory) {
    egui::Window::new("Generations")
        .default_pos(egui::pos2(20.0, 120.0))
        .default_size(egui::vec2(320.0, 220.0))
        .resizable(true)
        .show(ctx, |ui| {
            if history.final_scores.is_empty() {
                ui.label("No finished generations yet.");
                return;
            }

            ui.collapsing("Final Score", |ui| {
                draw_line_graph(ui, &history.final_scores, egui::Color32::from_rgb(100, 200, 100));
            });

            ui.collapsing("Best Fitness", |ui| {
                draw_line_graph(ui, &history.best_fitness, egui::Color32::from_rgb(200, 150, 255));
            });
        });
}

fn draw_line_graph(ui: &mut egui::Ui, buffer: &RingBuffer, color: egui::Color32) {
    let size = egui::vec2(ui.available_width(), 80.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 2.0, egui::Color32::from_gray(20));

    draw_line_in_rect(&painter, buffer, rect, color);

    if let Some(val) = buffer.last() {
        painter.text(
            egui::pos2(rect.right() - 4.0, rect.top() + 2.0),
            egui::Align2::RIGHT_TOP,
            format!("{val:.0}"),
            egui::FontId::proportional(10.0),
            egui::Color32::from_gray(200),
        );
    }
}

fn draw_line_in_rect(painter: &egui::Painter, buffer: &RingBuffer, rect: egui::Rect, color: egui::Color32) {
    let len = buffer.len();
    if len < 2 {
        return;
    }

    // Scores start at zero, so the axis does too.
    let max_val = buffer.iter().fold(1.0f32, f32::max);

    let points: Vec<egui::Pos2> = buffer
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = rect.left() + (i as f32 / (len - 1) as f32) * rect.width();
            let y = rect.bottom() - (v / max_val) * rect.height();
            egui::pos2(x, y)
        })
        .collect();

    painter.add(egui::Shape::line(points, egui::Stroke::new(1.5, color)));
}
