use egui::{Align2, Color32, FontId, RichText, Rounding};

use crate::types::DragReadout;

/// Floating panel with the coordinates of the last marker drop.
pub struct WidgetReadout;

impl WidgetReadout {
    /// Shows the panel only once the marker has been dropped at least once.
    pub fn show(ctx: &egui::Context, readout: Option<&DragReadout>) {
        let Some(readout) = readout else {
            return;
        };

        egui::Area::new("drag_readout".into())
            .anchor(Align2::LEFT_BOTTOM, [10.0, -130.0])
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(Color32::from_black_alpha(128))
                    .rounding(Rounding::same(3.0))
                    .inner_margin(egui::Margin::symmetric(10.0, 5.0))
                    .show(ui, |ui| {
                        for line in readout.lines() {
                            ui.label(
                                RichText::new(line)
                                    .font(FontId::monospace(11.0))
                                    .strong()
                                    .color(Color32::WHITE),
                            );
                        }
                    });
            });
    }
}
