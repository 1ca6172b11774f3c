use egui::{Align2, Color32, RichText, Stroke};

use crate::types::{Axis, CoordinatePair};

/// A widget for typing coordinates to drop a marker on.
///
/// Both fields keep whatever the user types. The text is only parsed when
/// Search is pressed, and a rejected value shows a message instead of a marker.
#[derive(Debug, Default)]
pub struct WidgetCoordinateForm {
    longitude: String,
    latitude: String,
    error_message: Option<String>,
}

impl WidgetCoordinateForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the raw text of one field.
    pub fn update_field(&mut self, axis: Axis, text: &str) {
        match axis {
            Axis::Longitude => self.longitude = text.to_string(),
            Axis::Latitude => self.latitude = text.to_string(),
        }
    }

    fn field(&self, axis: Axis) -> &str {
        match axis {
            Axis::Longitude => &self.longitude,
            Axis::Latitude => &self.latitude,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Parses both fields. On failure the reason is kept for display and `None` is returned.
    pub fn submit(&mut self) -> Option<CoordinatePair> {
        match CoordinatePair::parse(&self.longitude, &self.latitude) {
            Ok(pair) => {
                self.error_message = None;
                Some(pair)
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                None
            }
        }
    }

    /// Shows the form in the bottom left corner and returns the coordinates
    /// submitted this frame, if any.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<CoordinatePair> {
        let mut submitted = None;

        egui::Area::new("coordinate_form".into())
            .anchor(Align2::LEFT_BOTTOM, [10.0, -10.0])
            .show(ctx, |ui| {
                egui::Frame::window(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for (axis, hint) in [
                            (Axis::Latitude, "Enter latitude"),
                            (Axis::Longitude, "Enter longitude"),
                        ] {
                            let mut text = self.field(axis).to_string();
                            let edit = egui::TextEdit::singleline(&mut text)
                                .hint_text(hint)
                                .desired_width(140.0);
                            if ui.add(edit).changed() {
                                self.update_field(axis, &text);
                            }
                        }

                        let search = egui::Button::new("Search")
                            .stroke(Stroke::new(2.0, Color32::BLUE))
                            .rounding(4.0);
                        if ui.add(search).clicked() {
                            submitted = self.submit();
                        }
                    });

                    if let Some(error) = self.error_message() {
                        ui.colored_label(Color32::RED, RichText::new(error).size(12.0));
                    }
                });
            });

        submitted
    }
}
