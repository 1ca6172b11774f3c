use std::{cell::RefCell, rc::Rc};

use egui::{Align, Align2, Id, Layout, Order, Response, RichText, Vec2};
use walkers::{Plugin, Projector};

use crate::{
    state::{InteractionState, MapEvent},
    types::PopupInfo,
};

/// Shows the details of the last clicked point above its position.
pub struct FeaturePopup<'a> {
    popup: Option<&'a PopupInfo>,
    interaction: Rc<RefCell<InteractionState>>,
}

impl<'a> FeaturePopup<'a> {
    pub fn new(popup: Option<&'a PopupInfo>, interaction: Rc<RefCell<InteractionState>>) -> Self {
        Self { popup, interaction }
    }
}

impl Plugin for FeaturePopup<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        let Some(popup) = self.popup else {
            return;
        };

        let anchor = projector.project(popup.position).to_pos2() - Vec2::new(0.0, 10.0);

        egui::Area::new(Id::new("feature_popup"))
            .order(Order::Foreground)
            .fixed_pos(anchor)
            .pivot(Align2::CENTER_BOTTOM)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.with_layout(Layout::right_to_left(Align::TOP), |ui| {
                        if ui.small_button("×").clicked() {
                            self.interaction.borrow_mut().push(MapEvent::PopupClosed);
                        }
                    });
                    for line in popup.lines() {
                        ui.label(RichText::new(line).size(13.0));
                    }
                });
            });
    }
}
