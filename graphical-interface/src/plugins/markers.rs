use std::{cell::RefCell, rc::Rc};

use egui::{include_image, CursorIcon, Image, Pos2, Rect, Response, Sense, Vec2};
use walkers::{Plugin, Projector};

use crate::{
    state::{InteractionState, MapEvent},
    types::Marker,
};

const MARKER_SIZE: Vec2 = Vec2::new(27.0, 41.0);

/// Rectangle of a pin whose tip touches `tip`.
fn pin_rect(tip: Pos2) -> Rect {
    Rect::from_min_size(tip - Vec2::new(MARKER_SIZE.x / 2.0, MARKER_SIZE.y), MARKER_SIZE)
}

fn paint_pin(ui: &egui::Ui, marker: &Marker, tip: Pos2) {
    Image::new(include_image!("../../assets/marker-pin.svg"))
        .fit_to_exact_size(MARKER_SIZE)
        .tint(marker.color.tint())
        .paint_at(ui, pin_rect(tip));
}

/// Draws the draggable marker and the markers placed from the search form.
pub struct Markers<'a> {
    draggable: &'a Marker,
    placed: &'a [Marker],
    interaction: Rc<RefCell<InteractionState>>,
}

impl<'a> Markers<'a> {
    pub fn new(
        draggable: &'a Marker,
        placed: &'a [Marker],
        interaction: Rc<RefCell<InteractionState>>,
    ) -> Self {
        Self {
            draggable,
            placed,
            interaction,
        }
    }
}

impl Plugin for Markers<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        for marker in self.placed {
            paint_pin(ui, marker, projector.project(marker.position).to_pos2());
        }

        let tip = projector.project(self.draggable.position).to_pos2();
        let response = ui.interact(
            pin_rect(tip),
            ui.id().with("draggable-marker"),
            Sense::drag(),
        );

        let mut position = self.draggable.position;
        if response.dragged() {
            position = projector.unproject((tip + response.drag_delta()).to_vec2());
            self.interaction
                .borrow_mut()
                .push(MapEvent::MarkerDragged(position));
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }

        if response.drag_stopped() {
            self.interaction
                .borrow_mut()
                .push(MapEvent::MarkerDragEnded(position));
        }

        paint_pin(ui, self.draggable, projector.project(position).to_pos2());
    }
}
