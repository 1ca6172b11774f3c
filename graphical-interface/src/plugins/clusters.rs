use std::{cell::RefCell, rc::Rc};

use clustering::{abbreviate_count, ClusterFeature, ClusterIndex, FeatureKind};
use egui::{Align2, FontId, Pos2, Response, Stroke};
use walkers::{Plugin, Position, Projector};

use crate::{
    layers,
    state::{InteractionState, MapEvent},
    types::MapBounds,
};

/// A feature as drawn on screen during the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFeature {
    pub center: Pos2,
    pub radius: f32,
    pub feature: ClusterFeature,
}

/// Returns the topmost rendered feature under `point`, if any.
pub fn feature_at(rendered: &[RenderedFeature], point: Pos2) -> Option<&RenderedFeature> {
    rendered
        .iter()
        .rev()
        .find(|candidate| candidate.center.distance(point) <= candidate.radius)
}

/// Orders features the way they are layered: clusters below, individual points on top.
pub fn layer_order(
    features: Vec<ClusterFeature>,
    project: impl Fn(&ClusterFeature) -> Pos2,
) -> Vec<RenderedFeature> {
    let (clusters, points): (Vec<_>, Vec<_>) =
        features.into_iter().partition(ClusterFeature::is_cluster);

    clusters
        .into_iter()
        .map(|feature| RenderedFeature {
            center: project(&feature),
            radius: layers::cluster_symbol(feature.point_count()).radius,
            feature,
        })
        .chain(points.into_iter().map(|feature| RenderedFeature {
            center: project(&feature),
            radius: layers::POINT_RADIUS + layers::POINT_STROKE_WIDTH,
            feature,
        }))
        .collect()
}

/// Draws the earthquake clusters and points, and records hovers and clicks on them.
pub struct Clusters<'a> {
    index: &'a ClusterIndex,
    zoom: f64,
    interaction: Rc<RefCell<InteractionState>>,
}

impl<'a> Clusters<'a> {
    pub fn new(
        index: &'a ClusterIndex,
        zoom: f64,
        interaction: Rc<RefCell<InteractionState>>,
    ) -> Self {
        Self {
            index,
            zoom,
            interaction,
        }
    }
}

impl Plugin for Clusters<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, response: &Response, projector: &Projector) {
        let bounds = MapBounds::from_corners(
            projector.unproject(response.rect.left_top().to_vec2()),
            projector.unproject(response.rect.right_bottom().to_vec2()),
        );
        let Ok(features) = self.index.get_clusters(&bounds.to_bbox(), self.zoom) else {
            return;
        };

        let rendered = layer_order(features, |feature| {
            projector
                .project(Position::from_lon_lat(feature.lon, feature.lat))
                .to_pos2()
        });

        let painter = ui.painter();
        for item in rendered.iter().filter(|item| item.feature.is_cluster()) {
            let symbol = layers::cluster_symbol(item.feature.point_count());
            painter.circle_filled(item.center, symbol.radius, symbol.color);
            painter.text(
                item.center,
                Align2::CENTER_CENTER,
                abbreviate_count(item.feature.point_count()),
                FontId::proportional(layers::CLUSTER_COUNT_FONT_SIZE),
                layers::CLUSTER_COUNT_COLOR,
            );
        }
        for item in rendered.iter().filter(|item| !item.feature.is_cluster()) {
            painter.circle(
                item.center,
                layers::POINT_RADIUS,
                layers::POINT_COLOR,
                Stroke::new(layers::POINT_STROKE_WIDTH, layers::POINT_STROKE_COLOR),
            );
        }

        let over_cluster = response
            .hover_pos()
            .and_then(|pointer| feature_at(&rendered, pointer))
            .is_some_and(|item| item.feature.is_cluster());
        let mut interaction = self.interaction.borrow_mut();
        interaction.set_cluster_hover(over_cluster);

        if !response.clicked() {
            return;
        }
        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };
        let click = projector.unproject(pointer.to_vec2());
        interaction.push(click_event(feature_at(&rendered, pointer), click));
    }
}

/// Event for a click on the map. A click that hits nothing closes the popup.
pub fn click_event(hit: Option<&RenderedFeature>, click: Position) -> MapEvent {
    let Some(hit) = hit else {
        return MapEvent::PopupClosed;
    };
    match hit.feature.kind {
        FeatureKind::Cluster { id, .. } => MapEvent::ClusterClicked {
            id,
            center: Position::from_lon_lat(hit.feature.lon, hit.feature.lat),
        },
        FeatureKind::Point { index } => MapEvent::PointClicked { index, click },
    }
}
