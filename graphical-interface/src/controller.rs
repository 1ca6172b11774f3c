use std::time::Instant;

use clustering::{ClusterId, ClusterIndex};
use logger::{Color, Logger};
use walkers::Position;

use crate::{
    camera::{Camera, EaseTo},
    config::SEARCH_ZOOM,
    errors::InterfaceError,
    layers,
    state::MapEvent,
    types::{
        wrap_longitude_near, CoordinatePair, DragReadout, Marker, MarkerColor, PointFeature,
        PopupInfo,
    },
};

/// Owns everything the map shows on top of the tiles and reacts to what the
/// user does with it.
///
/// The controller never talks to the window directly: plugins record
/// `MapEvent`s, the app forwards them here together with the camera, and the
/// plugins read the resulting state back on the next frame.
pub struct ViewController {
    features: Vec<PointFeature>,
    index: ClusterIndex,
    draggable_marker: Marker,
    placed_markers: Vec<Marker>,
    readout: Option<DragReadout>,
    popup: Option<PopupInfo>,
    ease: Option<EaseTo>,
    initial_center: Position,
    logger: Logger,
}

impl ViewController {
    /// Creates the controller with the draggable marker sitting on `initial_center`
    /// and the earthquake source clustered.
    pub fn new(
        initial_center: Position,
        features: Vec<PointFeature>,
        logger: Logger,
    ) -> Result<Self, InterfaceError> {
        let index = configure_cluster_layers(&features)?;
        let _ = logger.info(
            &format!("Clustered {} points ({:?}).", features.len(), index),
            Color::Cyan,
        );

        Ok(Self {
            features,
            index,
            draggable_marker: Marker::draggable(initial_center),
            placed_markers: Vec::new(),
            readout: None,
            popup: None,
            ease: None,
            initial_center,
            logger,
        })
    }

    pub fn features(&self) -> &[PointFeature] {
        &self.features
    }

    pub fn index(&self) -> &ClusterIndex {
        &self.index
    }

    pub fn draggable_marker(&self) -> &Marker {
        &self.draggable_marker
    }

    pub fn placed_markers(&self) -> &[Marker] {
        &self.placed_markers
    }

    pub fn readout(&self) -> Option<&DragReadout> {
        self.readout.as_ref()
    }

    pub fn popup(&self) -> Option<&PopupInfo> {
        self.popup.as_ref()
    }

    pub fn is_easing(&self) -> bool {
        self.ease.is_some()
    }

    /// Dispatches an event recorded by the map plugins.
    pub fn handle_event<C: Camera>(&mut self, event: MapEvent, camera: &mut C, now: Instant) {
        match event {
            MapEvent::MarkerDragged(position) => self.drag_marker(position),
            MapEvent::MarkerDragEnded(position) => {
                self.on_drag_end(position);
            }
            MapEvent::ClusterClicked { id, center } => {
                if let Err(e) = self.handle_cluster_click(id, center, camera, now) {
                    let _ = self
                        .logger
                        .warn(&format!("Could not expand cluster {}: {}", id, e));
                }
            }
            MapEvent::PointClicked { index, click } => {
                self.handle_point_click(index, click);
            }
            MapEvent::PopupClosed => self.close_popup(),
        }
    }

    /// Moves the draggable marker while it is being dragged.
    pub fn drag_marker(&mut self, position: Position) {
        self.draggable_marker.position = position;
    }

    /// Drops the draggable marker and shows where it landed.
    pub fn on_drag_end(&mut self, position: Position) -> &DragReadout {
        self.draggable_marker.position = position;
        let _ = self.logger.debug(&format!(
            "Marker dropped at {}, {}",
            position.lon(),
            position.lat()
        ));
        self.readout.insert(DragReadout::from_position(position))
    }

    /// Eases the view onto a clicked cluster at the zoom where it breaks apart.
    ///
    /// # Returns
    /// * `Result<u8, InterfaceError>` - The expansion zoom, or `InterfaceError::Cluster` if
    ///   the cluster is unknown to the index. The view does not move on error.
    pub fn handle_cluster_click<C: Camera>(
        &mut self,
        id: ClusterId,
        center: Position,
        camera: &C,
        now: Instant,
    ) -> Result<u8, InterfaceError> {
        let zoom = self.index.get_cluster_expansion_zoom(id)?;
        let from_center = camera.center().unwrap_or(self.initial_center);
        self.ease = Some(EaseTo::new(
            from_center,
            camera.zoom(),
            center,
            zoom as f64,
            now,
        ));
        Ok(zoom)
    }

    /// Opens the popup of a clicked unclustered point.
    ///
    /// The point's longitude is shifted by whole turns so the popup lands on the
    /// copy of the world that was clicked.
    pub fn handle_point_click(&mut self, index: usize, click: Position) -> Option<&PopupInfo> {
        let Some(feature) = self.features.get(index) else {
            let _ = self
                .logger
                .warn(&format!("Clicked point {} is not in the data set", index));
            return None;
        };

        let lon = wrap_longitude_near(feature.position.lon(), click.lon());
        let position = Position::from_lon_lat(lon, feature.position.lat());
        Some(&*self.popup.insert(PopupInfo::new(feature, position)))
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    /// Drops an orange marker on validated coordinates and jumps the view there.
    pub fn place_marker<C: Camera>(
        &mut self,
        pair: CoordinatePair,
        camera: &mut C,
    ) -> Result<(), InterfaceError> {
        let position = pair.to_position();
        self.ease = None;
        self.placed_markers.push(Marker::fixed(position, MarkerColor::Orange));

        camera.center_at(position);
        camera.set_zoom(SEARCH_ZOOM)?;

        let _ = self.logger.info(
            &format!("Placed marker at {}, {}", pair.longitude, pair.latitude),
            Color::Green,
        );
        Ok(())
    }

    /// Steps a running ease animation. Returns `true` while the view is still moving.
    pub fn advance<C: Camera>(&mut self, camera: &mut C, now: Instant) -> bool {
        let Some(ease) = &self.ease else {
            return false;
        };

        let (center, zoom, done) = ease.sample(now);
        camera.center_at(center);
        if let Err(e) = camera.set_zoom(zoom) {
            let _ = self.logger.warn(&format!("Stopping animation: {}", e));
            self.ease = None;
            return false;
        }

        if done {
            self.ease = None;
        }
        !done
    }
}

fn configure_cluster_layers(features: &[PointFeature]) -> Result<ClusterIndex, InterfaceError> {
    let positions: Vec<(f64, f64)> = features
        .iter()
        .map(|feature| (feature.position.lon(), feature.position.lat()))
        .collect();
    Ok(ClusterIndex::new(layers::cluster_options(), &positions)?)
}
