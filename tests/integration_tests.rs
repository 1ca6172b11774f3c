use clustering::{BoundingBox, ClusterIndex};
use graphical_interface::camera::Camera;
use graphical_interface::config::{MapConfig, SEARCH_ZOOM};
use graphical_interface::controller::ViewController;
use graphical_interface::data::{open_source, parse_geojson, FeatureSet};
use graphical_interface::errors::InterfaceError;
use graphical_interface::layers::{self, ClusterTier};
use graphical_interface::state::MapEvent;
use graphical_interface::types::{CoordinateError, CoordinatePair, PointFeature};
use logger::Logger;
use std::path::Path;
use std::time::{Duration, Instant};
use walkers::Position;

const SHIPPED_DATA: &str = "graphical-interface/data/earthquakes.geojson";

// Camera that only remembers what it was told, standing in for the map memory
#[derive(Default)]
struct RecordingCamera {
    center: Option<Position>,
    zoom: f64,
}

impl Camera for RecordingCamera {
    fn center(&self) -> Option<Position> {
        self.center
    }

    fn center_at(&mut self, position: Position) {
        self.center = Some(position);
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f64) -> Result<(), InterfaceError> {
        if !(0.0..=26.0).contains(&zoom) {
            return Err(InterfaceError::InvalidZoom(zoom));
        }
        self.zoom = zoom;
        Ok(())
    }
}

fn load_shipped() -> FeatureSet {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(SHIPPED_DATA);
    let contents = std::fs::read_to_string(&path).expect("Failed to read the shipped data file");
    parse_geojson(&contents).expect("Failed to parse the shipped data file")
}

fn controller_for(features: Vec<PointFeature>) -> ViewController {
    let config = MapConfig::default();
    ViewController::new(
        config.initial_center,
        features,
        Logger::console_only().with_console(false),
    )
    .expect("Failed to build the view controller")
}

#[test]
fn test_shipped_data_loads_through_source() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(SHIPPED_DATA);
    let mut source = open_source(&path).unwrap();
    let set = source.get_features().unwrap();

    assert!(set.features.len() > 300);
    assert_eq!(set.skipped, 0);
    assert!(set.features.iter().any(|f| f.tsunami));
    assert!(set.features.iter().all(|f| !f.id.is_empty()));
}

#[test]
fn test_submit_places_marker_and_recenters() {
    let mut controller = controller_for(Vec::new());
    let mut camera = RecordingCamera {
        center: None,
        zoom: 16.0,
    };

    let pair = CoordinatePair::parse("120.2", "14.93").unwrap();
    controller.place_marker(pair, &mut camera).unwrap();

    assert_eq!(controller.placed_markers().len(), 1);
    let marker = controller.placed_markers()[0].position;
    assert_eq!((marker.lon(), marker.lat()), (120.2, 14.93));

    let center = camera.center.unwrap();
    assert_eq!((center.lon(), center.lat()), (120.2, 14.93));
    assert_eq!(camera.zoom, SEARCH_ZOOM);
    assert_eq!(camera.zoom, 18.0);
}

#[test]
fn test_non_numeric_submit_places_nothing() {
    let controller = controller_for(Vec::new());

    let result = CoordinatePair::parse("east", "14.93");
    assert!(matches!(result, Err(CoordinateError::NotANumber { .. })));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Longitude must be a number, got \"east\"."
    );
    assert!(controller.placed_markers().is_empty());

    assert!(CoordinatePair::parse("", "14.93").is_err());
    assert!(CoordinatePair::parse("120.2", "NaN").is_err());
    assert!(CoordinatePair::parse("120.2", "95").is_err());
}

#[test]
fn test_drag_updates_readout() {
    let mut controller = controller_for(Vec::new());
    let mut camera = RecordingCamera::default();
    let now = Instant::now();

    controller.handle_event(
        MapEvent::MarkerDragged(Position::from_lon_lat(100.0, 10.0)),
        &mut camera,
        now,
    );
    assert!(controller.readout().is_none());

    controller.handle_event(
        MapEvent::MarkerDragEnded(Position::from_lon_lat(100.5, -10.25)),
        &mut camera,
        now,
    );
    let lines = controller.readout().unwrap().lines();
    assert_eq!(lines[0], "Longitude: 100.5");
    assert_eq!(lines[1], "Latitude: -10.25");
}

#[test]
fn test_popup_longitude_follows_clicked_world_copy() {
    let set = load_shipped();
    let (index, feature) = set
        .features
        .iter()
        .enumerate()
        .find(|(_, f)| f.position.lon() < -170.0)
        .expect("The shipped data has points east of the antimeridian");
    let feature = feature.clone();

    let mut controller = controller_for(set.features);
    let mut camera = RecordingCamera::default();
    let click = Position::from_lon_lat(feature.position.lon() + 360.0, feature.position.lat());
    controller.handle_event(MapEvent::PointClicked { index, click }, &mut camera, Instant::now());

    let popup = controller.popup().unwrap();
    assert!((popup.position.lon() - click.lon()).abs() <= 180.0);
    let shift = popup.position.lon() - feature.position.lon();
    assert!((shift / 360.0 - (shift / 360.0).round()).abs() < 1e-9);
    assert_eq!(popup.position.lat(), feature.position.lat());

    let expected = if feature.tsunami { "yes" } else { "no" };
    assert_eq!(popup.lines()[2], format!("tsunami: {}", expected));

    controller.handle_event(MapEvent::PopupClosed, &mut camera, Instant::now());
    assert!(controller.popup().is_none());
}

#[test]
fn test_tsunami_labels() {
    let feature = |tsunami| {
        PointFeature::new(
            "us1000abcd".to_string(),
            Position::from_lon_lat(0.0, 0.0),
            None,
            tsunami,
        )
    };
    assert_eq!(feature(true).tsunami_label(), "yes");
    assert_eq!(feature(false).tsunami_label(), "no");

    let set = parse_geojson(
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"id":"a","mag":2.0,"tsunami":1},"geometry":{"type":"Point","coordinates":[1,2]}},
            {"type":"Feature","properties":{"id":"b","mag":2.0,"tsunami":0},"geometry":{"type":"Point","coordinates":[1,2]}},
            {"type":"Feature","properties":{"id":"c","mag":2.0,"tsunami":"1"},"geometry":{"type":"Point","coordinates":[1,2]}}
        ]}"#,
    )
    .unwrap();
    let labels: Vec<&str> = set.features.iter().map(|f| f.tsunami_label()).collect();
    assert_eq!(labels, vec!["yes", "no", "no"]);
}

#[test]
fn test_cluster_tiers() {
    assert_eq!(ClusterTier::for_count(99), ClusterTier::Small);
    assert_eq!(ClusterTier::for_count(100), ClusterTier::Medium);
    assert_eq!(ClusterTier::for_count(749), ClusterTier::Medium);
    assert_eq!(ClusterTier::for_count(750), ClusterTier::Large);
}

#[test]
fn test_every_point_counted_once_per_zoom() {
    let set = load_shipped();
    let positions: Vec<(f64, f64)> = set
        .features
        .iter()
        .map(|f| (f.position.lon(), f.position.lat()))
        .collect();
    let index = ClusterIndex::new(layers::cluster_options(), &positions).unwrap();

    for zoom in 0..=18 {
        let total: usize = index
            .get_clusters(&BoundingBox::world(), zoom as f64)
            .unwrap()
            .iter()
            .map(|feature| feature.point_count())
            .sum();
        assert_eq!(total, positions.len(), "zoom {}", zoom);
    }
}

#[test]
fn test_points_past_the_antimeridian_are_counted() {
    let set = parse_geojson(
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"id":"a"},"geometry":{"type":"Point","coordinates":[190,10]}},
            {"type":"Feature","properties":{"id":"b"},"geometry":{"type":"Point","coordinates":[-170,-10]}},
            {"type":"Feature","properties":{"id":"c"},"geometry":{"type":"Point","coordinates":[0,0]}}
        ]}"#,
    )
    .unwrap();
    let positions: Vec<(f64, f64)> = set
        .features
        .iter()
        .map(|f| (f.position.lon(), f.position.lat()))
        .collect();
    let index = ClusterIndex::new(layers::cluster_options(), &positions).unwrap();

    for zoom in 0..=17 {
        let total: usize = index
            .get_clusters(&BoundingBox::world(), zoom as f64)
            .unwrap()
            .iter()
            .map(|feature| feature.point_count())
            .sum();
        assert_eq!(total, 3, "zoom {}", zoom);
    }
}

#[test]
fn test_expansion_zoom_is_deeper_than_cluster() {
    let set = load_shipped();
    let positions: Vec<(f64, f64)> = set
        .features
        .iter()
        .map(|f| (f.position.lon(), f.position.lat()))
        .collect();
    let index = ClusterIndex::new(layers::cluster_options(), &positions).unwrap();

    let clusters: Vec<_> = index
        .get_clusters(&BoundingBox::world(), 3.0)
        .unwrap()
        .into_iter()
        .filter(|feature| feature.is_cluster())
        .collect();
    assert!(!clusters.is_empty());

    for cluster in clusters {
        let id = cluster.cluster_id().unwrap();
        let zoom = index.get_cluster_expansion_zoom(id).unwrap();
        assert!(zoom > 3, "cluster {} expands at {}", id, zoom);
    }
}

#[test]
fn test_cluster_click_eases_onto_cluster() {
    let set = load_shipped();
    let mut controller = controller_for(set.features);
    let cluster = controller
        .index()
        .get_clusters(&BoundingBox::world(), 2.0)
        .unwrap()
        .into_iter()
        .find(|feature| feature.is_cluster())
        .unwrap();
    let id = cluster.cluster_id().unwrap();
    let expansion = controller.index().get_cluster_expansion_zoom(id).unwrap();
    let center = Position::from_lon_lat(cluster.lon, cluster.lat);

    let mut camera = RecordingCamera {
        center: Some(Position::from_lon_lat(0.0, 0.0)),
        zoom: 2.0,
    };
    let start = Instant::now();
    controller.handle_event(MapEvent::ClusterClicked { id, center }, &mut camera, start);
    assert!(controller.is_easing());

    let end = start + Duration::from_millis(600);
    assert!(!controller.advance(&mut camera, end));
    assert_eq!(camera.zoom, expansion as f64);
    assert_eq!(camera.center, Some(center));
}

#[test]
fn test_unknown_cluster_is_only_logged() {
    let mut controller = controller_for(load_shipped().features);
    let mut camera = RecordingCamera::default();

    controller.handle_event(
        MapEvent::ClusterClicked {
            id: clustering::ClusterId::from(u64::MAX),
            center: Position::from_lon_lat(0.0, 0.0),
        },
        &mut camera,
        Instant::now(),
    );

    assert!(!controller.is_easing());
    assert!(camera.center.is_none());
}
