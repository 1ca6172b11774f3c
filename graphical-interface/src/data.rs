use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use clustering::wrap_longitude;
use serde::Deserialize;
use serde_json::Value;
use walkers::Position;

use crate::{errors::InterfaceError, types::PointFeature};

/// Points read from a data file, plus how many records had to be skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    pub features: Vec<PointFeature>,
    pub skipped: usize,
}

/// A trait for anything able to supply the point features shown on the map.
pub trait FeatureSource {
    fn get_features(&mut self) -> Result<FeatureSet, InterfaceError>;
}

/// Reads a GeoJSON `FeatureCollection` of points from disk.
pub struct GeoJsonSource {
    path: PathBuf,
}

impl GeoJsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeatureSource for GeoJsonSource {
    fn get_features(&mut self) -> Result<FeatureSet, InterfaceError> {
        let contents = std::fs::read_to_string(&self.path)?;
        parse_geojson(&contents)
    }
}

/// Reads a `longitude,latitude,mag,id,tsunami` table from disk.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeatureSource for CsvSource {
    fn get_features(&mut self) -> Result<FeatureSet, InterfaceError> {
        parse_csv(File::open(&self.path)?)
    }
}

/// Picks the source matching the file extension of `path`.
pub fn open_source(path: &Path) -> Result<Box<dyn FeatureSource>, InterfaceError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("geojson") | Some("json") => Ok(Box::new(GeoJsonSource::new(path))),
        Some("csv") => Ok(Box::new(CsvSource::new(path))),
        _ => Err(InterfaceError::UnsupportedFormat(path.display().to_string())),
    }
}

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<RawProperties>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Point {
        coordinates: Vec<f64>,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Default)]
struct RawProperties {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    mag: Option<f64>,
    #[serde(default)]
    tsunami: Option<Value>,
}

#[derive(Deserialize)]
struct CsvRecord {
    longitude: f64,
    latitude: f64,
    mag: Option<f64>,
    id: String,
    tsunami: Option<f64>,
}

/// Parses a GeoJSON feature collection. Features without a point geometry are skipped.
pub fn parse_geojson(contents: &str) -> Result<FeatureSet, InterfaceError> {
    let collection: RawCollection = serde_json::from_str(contents)?;
    let mut set = FeatureSet::default();

    for raw in collection.features {
        let position = match raw.geometry {
            Some(RawGeometry::Point { coordinates }) if coordinates.len() >= 2 => {
                point_position(coordinates[0], coordinates[1])
            }
            _ => None,
        };
        let Some(position) = position else {
            set.skipped += 1;
            continue;
        };
        let properties = raw.properties.unwrap_or_default();

        set.features.push(PointFeature::new(
            properties.id.as_ref().map(value_label).unwrap_or_default(),
            position,
            properties.mag,
            properties.tsunami.as_ref().and_then(Value::as_f64) == Some(1.0),
        ));
    }

    Ok(set)
}

/// Parses a CSV point table with a header row.
pub fn parse_csv<R: Read>(reader: R) -> Result<FeatureSet, InterfaceError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut set = FeatureSet::default();

    for record in reader.deserialize::<CsvRecord>() {
        let record = record?;
        let Some(position) = point_position(record.longitude, record.latitude) else {
            set.skipped += 1;
            continue;
        };
        set.features.push(PointFeature::new(
            record.id,
            position,
            record.mag,
            record.tsunami == Some(1.0),
        ));
    }

    Ok(set)
}

/// Position of a data point with its longitude brought into `[-180, 180)`.
/// Non-finite coordinates and latitudes beyond the poles yield `None`.
fn point_position(lon: f64, lat: f64) -> Option<Position> {
    if !lon.is_finite() || !lat.is_finite() || lat.abs() > 90.0 {
        return None;
    }
    Some(Position::from_lon_lat(wrap_longitude(lon), lat))
}

fn value_label(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature",
              "properties": { "id": "ak16994521", "mag": 2.3, "tsunami": 0 },
              "geometry": { "type": "Point", "coordinates": [-151.5129, 63.1016, 0.0] } },
            { "type": "Feature",
              "properties": { "id": 4021, "mag": 5, "tsunami": 1 },
              "geometry": { "type": "Point", "coordinates": [179.9, -17.7] } },
            { "type": "Feature",
              "properties": { "id": "line" },
              "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] } },
            { "type": "Feature", "properties": null, "geometry": null }
        ]
    }"#;

    #[test]
    fn test_parse_geojson_points() {
        let set = parse_geojson(COLLECTION).unwrap();

        assert_eq!(set.features.len(), 2);
        assert_eq!(set.skipped, 2);

        let first = &set.features[0];
        assert_eq!(first.id, "ak16994521");
        assert_eq!(first.position.lon(), -151.5129);
        assert_eq!(first.position.lat(), 63.1016);
        assert_eq!(first.magnitude, Some(2.3));
        assert_eq!(first.tsunami_label(), "no");

        let second = &set.features[1];
        assert_eq!(second.id, "4021");
        assert_eq!(second.magnitude_label(), "5");
        assert_eq!(second.tsunami_label(), "yes");
    }

    #[test]
    fn test_parse_geojson_missing_properties() {
        let set = parse_geojson(
            r#"{ "features": [ { "geometry": { "type": "Point", "coordinates": [1, 2] } } ] }"#,
        )
        .unwrap();

        let feature = &set.features[0];
        assert_eq!(feature.id, "");
        assert_eq!(feature.magnitude_label(), "unknown");
        assert!(!feature.tsunami);
    }

    #[test]
    fn test_parse_geojson_invalid() {
        assert!(matches!(
            parse_geojson("{ not json"),
            Err(InterfaceError::GeoJson(_))
        ));
    }

    #[test]
    fn test_parse_csv() {
        let data = "longitude,latitude,mag,id,tsunami\n\
                    120.2,14.93,4.5,ph001,1\n\
                    -70.1,-33.4,,cl002,0\n";
        let set = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(set.features.len(), 2);
        assert!(set.features[0].tsunami);
        assert_eq!(set.features[1].magnitude, None);
        assert_eq!(set.features[1].position.lat(), -33.4);
    }

    #[test]
    fn test_longitudes_are_wrapped_and_bad_points_skipped() {
        let set = parse_geojson(
            r#"{ "features": [
                { "properties": { "id": "east" }, "geometry": { "type": "Point", "coordinates": [190, 10] } },
                { "properties": { "id": "west" }, "geometry": { "type": "Point", "coordinates": [-170, -10] } },
                { "properties": { "id": "pole" }, "geometry": { "type": "Point", "coordinates": [0, 95] } }
            ] }"#,
        )
        .unwrap();

        assert_eq!(set.features.len(), 2);
        assert_eq!(set.skipped, 1);
        assert_eq!(set.features[0].position.lon(), -170.0);
        assert_eq!(set.features[1].position.lon(), -170.0);
        assert_eq!(set.features[0].position.lat(), 10.0);

        let data = "longitude,latitude,mag,id,tsunami\n\
                    370.5,14.93,4.5,ph001,1\n\
                    NaN,-33.4,,cl002,0\n";
        let set = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(set.features.len(), 1);
        assert_eq!(set.skipped, 1);
        assert_eq!(set.features[0].position.lon(), 10.5);
    }

    #[test]
    fn test_open_source_by_extension() {
        assert!(open_source(Path::new("points.geojson")).is_ok());
        assert!(open_source(Path::new("points.CSV")).is_ok());
        assert!(matches!(
            open_source(Path::new("points.kml")),
            Err(InterfaceError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let mut source = GeoJsonSource::new("does/not/exist.geojson");
        assert!(matches!(source.get_features(), Err(InterfaceError::Io(_))));
    }
}
