use std::fmt::{self, Display};

use clustering::errors::ClusterError;
use logger::LoggerError;

/// Enum representing the errors the map interface can run into.
///
/// - `Io`: the data file could not be read.
/// - `GeoJson`: the data file is not a valid GeoJSON feature collection.
/// - `Csv`: the data file is not a valid CSV point table.
/// - `UnsupportedFormat`: the data file extension is not recognized.
/// - `Cluster`: the cluster index rejected a query.
/// - `InvalidZoom`: the map refused a zoom level.
/// - `Eframe`: the native window could not be created.
/// - `Logger`: the log file could not be set up.
#[derive(Debug)]
pub enum InterfaceError {
    Io(std::io::Error),
    GeoJson(serde_json::Error),
    Csv(csv::Error),
    UnsupportedFormat(String),
    Cluster(ClusterError),
    InvalidZoom(f64),
    Eframe(eframe::Error),
    Logger(LoggerError),
}

impl Display for InterfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceError::Io(e) => write!(f, "[Io]: {}", e),
            InterfaceError::GeoJson(e) => write!(f, "[GeoJson]: {}", e),
            InterfaceError::Csv(e) => write!(f, "[Csv]: {}", e),
            InterfaceError::UnsupportedFormat(path) => {
                write!(f, "[UnsupportedFormat]: Cannot load features from {}", path)
            }
            InterfaceError::Cluster(e) => write!(f, "[Cluster]: {}", e),
            InterfaceError::InvalidZoom(zoom) => {
                write!(f, "[InvalidZoom]: The map cannot zoom to {}", zoom)
            }
            InterfaceError::Eframe(e) => write!(f, "[Eframe]: {}", e),
            InterfaceError::Logger(e) => write!(f, "[Logger]: {}", e),
        }
    }
}

impl std::error::Error for InterfaceError {}

impl From<std::io::Error> for InterfaceError {
    fn from(err: std::io::Error) -> Self {
        InterfaceError::Io(err)
    }
}

impl From<serde_json::Error> for InterfaceError {
    fn from(err: serde_json::Error) -> Self {
        InterfaceError::GeoJson(err)
    }
}

impl From<csv::Error> for InterfaceError {
    fn from(err: csv::Error) -> Self {
        InterfaceError::Csv(err)
    }
}

impl From<ClusterError> for InterfaceError {
    fn from(err: ClusterError) -> Self {
        InterfaceError::Cluster(err)
    }
}

impl From<eframe::Error> for InterfaceError {
    fn from(err: eframe::Error) -> Self {
        InterfaceError::Eframe(err)
    }
}

impl From<LoggerError> for InterfaceError {
    fn from(err: LoggerError) -> Self {
        InterfaceError::Logger(err)
    }
}
