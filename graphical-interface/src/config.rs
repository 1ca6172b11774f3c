use std::path::PathBuf;

use logger::LogLevel;
use walkers::Position;

pub const INITIAL_LON: f64 = 120.20008552927487;
pub const INITIAL_LAT: f64 = 14.934168555739369;
pub const INITIAL_ZOOM: f64 = 16.;
/// Zoom used when centering on coordinates typed in the search form.
pub const SEARCH_ZOOM: f64 = 18.;

const DEFAULT_DATA_PATH: &str = "graphical-interface/data/earthquakes.geojson";
const DEFAULT_LOG_DIR: &str = "logs";

const TOKEN_VAR: &str = "MAPBOX_ACCESS_TOKEN";
const DATA_VAR: &str = "QUAKE_MAP_DATA";
const LOG_DIR_VAR: &str = "QUAKE_MAP_LOG_DIR";
const LOG_LEVEL_VAR: &str = "QUAKE_MAP_LOG_LEVEL";
const TILE_CACHE_VAR: &str = "QUAKE_MAP_TILE_CACHE";

/// Start-up settings of the map window.
///
/// The tile access token travels through here to the tile source; nothing
/// else in the application reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub access_token: Option<String>,
    pub data_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: LogLevel,
    pub tile_cache: Option<PathBuf>,
    pub initial_center: Position,
    pub initial_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: LogLevel::Info,
            tile_cache: None,
            initial_center: Position::from_lon_lat(INITIAL_LON, INITIAL_LAT),
            initial_zoom: INITIAL_ZOOM,
        }
    }
}

impl MapConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup. Blank values count as unset,
    /// and an unparsable log level keeps the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            access_token: read(TOKEN_VAR).map(|token| token.trim().to_string()),
            data_path: read(DATA_VAR).map(PathBuf::from).unwrap_or(defaults.data_path),
            log_dir: read(LOG_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: read(LOG_LEVEL_VAR)
                .and_then(|level| level.parse().ok())
                .unwrap_or(defaults.log_level),
            tile_cache: read(TILE_CACHE_VAR).map(PathBuf::from),
            ..defaults
        }
    }

    pub fn with_data_path(mut self, data_path: impl Into<PathBuf>) -> Self {
        self.data_path = data_path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = MapConfig::from_lookup(|_| None);

        assert_eq!(config, MapConfig::default());
        assert_eq!(config.initial_center.lon(), INITIAL_LON);
        assert_eq!(config.initial_center.lat(), INITIAL_LAT);
        assert_eq!(config.initial_zoom, 16.);
    }

    #[test]
    fn test_values_from_environment() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("MAPBOX_ACCESS_TOKEN", " pk.test-token "),
            ("QUAKE_MAP_DATA", "data/points.csv"),
            ("QUAKE_MAP_LOG_LEVEL", "debug"),
            ("QUAKE_MAP_TILE_CACHE", ""),
        ]);
        let config = MapConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.access_token.as_deref(), Some("pk.test-token"));
        assert_eq!(config.data_path, PathBuf::from("data/points.csv"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.tile_cache, None);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_data_path_override() {
        let config = MapConfig::default().with_data_path("quakes.geojson");
        assert_eq!(config.data_path, PathBuf::from("quakes.geojson"));
    }
}
