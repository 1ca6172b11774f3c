use clustering::BoundingBox;
use walkers::Position;

/// Represents the geographical boundaries of a map view, defined by minimum
/// and maximum latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl MapBounds {
    /// Builds the bounds spanned by two opposite corners of the view.
    pub fn from_corners(a: Position, b: Position) -> Self {
        Self {
            min_lat: a.lat().min(b.lat()),
            max_lat: a.lat().max(b.lat()),
            min_lon: a.lon().min(b.lon()),
            max_lon: a.lon().max(b.lon()),
        }
    }

    /// Checks whether a given position is within the map bounds.
    pub fn is_within_bounds(&self, pos: &Position) -> bool {
        pos.lat() >= self.min_lat
            && pos.lat() <= self.max_lat
            && pos.lon() >= self.min_lon
            && pos.lon() <= self.max_lon
    }

    pub fn to_bbox(&self) -> BoundingBox {
        BoundingBox::new(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}
