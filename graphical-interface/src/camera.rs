use std::time::{Duration, Instant};

use walkers::{MapMemory, Position};

use crate::errors::InterfaceError;

/// Duration of the animated move to an expanded cluster.
pub const EASE_DURATION_MS: u64 = 500;

/// The parts of the map view the controller moves around.
pub trait Camera {
    /// Current center, or `None` while the view still sits on its initial position.
    fn center(&self) -> Option<Position>;

    fn center_at(&mut self, position: Position);

    fn zoom(&self) -> f64;

    fn set_zoom(&mut self, zoom: f64) -> Result<(), InterfaceError>;
}

impl Camera for MapMemory {
    fn center(&self) -> Option<Position> {
        self.detached()
    }

    fn center_at(&mut self, position: Position) {
        MapMemory::center_at(self, position);
    }

    fn zoom(&self) -> f64 {
        MapMemory::zoom(self)
    }

    fn set_zoom(&mut self, zoom: f64) -> Result<(), InterfaceError> {
        MapMemory::set_zoom(self, zoom).map_err(|_| InterfaceError::InvalidZoom(zoom))
    }
}

/// An animated transition of the view towards a target center and zoom.
#[derive(Debug, Clone)]
pub struct EaseTo {
    from_center: Position,
    to_center: Position,
    from_zoom: f64,
    to_zoom: f64,
    started: Instant,
    duration: Duration,
}

impl EaseTo {
    pub fn new(
        from_center: Position,
        from_zoom: f64,
        to_center: Position,
        to_zoom: f64,
        started: Instant,
    ) -> Self {
        Self {
            from_center,
            to_center,
            from_zoom,
            to_zoom,
            started,
            duration: Duration::from_millis(EASE_DURATION_MS),
        }
    }

    pub fn target(&self) -> (Position, f64) {
        (self.to_center, self.to_zoom)
    }

    /// Returns the center and zoom at `now`, and whether the transition is over.
    pub fn sample(&self, now: Instant) -> (Position, f64, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return (self.to_center, self.to_zoom, true);
        }

        let t = ease_out_cubic(elapsed.as_secs_f64() / self.duration.as_secs_f64());
        let lerp = |from: f64, to: f64| from + (to - from) * t;
        let center = Position::from_lon_lat(
            lerp(self.from_center.lon(), self.to_center.lon()),
            lerp(self.from_center.lat(), self.to_center.lat()),
        );
        (center, lerp(self.from_zoom, self.to_zoom), false)
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(3)
}
