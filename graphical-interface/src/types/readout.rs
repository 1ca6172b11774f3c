use walkers::Position;

/// The two lines shown after the draggable marker has been dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct DragReadout([String; 2]);

impl DragReadout {
    pub fn from_position(position: Position) -> Self {
        Self([
            format!("Longitude: {}", position.lon()),
            format!("Latitude: {}", position.lat()),
        ])
    }

    pub fn lines(&self) -> &[String; 2] {
        &self.0
    }
}
