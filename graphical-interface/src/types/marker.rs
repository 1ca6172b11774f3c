use egui::Color32;
use walkers::Position;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerColor {
    Default,
    Orange,
}

impl MarkerColor {
    pub fn tint(self) -> Color32 {
        match self {
            MarkerColor::Default => Color32::from_rgb(0x31, 0x81, 0xbd),
            MarkerColor::Orange => Color32::from_rgb(0xff, 0xa5, 0x00),
        }
    }
}

/// A pin on the map. Only the initial marker can be dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Position,
    pub draggable: bool,
    pub color: MarkerColor,
}

impl Marker {
    pub fn draggable(position: Position) -> Self {
        Self {
            position,
            draggable: true,
            color: MarkerColor::Default,
        }
    }

    pub fn fixed(position: Position, color: MarkerColor) -> Self {
        Self {
            position,
            draggable: false,
            color,
        }
    }
}
