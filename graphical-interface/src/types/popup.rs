use walkers::Position;

use super::PointFeature;

/// Details of a clicked point, anchored at the copy of the point nearest the click.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupInfo {
    pub position: Position,
    pub magnitude: String,
    pub account: String,
    pub tsunami: &'static str,
}

impl PopupInfo {
    pub fn new(feature: &PointFeature, position: Position) -> Self {
        Self {
            position,
            magnitude: feature.magnitude_label(),
            account: feature.id.clone(),
            tsunami: feature.tsunami_label(),
        }
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("magnitude: {}", self.magnitude),
            format!("Account Number: {}", self.account),
            format!("tsunami: {}", self.tsunami),
        ]
    }
}
