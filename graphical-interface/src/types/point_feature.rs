use walkers::Position;

/// Represents an earthquake record loaded from the static data file.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    pub id: String,
    pub position: Position,
    pub magnitude: Option<f64>,
    pub tsunami: bool,
}

impl PointFeature {
    pub fn new(id: String, position: Position, magnitude: Option<f64>, tsunami: bool) -> Self {
        Self {
            id,
            position,
            magnitude,
            tsunami,
        }
    }

    pub fn tsunami_label(&self) -> &'static str {
        if self.tsunami {
            "yes"
        } else {
            "no"
        }
    }

    pub fn magnitude_label(&self) -> String {
        match self.magnitude {
            Some(magnitude) => magnitude.to_string(),
            None => String::from("unknown"),
        }
    }
}
