use std::fmt::{self, Display};

use walkers::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Longitude,
    Latitude,
}

impl Axis {
    fn limit(self) -> f64 {
        match self {
            Axis::Longitude => 180.0,
            Axis::Latitude => 90.0,
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Longitude => write!(f, "Longitude"),
            Axis::Latitude => write!(f, "Latitude"),
        }
    }
}

/// Reasons typed coordinates are rejected before any marker is placed.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateError {
    Empty(Axis),
    NotANumber { axis: Axis, input: String },
    NotFinite(Axis),
    OutOfRange { axis: Axis, value: f64 },
}

impl Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::Empty(axis) => write!(f, "{} is required.", axis),
            CoordinateError::NotANumber { axis, input } => {
                write!(f, "{} must be a number, got \"{}\".", axis, input)
            }
            CoordinateError::NotFinite(axis) => write!(f, "{} must be a finite number.", axis),
            CoordinateError::OutOfRange { axis, value } => write!(
                f,
                "{} must be between -{} and {}, got {}.",
                axis,
                axis.limit(),
                axis.limit(),
                value
            ),
        }
    }
}

impl std::error::Error for CoordinateError {}

/// A validated longitude/latitude pair typed by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePair {
    pub longitude: f64,
    pub latitude: f64,
}

impl CoordinatePair {
    /// Parses the raw text of both form fields. The longitude is checked first.
    pub fn parse(longitude: &str, latitude: &str) -> Result<Self, CoordinateError> {
        Ok(Self {
            longitude: parse_axis(Axis::Longitude, longitude)?,
            latitude: parse_axis(Axis::Latitude, latitude)?,
        })
    }

    pub fn to_position(self) -> Position {
        Position::from_lon_lat(self.longitude, self.latitude)
    }
}

fn parse_axis(axis: Axis, raw: &str) -> Result<f64, CoordinateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoordinateError::Empty(axis));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| CoordinateError::NotANumber {
            axis,
            input: trimmed.to_string(),
        })?;

    if !value.is_finite() {
        return Err(CoordinateError::NotFinite(axis));
    }
    if value.abs() > axis.limit() {
        return Err(CoordinateError::OutOfRange { axis, value });
    }

    Ok(value)
}

/// Shifts `lon` by whole turns until it lies within 180 degrees of `reference`,
/// so a popup opens over the copy of the world the user clicked on.
pub fn wrap_longitude_near(lon: f64, reference: f64) -> f64 {
    if !lon.is_finite() || !reference.is_finite() {
        return lon;
    }

    lon + ((reference - lon) / 360.0).round() * 360.0
}
