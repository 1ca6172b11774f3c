mod point_feature;
pub use point_feature::PointFeature;

mod coordinates;
pub use coordinates::{wrap_longitude_near, Axis, CoordinateError, CoordinatePair};

mod readout;
pub use readout::DragReadout;

mod marker;
pub use marker::{Marker, MarkerColor};

mod popup;
pub use popup::PopupInfo;

mod map_bounds;
pub use map_bounds::MapBounds;
