mod clusters;
mod markers;
mod popup;
pub use clusters::Clusters;
pub use markers::Markers;
pub use popup::FeaturePopup;
