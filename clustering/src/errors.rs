use std::fmt::{self, Display};

/// Enum representing the possible errors that can occur within the `ClusterIndex` struct.
///
/// The possible errors are:
///
/// - `ClusterNotFound`: the cluster id does not match any cluster in the index.
/// - `InvalidZoom`: the requested zoom level is outside the range the index was built for.
#[derive(Debug, PartialEq)]
pub enum ClusterError {
    ClusterNotFound(u64),
    InvalidZoom(f64),
}

impl Display for ClusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterError::ClusterNotFound(id) => write!(
                f,
                "[ClusterNotFound]: No cluster with id {} exists in the index",
                id
            ),
            ClusterError::InvalidZoom(zoom) => {
                write!(f, "[InvalidZoom]: Zoom level {} cannot be queried", zoom)
            }
        }
    }
}

impl std::error::Error for ClusterError {}
