//! Declarative styling of the earthquake source: clustering options and the
//! look of the cluster, cluster count and unclustered point layers.

use clustering::ClusterOptions;
use egui::Color32;

/// Cluster radius, in pixels.
pub const CLUSTER_RADIUS: f64 = 50.0;
/// Last zoom at which points are clustered.
pub const CLUSTER_MAX_ZOOM: u8 = 16;
/// Tile size the cluster radius is measured against.
const TILE_EXTENT: f64 = 256.0;

/// Circle used to draw a cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterSymbol {
    pub color: Color32,
    pub radius: f32,
}

/// Point-count thresholds and the symbol used from each threshold upwards.
const CLUSTER_STEPS: [(usize, ClusterSymbol); 3] = [
    (
        0,
        ClusterSymbol {
            color: Color32::from_rgb(0x51, 0xbb, 0xd6),
            radius: 20.0,
        },
    ),
    (
        100,
        ClusterSymbol {
            color: Color32::from_rgb(0xf1, 0xf0, 0x75),
            radius: 30.0,
        },
    ),
    (
        750,
        ClusterSymbol {
            color: Color32::from_rgb(0xf2, 0x8c, 0xb1),
            radius: 40.0,
        },
    ),
];

pub const CLUSTER_COUNT_FONT_SIZE: f32 = 12.0;
pub const CLUSTER_COUNT_COLOR: Color32 = Color32::BLACK;

pub const POINT_COLOR: Color32 = Color32::from_rgb(0x11, 0xb4, 0xda);
pub const POINT_RADIUS: f32 = 6.0;
pub const POINT_STROKE_WIDTH: f32 = 1.0;
pub const POINT_STROKE_COLOR: Color32 = Color32::WHITE;

/// Size tier of a cluster symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterTier {
    Small,
    Medium,
    Large,
}

impl ClusterTier {
    pub fn for_count(point_count: usize) -> Self {
        match point_count {
            count if count >= CLUSTER_STEPS[2].0 => ClusterTier::Large,
            count if count >= CLUSTER_STEPS[1].0 => ClusterTier::Medium,
            _ => ClusterTier::Small,
        }
    }

    pub fn symbol(self) -> ClusterSymbol {
        match self {
            ClusterTier::Small => CLUSTER_STEPS[0].1,
            ClusterTier::Medium => CLUSTER_STEPS[1].1,
            ClusterTier::Large => CLUSTER_STEPS[2].1,
        }
    }
}

pub fn cluster_symbol(point_count: usize) -> ClusterSymbol {
    ClusterTier::for_count(point_count).symbol()
}

/// Options the earthquake source is clustered with.
pub fn cluster_options() -> ClusterOptions {
    ClusterOptions {
        radius: CLUSTER_RADIUS,
        extent: TILE_EXTENT,
        min_zoom: 0,
        max_zoom: CLUSTER_MAX_ZOOM,
        min_points: 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(ClusterTier::for_count(2), ClusterTier::Small);
        assert_eq!(ClusterTier::for_count(99), ClusterTier::Small);
        assert_eq!(ClusterTier::for_count(100), ClusterTier::Medium);
        assert_eq!(ClusterTier::for_count(749), ClusterTier::Medium);
        assert_eq!(ClusterTier::for_count(750), ClusterTier::Large);
        assert_eq!(ClusterTier::for_count(20_000), ClusterTier::Large);
    }

    #[test]
    fn test_tier_symbols() {
        assert_eq!(
            cluster_symbol(10),
            ClusterSymbol {
                color: Color32::from_rgb(0x51, 0xbb, 0xd6),
                radius: 20.0
            }
        );
        assert_eq!(cluster_symbol(300).radius, 30.0);
        assert_eq!(cluster_symbol(300).color, Color32::from_rgb(0xf1, 0xf0, 0x75));
        assert_eq!(cluster_symbol(800).radius, 40.0);
        assert_eq!(cluster_symbol(800).color, Color32::from_rgb(0xf2, 0x8c, 0xb1));
    }

    #[test]
    fn test_cluster_options() {
        let options = cluster_options();
        assert_eq!(options.radius, 50.0);
        assert_eq!(options.max_zoom, 16);
    }
}
