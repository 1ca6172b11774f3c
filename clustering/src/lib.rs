use errors::ClusterError;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;
pub mod errors;

/// Highest zoom the cluster id encoding can represent (five bits, one level kept for points).
const MAX_SUPPORTED_ZOOM: u8 = 30;

/// Identifier of a cluster inside a `ClusterIndex`.
///
/// The lower five bits hold the zoom level the cluster was formed at and the
/// remaining bits its position inside that level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterId(u64);

impl ClusterId {
    fn new(zoom: u8, index: usize) -> Self {
        ClusterId(((index as u64) << 5) | zoom as u64)
    }

    /// Zoom level at which the cluster was formed.
    pub fn zoom(&self) -> u8 {
        (self.0 & 0x1f) as u8
    }

    fn index(&self) -> usize {
        (self.0 >> 5) as usize
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ClusterId {
    fn from(raw: u64) -> Self {
        ClusterId(raw)
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters used to build a `ClusterIndex`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterOptions {
    /// Cluster radius in pixels.
    pub radius: f64,
    /// Tile size in pixels the radius is measured against.
    pub extent: f64,
    pub min_zoom: u8,
    /// Last zoom level at which points are clustered.
    pub max_zoom: u8,
    /// Minimum number of points needed to form a cluster.
    pub min_points: usize,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            radius: 40.0,
            extent: 256.0,
            min_zoom: 0,
            max_zoom: 16,
            min_points: 2,
        }
    }
}

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// A box covering the whole world.
    pub fn world() -> Self {
        Self::new(-180.0, -90.0, 180.0, 90.0)
    }
}

/// What a feature returned by the index represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureKind {
    Cluster { id: ClusterId, point_count: usize },
    /// An individual input point, identified by its position in the input slice.
    Point { index: usize },
}

/// A cluster or point as rendered at a given zoom level.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterFeature {
    pub lon: f64,
    pub lat: f64,
    pub kind: FeatureKind,
}

impl ClusterFeature {
    pub fn cluster_id(&self) -> Option<ClusterId> {
        match self.kind {
            FeatureKind::Cluster { id, .. } => Some(id),
            FeatureKind::Point { .. } => None,
        }
    }

    pub fn is_cluster(&self) -> bool {
        self.cluster_id().is_some()
    }

    /// Number of input points behind this feature, `1` for individual points.
    pub fn point_count(&self) -> usize {
        match self.kind {
            FeatureKind::Cluster { point_count, .. } => point_count,
            FeatureKind::Point { .. } => 1,
        }
    }
}

/// Formats a point count the way cluster labels display it (`1.2k`, `12k`).
pub fn abbreviate_count(count: usize) -> String {
    if count >= 10_000 {
        format!("{}k", (count as f64 / 1000.0).round())
    } else if count >= 1000 {
        format!("{}k", (count as f64 / 100.0).round() / 10.0)
    } else {
        count.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum NodeKind {
    Point(usize),
    Cluster(ClusterId),
}

#[derive(Debug, Clone)]
struct Node {
    x: f64,
    y: f64,
    num_points: usize,
    kind: NodeKind,
    parent: Option<ClusterId>,
}

impl Node {
    /// Copy of the node carried unchanged into the next coarser level.
    fn promoted(&self) -> Node {
        Node {
            parent: None,
            ..self.clone()
        }
    }

    fn to_feature(&self) -> ClusterFeature {
        let kind = match self.kind {
            NodeKind::Point(index) => FeatureKind::Point { index },
            NodeKind::Cluster(id) => FeatureKind::Cluster {
                id,
                point_count: self.num_points,
            },
        };
        ClusterFeature {
            lon: x_lon(self.x),
            lat: y_lat(self.y),
            kind,
        }
    }
}

/// Hierarchical point clustering index.
///
/// Every zoom level between `min_zoom` and `max_zoom` holds the clusters and
/// unclustered points visible at that zoom; the level right above `max_zoom`
/// holds the raw input points.
#[derive(Clone)]
pub struct ClusterIndex {
    options: ClusterOptions,
    levels: Vec<Vec<Node>>,
    point_count: usize,
}

impl ClusterIndex {
    /// Builds the index for the given `(longitude, latitude)` positions.
    ///
    /// # Parameters
    /// - `options`: Clustering radius, extent and zoom range.
    /// - `positions`: Input points; their slice position is the index reported by `FeatureKind::Point`.
    ///
    /// # Returns
    /// * `Result<ClusterIndex, ClusterError>` - The index, or `ClusterError::InvalidZoom` if the
    ///   zoom range is empty or exceeds what cluster ids can encode.
    pub fn new(options: ClusterOptions, positions: &[(f64, f64)]) -> Result<Self, ClusterError> {
        if options.max_zoom > MAX_SUPPORTED_ZOOM {
            return Err(ClusterError::InvalidZoom(options.max_zoom as f64));
        }
        if options.min_zoom > options.max_zoom {
            return Err(ClusterError::InvalidZoom(options.min_zoom as f64));
        }

        let top = options.max_zoom as usize + 1;
        let mut levels = vec![Vec::new(); top + 1];
        levels[top] = positions
            .iter()
            .enumerate()
            .map(|(index, &(lon, lat))| Node {
                x: lon_x(wrap_longitude(lon)),
                y: lat_y(lat),
                num_points: 1,
                kind: NodeKind::Point(index),
                parent: None,
            })
            .collect();

        for zoom in (options.min_zoom..=options.max_zoom).rev() {
            let level = zoom as usize;
            let clusters = cluster_level(&mut levels[level + 1], zoom, &options);
            levels[level] = clusters;
        }

        Ok(Self {
            options,
            levels,
            point_count: positions.len(),
        })
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Number of input points.
    pub fn len(&self) -> usize {
        self.point_count
    }

    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }

    /// Returns the clusters and points visible inside `bbox` at `zoom`.
    ///
    /// Boxes crossing the antimeridian are split in two; boxes spanning 360 degrees
    /// or more return every feature of the level.
    ///
    /// # Errors
    /// - `ClusterError::InvalidZoom` - If `zoom` is not a finite number.
    pub fn get_clusters(
        &self,
        bbox: &BoundingBox,
        zoom: f64,
    ) -> Result<Vec<ClusterFeature>, ClusterError> {
        if !zoom.is_finite() {
            return Err(ClusterError::InvalidZoom(zoom));
        }

        let south = bbox.south.clamp(-90.0, 90.0);
        let north = bbox.north.clamp(-90.0, 90.0);

        let (west, east) = if bbox.east - bbox.west >= 360.0 {
            (-180.0, 180.0)
        } else {
            let west = wrap_longitude(bbox.west);
            let east = if bbox.east == 180.0 {
                180.0
            } else {
                wrap_longitude(bbox.east)
            };
            if west > east {
                let mut eastern =
                    self.get_clusters(&BoundingBox::new(west, south, 180.0, north), zoom)?;
                let western =
                    self.get_clusters(&BoundingBox::new(-180.0, south, east, north), zoom)?;
                eastern.extend(western);
                return Ok(eastern);
            }
            (west, east)
        };

        let (min_x, max_x) = (lon_x(west), lon_x(east));
        let (min_y, max_y) = (lat_y(north), lat_y(south));

        Ok(self.levels[self.level_for(zoom)]
            .iter()
            .filter(|node| {
                node.x >= min_x && node.x <= max_x && node.y >= min_y && node.y <= max_y
            })
            .map(Node::to_feature)
            .collect())
    }

    /// Returns the clusters and points a cluster splits into one zoom level further in.
    ///
    /// # Errors
    /// - `ClusterError::ClusterNotFound` - If `id` does not belong to a cluster of this index.
    pub fn get_children(&self, id: ClusterId) -> Result<Vec<ClusterFeature>, ClusterError> {
        let level = id.zoom() as usize;
        let origin = self.levels.get(level).and_then(|nodes| nodes.get(id.index()));
        match origin {
            Some(node) if node.kind == NodeKind::Cluster(id) => {}
            _ => return Err(ClusterError::ClusterNotFound(id.as_u64())),
        }

        let children: Vec<ClusterFeature> = self.levels[level + 1]
            .iter()
            .filter(|node| node.parent == Some(id))
            .map(Node::to_feature)
            .collect();

        if children.is_empty() {
            Err(ClusterError::ClusterNotFound(id.as_u64()))
        } else {
            Ok(children)
        }
    }

    /// Returns the zoom level at which the cluster breaks apart into several features.
    ///
    /// # Errors
    /// - `ClusterError::ClusterNotFound` - If `id` does not belong to a cluster of this index.
    pub fn get_cluster_expansion_zoom(&self, id: ClusterId) -> Result<u8, ClusterError> {
        let mut current = id;
        loop {
            let children = self.get_children(current)?;
            let expansion_zoom = current.zoom() + 1;
            match children.as_slice() {
                [only] if expansion_zoom <= self.options.max_zoom => match only.cluster_id() {
                    Some(next) => current = next,
                    None => return Ok(expansion_zoom),
                },
                _ => return Ok(expansion_zoom),
            }
        }
    }

    fn level_for(&self, zoom: f64) -> usize {
        let min = self.options.min_zoom as f64;
        let max = self.options.max_zoom as f64 + 1.0;
        zoom.floor().clamp(min, max) as usize
    }
}

impl fmt::Debug for ClusterIndex {
    /// Summarizes the index as its point count and zoom range, e.g. `"12 points, zoom 0..=16"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} points, zoom {}..={}",
            self.point_count, self.options.min_zoom, self.options.max_zoom
        )
    }
}

/// Merges the nodes of one level into the clusters of the next coarser `zoom` level.
///
/// Every merged node gets its `parent` set to the id of the cluster it was merged into.
fn cluster_level(nodes: &mut [Node], zoom: u8, options: &ClusterOptions) -> Vec<Node> {
    let radius = options.radius / (options.extent * 2f64.powi(zoom as i32));
    let grid = SpatialGrid::new(nodes, radius);
    let mut visited = vec![false; nodes.len()];
    let mut clusters = Vec::new();

    for i in 0..nodes.len() {
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let neighbors: Vec<usize> = grid
            .within(nodes, nodes[i].x, nodes[i].y, radius)
            .into_iter()
            .filter(|&j| !visited[j])
            .collect();
        for &j in &neighbors {
            visited[j] = true;
        }

        let num_points = nodes[i].num_points
            + neighbors
                .iter()
                .map(|&j| nodes[j].num_points)
                .sum::<usize>();

        if !neighbors.is_empty() && num_points >= options.min_points {
            let id = ClusterId::new(zoom, clusters.len());
            let mut weighted_x = 0.0;
            let mut weighted_y = 0.0;
            for &j in neighbors.iter().chain(std::iter::once(&i)) {
                let weight = nodes[j].num_points as f64;
                weighted_x += nodes[j].x * weight;
                weighted_y += nodes[j].y * weight;
                nodes[j].parent = Some(id);
            }
            clusters.push(Node {
                x: weighted_x / num_points as f64,
                y: weighted_y / num_points as f64,
                num_points,
                kind: NodeKind::Cluster(id),
                parent: None,
            });
        } else {
            clusters.push(nodes[i].promoted());
            for &j in &neighbors {
                clusters.push(nodes[j].promoted());
            }
        }
    }

    clusters
}

/// Uniform grid over the projected unit square used for radius queries.
struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    fn new(nodes: &[Node], cell_size: f64) -> Self {
        let cell_size = cell_size.max(f64::EPSILON);
        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (index, node) in nodes.iter().enumerate() {
            cells
                .entry(Self::cell_of(node.x, node.y, cell_size))
                .or_default()
                .push(index);
        }
        Self { cell_size, cells }
    }

    fn cell_of(x: f64, y: f64, cell_size: f64) -> (i64, i64) {
        ((x / cell_size).floor() as i64, (y / cell_size).floor() as i64)
    }

    /// Indices of the nodes within `radius` of `(x, y)`, including a node sitting exactly there.
    fn within(&self, nodes: &[Node], x: f64, y: f64, radius: f64) -> Vec<usize> {
        let (cx, cy) = Self::cell_of(x, y, self.cell_size);
        let radius_sq = radius * radius;
        let mut found = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(indices) = self.cells.get(&(cx + dx, cy + dy)) {
                    for &index in indices {
                        let node = &nodes[index];
                        let distance_sq = (node.x - x).powi(2) + (node.y - y).powi(2);
                        if distance_sq <= radius_sq {
                            found.push(index);
                        }
                    }
                }
            }
        }
        found
    }
}

/// Brings a longitude into `[-180, 180)`.
pub fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        return lon;
    }
    ((lon + 180.0) % 360.0 + 360.0) % 360.0 - 180.0
}

fn lon_x(lon: f64) -> f64 {
    lon / 360.0 + 0.5
}

fn lat_y(lat: f64) -> f64 {
    let sin = (lat * PI / 180.0).sin();
    let y = 0.5 - 0.25 * ((1.0 + sin) / (1.0 - sin)).ln() / PI;
    y.clamp(0.0, 1.0)
}

fn x_lon(x: f64) -> f64 {
    (x - 0.5) * 360.0
}

fn y_lat(y: f64) -> f64 {
    let angle = (180.0 - y * 360.0) * PI / 180.0;
    360.0 * angle.exp().atan() / PI - 90.0
}
