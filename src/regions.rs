use crate::color::{matches, Color, DEFAULT_TOLERANCE};
use image::RgbaImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default minimum region size; regions must be strictly larger to survive.
pub const DEFAULT_MIN_SIZE: usize = 50;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Neighborhood used to grow a region.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Connectivity {
    /// Every pixel within one step on both axes, except the pixel itself.
    #[default]
    Eight,
    /// Left, right, up and down only.
    Four,
    /// Only neighbors whose x and y both differ from the current pixel.
    ///
    /// Reproduces a self-exclusion check that required both coordinates to
    /// differ and so also rejected the cardinal neighbors. Only useful for
    /// comparing against output produced that way.
    Diagonal,
}

impl Connectivity {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Eight => &[
                (-1, -1),
                (0, -1),
                (1, -1),
                (-1, 0),
                (1, 0),
                (-1, 1),
                (0, 1),
                (1, 1),
            ],
            Connectivity::Four => &[(0, -1), (-1, 0), (1, 0), (0, 1)],
            Connectivity::Diagonal => &[(-1, -1), (1, -1), (-1, 1), (1, 1)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentConfig {
    pub tolerance: u8,
    pub min_size: usize,
    #[serde(default)]
    pub connectivity: Connectivity,
}

impl SegmentConfig {
    pub fn new(tolerance: u8, min_size: usize) -> Self {
        Self {
            tolerance,
            min_size,
            connectivity: Connectivity::Eight,
        }
    }

    /// Strict: near-exact color, only sizeable blobs.
    pub fn strict() -> Self {
        Self::new(10, 100)
    }

    /// Loose: forgiving color match, small blobs allowed.
    pub fn loose() -> Self {
        Self::new(40, 20)
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MIN_SIZE)
    }
}

/// A connected set of pixels matching one target color.
///
/// The area is fixed when the region is built and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    id: usize,
    seed: Coordinate,
    area: usize,
    points: Vec<Coordinate>,
}

impl Region {
    pub fn new(id: usize, seed: Coordinate, points: Vec<Coordinate>) -> Self {
        Self {
            id,
            seed,
            area: points.len(),
            points,
        }
    }

    fn from_cells(id: usize, width: usize, cells: &[usize]) -> Self {
        let points = cells
            .iter()
            .map(|idx| Coordinate::new((idx % width) as u32, (idx / width) as u32))
            .collect::<Vec<_>>();
        Self::new(id, points[0], points)
    }

    /// Discovery index among all grown components, including discarded ones.
    pub fn id(&self) -> usize {
        self.id
    }

    /// First pixel of the region reached by the row-major scan.
    pub fn seed(&self) -> Coordinate {
        self.seed
    }

    pub fn area(&self) -> usize {
        self.area
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }
}

/// Find the regions of `raster` matching `target`, using 8-connectivity.
pub fn find_regions(
    raster: &RgbaImage,
    target: Color,
    tolerance: u8,
    min_size: usize,
) -> Vec<Region> {
    segment(raster, target, &SegmentConfig::new(tolerance, min_size))
}

/// Flood-fill every connected set of pixels matching `target`.
///
/// Regions are returned in the row-major order of their seed pixel. Components
/// with `min_size` pixels or fewer are dropped; their pixels stay claimed and
/// never seed or join another region.
pub fn segment(raster: &RgbaImage, target: Color, config: &SegmentConfig) -> Vec<Region> {
    let width = raster.width() as usize;
    let height = raster.height() as usize;
    let len = width * height;
    if len == 0 {
        return Vec::new();
    }

    let matching = match_mask(raster, target, config.tolerance);
    let offsets = config.connectivity.offsets();

    let mut visited = vec![false; len];
    let mut regions = Vec::<Region>::new();
    let mut queue = VecDeque::<usize>::new();
    let mut grown = 0usize;

    for start in 0..len {
        if visited[start] || !matching[start] {
            continue;
        }

        let raw_id = grown;
        grown += 1;
        visited[start] = true;
        queue.push_back(start);

        let mut cells = Vec::<usize>::new();
        while let Some(idx) = queue.pop_front() {
            cells.push(idx);

            let x = (idx % width) as i32;
            let y = (idx / width) as i32;
            for &(dx, dy) in offsets {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || nx >= width as i32 || ny < 0 || ny >= height as i32 {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if !visited[n] && matching[n] {
                    visited[n] = true;
                    queue.push_back(n);
                }
            }
        }

        if cells.len() <= config.min_size {
            log::debug!(
                "Discarding component {} at ({}, {}): {} px <= {}",
                raw_id,
                start % width,
                start / width,
                cells.len(),
                config.min_size
            );
            continue;
        }

        regions.push(Region::from_cells(raw_id, width, &cells));
    }

    log::debug!(
        "Segmented {}x{} raster for {}: {} components, {} kept",
        width,
        height,
        target,
        grown,
        regions.len()
    );

    regions
}

/// Segment several independent rasters in parallel; results keep input order.
pub fn segment_frames(
    frames: &[RgbaImage],
    target: Color,
    config: &SegmentConfig,
) -> Vec<Vec<Region>> {
    frames
        .par_iter()
        .map(|frame| segment(frame, target, config))
        .collect()
}

/// The region with the most pixels; the earliest one wins a tie.
pub fn largest(regions: &[Region]) -> Option<&Region> {
    let mut iter = regions.iter();
    let mut best = iter.next()?;
    for region in iter {
        if region.area > best.area {
            best = region;
        }
    }
    Some(best)
}

fn match_mask(raster: &RgbaImage, target: Color, tolerance: u8) -> Vec<bool> {
    raster
        .as_raw()
        .par_chunks_exact(4)
        .map(|p| matches(Color::new(p[0], p[1], p[2]), target, tolerance))
        .collect()
}
