//! Tile enumeration over a bounding box.
//!
//! For each zoom level the box is projected to an inclusive rectangle of
//! tile indices ([`TileRange`]); [`Tiles`] then walks those rectangles
//! lazily, zoom-ascending and row-major within a zoom.

use tracing::debug;

use super::project;
use super::types::{tiles_per_axis, BoundingBox, CoordError, TileId, ZoomSet};

/// Inclusive rectangle of tile indices at a single zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub zoom: u8,
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

impl TileRange {
    /// Computes the tiles covering `bbox` at `zoom`.
    ///
    /// All four corners are projected. The box is half-open in projected
    /// space: an edge lying exactly on a tile boundary does not pull in the
    /// tile beyond it.
    pub fn covering(bbox: &BoundingBox, zoom: u8) -> Result<Self, CoordError> {
        bbox.validate()?;
        if zoom > super::MAX_ZOOM {
            return Err(CoordError::InvalidZoom(i64::from(zoom)));
        }

        let projected = bbox.corners().map(|corner| project(corner, zoom));
        let n = tiles_per_axis(zoom);

        let (x_min, x_max) = index_span(projected.map(|(fx, _)| fx), n);
        let (y_min, y_max) = index_span(projected.map(|(_, fy)| fy), n);

        Ok(Self {
            zoom,
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Number of tiles in the range.
    pub fn count(&self) -> u64 {
        self.width() * self.height()
    }

    pub fn width(&self) -> u64 {
        u64::from(self.x_max - self.x_min) + 1
    }

    pub fn height(&self) -> u64 {
        u64::from(self.y_max - self.y_min) + 1
    }

    pub fn contains(&self, tile: &TileId) -> bool {
        tile.z == self.zoom
            && (self.x_min..=self.x_max).contains(&tile.x)
            && (self.y_min..=self.y_max).contains(&tile.y)
    }

    /// Iterates the range in row-major order.
    pub fn iter(&self) -> TileRangeIter {
        TileRangeIter {
            range: *self,
            x: self.x_min,
            y: self.y_min,
            finished: false,
        }
    }
}

impl IntoIterator for TileRange {
    type Item = TileId;
    type IntoIter = TileRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Floor of the minimum and ceil-minus-one of the maximum, clamped to the grid.
fn index_span(values: [f64; 4], n: u64) -> (u32, u32) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let last = (n - 1) as f64;

    let lo = min.floor().clamp(0.0, last);
    let hi = (max.ceil() - 1.0).clamp(0.0, last);

    // A box flattened by latitude clamping has min == max on a tile edge;
    // it still touches the tile at `lo`.
    let hi = hi.max(lo);

    (lo as u32, hi as u32)
}

/// Row-major iterator over a [`TileRange`].
#[derive(Debug, Clone)]
pub struct TileRangeIter {
    range: TileRange,
    x: u32,
    y: u32,
    finished: bool,
}

impl TileRangeIter {
    /// Tiles not yet yielded.
    pub fn remaining(&self) -> u64 {
        if self.finished {
            return 0;
        }
        let full_rows = u64::from(self.range.y_max - self.y);
        full_rows * self.range.width() + u64::from(self.range.x_max - self.x) + 1
    }
}

impl Iterator for TileRangeIter {
    type Item = TileId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let tile = TileId {
            x: self.x,
            y: self.y,
            z: self.range.zoom,
        };

        if self.x < self.range.x_max {
            self.x += 1;
        } else if self.y < self.range.y_max {
            self.x = self.range.x_min;
            self.y += 1;
        } else {
            self.finished = true;
        }

        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Lazy sequence of every tile covering a bounding box across a zoom set.
///
/// Finite and restartable: cloning yields an independent cursor, and calling
/// [`tiles`] again with the same inputs produces the same sequence.
#[derive(Debug, Clone)]
pub struct Tiles {
    ranges: Vec<TileRange>,
    next_range: usize,
    current: Option<TileRangeIter>,
}

impl Tiles {
    /// Per-zoom ranges, in iteration order.
    pub fn ranges(&self) -> &[TileRange] {
        &self.ranges
    }

    /// Tiles not yet yielded.
    pub fn total(&self) -> u64 {
        let current = self.current.as_ref().map_or(0, TileRangeIter::remaining);
        let pending: u64 = self.ranges[self.next_range..]
            .iter()
            .map(TileRange::count)
            .sum();
        current + pending
    }
}

impl Iterator for Tiles {
    type Item = TileId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tile) = self.current.as_mut().and_then(Iterator::next) {
                return Some(tile);
            }
            let range = self.ranges.get(self.next_range)?;
            self.current = Some(range.iter());
            self.next_range += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.total()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl std::iter::FusedIterator for Tiles {}

/// Enumerates every tile intersecting `bbox` at each zoom in `zooms`.
///
/// The box is validated and every range computed before anything is
/// returned, so a failing call never yields a partial sequence.
///
/// # Errors
///
/// * [`CoordError::InvalidCoordinate`] - a box edge is NaN or infinite
/// * [`CoordError::InvalidBoundingBox`] - the box is degenerate, inverted
///   (including antimeridian-crossing) or outside geographic range
pub fn tiles(bbox: &BoundingBox, zooms: &ZoomSet) -> Result<Tiles, CoordError> {
    bbox.validate()?;

    let ranges = zooms
        .levels()
        .iter()
        .map(|&zoom| TileRange::covering(bbox, zoom))
        .collect::<Result<Vec<_>, _>>()?;

    for range in &ranges {
        debug!(
            zoom = range.zoom,
            x_min = range.x_min,
            x_max = range.x_max,
            y_min = range.y_min,
            y_max = range.y_max,
            count = range.count(),
            "Computed tile range"
        );
    }

    Ok(Tiles {
        ranges,
        next_range: 0,
        current: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zooms(levels: &[u8]) -> ZoomSet {
        ZoomSet::new(levels.iter().copied()).unwrap()
    }

    #[test]
    fn test_range_iter_row_major() {
        let range = TileRange {
            zoom: 3,
            x_min: 2,
            x_max: 3,
            y_min: 5,
            y_max: 6,
        };

        let ids: Vec<(u32, u32)> = range.iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(ids, vec![(2, 5), (3, 5), (2, 6), (3, 6)]);
    }

    #[test]
    fn test_range_iter_single_tile() {
        let range = TileRange {
            zoom: 0,
            x_min: 0,
            x_max: 0,
            y_min: 0,
            y_max: 0,
        };

        let mut iter = range.iter();
        assert_eq!(iter.remaining(), 1);
        assert_eq!(iter.next(), Some(TileId { x: 0, y: 0, z: 0 }));
        assert_eq!(iter.remaining(), 0);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_range_remaining_tracks_progress() {
        let range = TileRange {
            zoom: 4,
            x_min: 1,
            x_max: 3,
            y_min: 0,
            y_max: 2,
        };
        let mut iter = range.iter();
        assert_eq!(iter.remaining(), 9);

        iter.next();
        iter.next();
        iter.next();
        iter.next();
        assert_eq!(iter.remaining(), 5);
        assert_eq!(iter.count(), 5);
    }

    #[test]
    fn test_tiles_total_decreases_as_consumed() {
        let bbox = BoundingBox::world();
        let mut all = tiles(&bbox, &zooms(&[0, 1, 2])).unwrap();
        assert_eq!(all.total(), 1 + 4 + 16);

        all.next();
        assert_eq!(all.total(), 20);

        let rest: Vec<_> = all.by_ref().collect();
        assert_eq!(rest.len(), 20);
        assert_eq!(all.total(), 0);
        assert_eq!(all.next(), None);
    }

    #[test]
    fn test_size_hint_is_exact() {
        let bbox = BoundingBox::new(-10.0, -10.0, 10.0, 10.0).unwrap();
        let all = tiles(&bbox, &zooms(&[3, 5])).unwrap();
        let (lo, hi) = all.size_hint();
        let n = all.clone().count();
        assert_eq!(lo, n);
        assert_eq!(hi, Some(n));
    }

    #[test]
    fn test_range_contains() {
        let bbox = BoundingBox::new(0.0, 0.0, 45.0, 45.0).unwrap();
        let range = TileRange::covering(&bbox, 2).unwrap();

        for tile in range.iter() {
            assert!(range.contains(&tile));
        }
        assert!(!range.contains(&TileId { x: 0, y: 0, z: 2 }));
        assert!(!range.contains(&TileId { x: 2, y: 1, z: 3 }));
    }

    #[test]
    fn test_empty_zoom_set_yields_nothing() {
        let bbox = BoundingBox::world();
        let all = tiles(&bbox, &ZoomSet::default()).unwrap();
        assert_eq!(all.total(), 0);
        assert_eq!(all.count(), 0);
    }

    #[test]
    fn test_index_span_collapsed_range() {
        // min == max on a boundary would give hi < lo without widening
        assert_eq!(index_span([0.0; 4], 4), (0, 0));
        assert_eq!(index_span([2.0; 4], 4), (2, 2));
    }

    #[test]
    fn test_index_span_clamps_to_grid() {
        assert_eq!(index_span([-0.5, -0.5, 9.0, 9.0], 8), (0, 7));
    }
}
