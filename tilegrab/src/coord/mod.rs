//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (longitude/latitude)
//! and Web Mercator tile coordinates, the enumeration of every tile covering
//! a bounding box, and the geographic bounds of individual tiles.

mod bounds;
mod enumerate;
mod parse;
mod types;


pub use bounds::{format_bbox, format_tile_bbox, tile_bounds};
pub use enumerate::{tiles, TileRange, TileRangeIter, Tiles};
pub use parse::{parse_bounding_box, parse_zooms, ParseError};
pub use types::{
    tiles_per_axis, BoundingBox, CoordError, GeoPoint, TileId, ZoomSet, MAX_LAT, MAX_LON,
    MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

fn check_zoom(zoom: u8) -> Result<(), CoordError> {
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(i64::from(zoom)));
    }
    Ok(())
}

/// Projected values within this fraction of the world width of a tile edge
/// are placed on the edge.
///
/// `unproject` followed by `project` drifts by a few ULP (under 1e-15 of the
/// world width at every zoom), enough to move `floor`/`ceil` across an edge.
const EDGE_TOLERANCE: f64 = 1e-12;

#[inline]
fn snap_to_edge(value: f64, n: f64) -> f64 {
    let edge = value.round();
    if (value - edge).abs() <= n * EDGE_TOLERANCE {
        edge
    } else {
        value
    }
}

/// Forward projection without input checks. Latitude is clamped, and values
/// a rounding error away from a tile edge are snapped onto it.
#[inline]
pub(crate) fn project(point: GeoPoint, zoom: u8) -> (f64, f64) {
    let n = tiles_per_axis(zoom) as f64;
    let lat = point.lat.clamp(MIN_LAT, MAX_LAT);

    let fx = (point.lng + 180.0) / 360.0 * n;

    // asinh(tan φ) == ln(tan φ + sec φ)
    let lat_rad = lat.to_radians();
    let fy = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n;

    (snap_to_edge(fx, n), snap_to_edge(fy, n))
}

/// Inverse projection without input checks.
#[inline]
pub(crate) fn unproject(fx: f64, fy: f64, zoom: u8) -> GeoPoint {
    let n = tiles_per_axis(zoom) as f64;

    let lng = fx / n * 360.0 - 180.0;
    let lat_rad = (PI * (1.0 - 2.0 * fy / n)).sinh().atan();

    GeoPoint::new(lng, lat_rad.to_degrees())
}

/// Converts a geographic point to fractional tile coordinates.
///
/// Latitude outside the Web Mercator range (±85.05112878°) is clamped to it
/// before projecting, so boxes reaching the poles still map onto the grid.
/// Longitude is used as given. A result within rounding error of a tile edge
/// is returned exactly on the edge, so the corners from
/// [`tile_bounds`] floor back to their own tile.
///
/// # Arguments
///
/// * `point` - Longitude/latitude in degrees
/// * `zoom` - Zoom level (0 to 30)
///
/// # Returns
///
/// `(fx, fy)` in tile units, where the integer part is the tile column/row.
#[inline]
pub fn lng_lat_to_tile_fraction(point: GeoPoint, zoom: u8) -> Result<(f64, f64), CoordError> {
    point.check_finite()?;
    check_zoom(zoom)?;
    Ok(project(point, zoom))
}

/// Converts fractional tile coordinates back to a geographic point.
///
/// Exact inverse of [`lng_lat_to_tile_fraction`].
#[inline]
pub fn tile_fraction_to_lng_lat(fx: f64, fy: f64, zoom: u8) -> Result<GeoPoint, CoordError> {
    for value in [fx, fy] {
        if !value.is_finite() {
            return Err(CoordError::InvalidCoordinate(value));
        }
    }
    check_zoom(zoom)?;
    Ok(unproject(fx, fy, zoom))
}

/// Returns the tile containing a point.
///
/// Longitude is normalized into `[-180, 180)` and latitude clamped, so any
/// finite point resolves to a tile on the grid.
pub fn tile_for_point(point: GeoPoint, zoom: u8) -> Result<TileId, CoordError> {
    point.check_finite()?;
    check_zoom(zoom)?;

    let (fx, fy) = project(point.normalized(), zoom);
    let max_index = (tiles_per_axis(zoom) - 1) as f64;

    Ok(TileId {
        x: fx.floor().clamp(0.0, max_index) as u32,
        y: fy.floor().clamp(0.0, max_index) as u32,
        z: zoom,
    })
}
