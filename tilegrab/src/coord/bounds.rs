//! Geographic bounds of a tile, for templating per-tile requests.

use super::types::{BoundingBox, TileId};
use super::unproject;

/// Returns the geographic bounding box of a tile.
///
/// The northwest corner `(x, y)` gives `left`/`top` and the southeast
/// corner `(x + 1, y + 1)` gives `right`/`bottom`.
pub fn tile_bounds(tile: &TileId) -> BoundingBox {
    let x = f64::from(tile.x);
    let y = f64::from(tile.y);

    let nw = unproject(x, y, tile.z);
    let se = unproject(x + 1.0, y + 1.0, tile.z);

    BoundingBox {
        left: nw.lng,
        bottom: se.lat,
        right: se.lng,
        top: nw.lat,
    }
}

/// Formats a box as `left,bottom,right,top` with nine decimals each.
///
/// Nine decimals is roughly 0.1 mm at the equator, which is stable across
/// platforms for WMS `BBOX` parameters.
pub fn format_bbox(bbox: &BoundingBox) -> String {
    format!(
        "{:.9},{:.9},{:.9},{:.9}",
        bbox.left, bbox.bottom, bbox.right, bbox.top
    )
}

/// Shorthand for `format_bbox(&tile_bounds(tile))`.
pub fn format_tile_bbox(tile: &TileId) -> String {
    format_bbox(&tile_bounds(tile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_zero_covers_world() {
        let bbox = tile_bounds(&TileId { x: 0, y: 0, z: 0 });

        assert!((bbox.left - -180.0).abs() < 1e-9);
        assert!((bbox.right - 180.0).abs() < 1e-9);
        assert!((bbox.top - 85.0511287798).abs() < 1e-9);
        assert!((bbox.bottom - -85.0511287798).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_one_quadrants() {
        let nw = tile_bounds(&TileId { x: 0, y: 0, z: 1 });
        assert!((nw.left - -180.0).abs() < 1e-9);
        assert!(nw.right.abs() < 1e-9);
        assert!(nw.bottom.abs() < 1e-9);

        let se = tile_bounds(&TileId { x: 1, y: 1, z: 1 });
        assert!(se.left.abs() < 1e-9);
        assert!((se.right - 180.0).abs() < 1e-9);
        assert!(se.top.abs() < 1e-9);
    }

    #[test]
    fn test_adjacent_tiles_share_edges() {
        let a = tile_bounds(&TileId { x: 10, y: 20, z: 6 });
        let right = tile_bounds(&TileId { x: 11, y: 20, z: 6 });
        let below = tile_bounds(&TileId { x: 10, y: 21, z: 6 });

        assert_eq!(a.right, right.left);
        assert_eq!(a.bottom, below.top);
    }

    #[test]
    fn test_format_bbox_nine_decimals() {
        let bbox = BoundingBox {
            left: -180.0,
            bottom: 0.0,
            right: 0.0,
            top: 85.0511287798066,
        };
        assert_eq!(
            format_bbox(&bbox),
            "-180.000000000,0.000000000,0.000000000,85.051128780"
        );
    }

    #[test]
    fn test_format_tile_bbox_known_tile() {
        // z=1 south-east quadrant
        let text = format_tile_bbox(&TileId { x: 1, y: 1, z: 1 });
        assert_eq!(text, "0.000000000,-85.051128780,180.000000000,0.000000000");
    }
}
