//! Coordinate type definitions

use std::fmt;

use thiserror::Error;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Supported zoom levels. 2^30 tiles per axis still fits a `u32`.
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 30;

/// Errors that can occur during coordinate conversion and tile enumeration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Bounding box is degenerate, inverted or out of geographic range
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Zoom level is negative or above the supported maximum
    #[error("Invalid zoom level: {0} (must be between {min} and {max})", min = MIN_ZOOM, max = MAX_ZOOM)]
    InvalidZoom(i64),

    /// Coordinate is NaN or infinite
    #[error("Invalid coordinate: {0} (must be a finite number)")]
    InvalidCoordinate(f64),
}

/// A geographic position in degrees.
///
/// Carries no invariant of its own; latitude is clamped and longitude is
/// normalized where the point is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Returns the point with longitude wrapped into `[-180, 180)`.
    pub fn normalized(&self) -> Self {
        let lng = (self.lng + 180.0).rem_euclid(360.0) - 180.0;
        Self { lng, lat: self.lat }
    }

    /// Returns the point with latitude clamped to the Web Mercator limit.
    pub fn clamped(&self) -> Self {
        Self {
            lng: self.lng,
            lat: self.lat.clamp(MIN_LAT, MAX_LAT),
        }
    }

    pub(crate) fn check_finite(&self) -> Result<(), CoordError> {
        for value in [self.lng, self.lat] {
            if !value.is_finite() {
                return Err(CoordError::InvalidCoordinate(value));
            }
        }
        Ok(())
    }
}

/// Axis-aligned geographic rectangle in degrees.
///
/// Well-formed boxes satisfy `left < right` and `bottom < top`. Boxes
/// crossing the antimeridian are not representable and must be split by
/// the caller.
///
/// Longitudes must lie in `[-180, 180]` and latitudes in `[-90, 90]`; values
/// outside are rejected with [`CoordError::InvalidBoundingBox`], never
/// normalized. Latitudes beyond the Web Mercator limit are accepted and
/// clamped when projected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl BoundingBox {
    /// Creates a validated bounding box.
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Result<Self, CoordError> {
        let bbox = Self {
            left,
            bottom,
            right,
            top,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// The whole Web Mercator world.
    pub fn world() -> Self {
        Self {
            left: MIN_LON,
            bottom: MIN_LAT,
            right: MAX_LON,
            top: MAX_LAT,
        }
    }

    /// Checks the box invariants.
    ///
    /// Fields are public, so the enumerator re-checks every box it is given
    /// rather than trusting construction.
    pub fn validate(&self) -> Result<(), CoordError> {
        for value in [self.left, self.bottom, self.right, self.top] {
            if !value.is_finite() {
                return Err(CoordError::InvalidCoordinate(value));
            }
        }

        for lng in [self.left, self.right] {
            if !(MIN_LON..=MAX_LON).contains(&lng) {
                return Err(CoordError::InvalidBoundingBox(format!(
                    "longitude {} outside [{}, {}]",
                    lng, MIN_LON, MAX_LON
                )));
            }
        }
        for lat in [self.bottom, self.top] {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(CoordError::InvalidBoundingBox(format!(
                    "latitude {} outside [-90, 90]",
                    lat
                )));
            }
        }

        if self.left >= self.right {
            return Err(CoordError::InvalidBoundingBox(format!(
                "left ({}) must be less than right ({}); antimeridian-crossing boxes must be split",
                self.left, self.right
            )));
        }
        if self.bottom >= self.top {
            return Err(CoordError::InvalidBoundingBox(format!(
                "bottom ({}) must be less than top ({})",
                self.bottom, self.top
            )));
        }

        Ok(())
    }

    /// The four corners: NW, NE, SW, SE.
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint::new(self.left, self.top),
            GeoPoint::new(self.right, self.top),
            GeoPoint::new(self.left, self.bottom),
            GeoPoint::new(self.right, self.bottom),
        ]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.bottom, self.right, self.top)
    }
}

/// Tile address in the Web Mercator / Slippy Map system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    /// Column (east-west), 0 at west
    pub x: u32,
    /// Row (north-south), 0 at north
    pub y: u32,
    /// Zoom level
    pub z: u8,
}

impl TileId {
    /// Creates a validated tile address.
    pub fn new(x: u32, y: u32, z: u8) -> Result<Self, CoordError> {
        if z > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(z as i64));
        }
        let n = tiles_per_axis(z);
        if u64::from(x) >= n || u64::from(y) >= n {
            return Err(CoordError::InvalidCoordinate(f64::from(x.max(y))));
        }
        Ok(Self { x, y, z })
    }

    /// Bing-style quadkey: one base-4 digit per zoom level, empty at zoom 0.
    pub fn quadkey(&self) -> String {
        (1..=self.z)
            .rev()
            .map(|level| {
                let mask = 1u32 << (level - 1);
                let mut digit = b'0';
                if self.x & mask != 0 {
                    digit += 1;
                }
                if self.y & mask != 0 {
                    digit += 2;
                }
                digit as char
            })
            .collect()
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Validated set of zoom levels, deduplicated and sorted ascending.
///
/// Supplied order is not preserved: enumeration always runs from the lowest
/// zoom to the highest, so `"12,10"` and `"10,12"` yield the same sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZoomSet {
    levels: Vec<u8>,
}

impl ZoomSet {
    /// Builds a zoom set from raw integers.
    ///
    /// Fails with [`CoordError::InvalidZoom`] on the first negative or
    /// too-large level.
    pub fn new<I>(levels: I) -> Result<Self, CoordError>
    where
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        let mut validated = Vec::new();
        for level in levels {
            let level = level.into();
            if !(i64::from(MIN_ZOOM)..=i64::from(MAX_ZOOM)).contains(&level) {
                return Err(CoordError::InvalidZoom(level));
            }
            validated.push(level as u8);
        }
        validated.sort_unstable();
        validated.dedup();
        Ok(Self { levels: validated })
    }

    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }
}

impl fmt::Display for ZoomSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.levels.iter().map(|z| z.to_string()).collect();
        write!(f, "{}", joined.join(","))
    }
}

/// Number of tiles along one axis at `zoom`.
#[inline]
pub fn tiles_per_axis(zoom: u8) -> u64 {
    1u64 << zoom
}
