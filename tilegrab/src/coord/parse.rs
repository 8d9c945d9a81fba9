//! Validated construction of bounding boxes and zoom sets from text.

use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use thiserror::Error;

use super::types::{BoundingBox, CoordError, ZoomSet};

/// Errors from parsing command-line style coordinate text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Wrong number of comma-separated values
    #[error("Expected {expected} comma-separated values, got {actual} in '{input}'")]
    WrongArity {
        input: String,
        expected: usize,
        actual: usize,
    },

    /// A bounding box value is not a decimal number
    #[error("Invalid number '{value}': {source}")]
    InvalidNumber {
        value: String,
        source: ParseFloatError,
    },

    /// A zoom value is not an integer
    #[error("Invalid zoom '{value}': {source}")]
    InvalidInteger {
        value: String,
        source: ParseIntError,
    },

    /// The values parsed but violate a coordinate invariant
    #[error(transparent)]
    Coord(#[from] CoordError),
}

/// Parses `left,bottom,right,top` into a validated [`BoundingBox`].
///
/// Whitespace around each value is ignored.
pub fn parse_bounding_box(input: &str) -> Result<BoundingBox, ParseError> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(ParseError::WrongArity {
            input: input.to_string(),
            expected: 4,
            actual: parts.len(),
        });
    }

    let mut values = [0.0_f64; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|source| ParseError::InvalidNumber {
            value: part.to_string(),
            source,
        })?;
    }

    let [left, bottom, right, top] = values;
    Ok(BoundingBox::new(left, bottom, right, top)?)
}

/// Parses a comma-separated zoom list such as `10,11,12`.
pub fn parse_zooms(input: &str) -> Result<ZoomSet, ParseError> {
    let levels = input
        .split(',')
        .map(str::trim)
        .map(|part| {
            part.parse::<i64>()
                .map_err(|source| ParseError::InvalidInteger {
                    value: part.to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ZoomSet::new(levels)?)
}

impl FromStr for BoundingBox {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bounding_box(s)
    }
}

impl FromStr for ZoomSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_zooms(s)
    }
}
