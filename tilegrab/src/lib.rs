//! tilegrab - Slippy-map tile enumeration and downloading
//!
//! This library turns a geographic bounding box and a set of zoom levels into
//! the exact list of Web Mercator tiles covering it, and fetches those tiles
//! from a templated tile server into a `z/x/y` directory tree.
//!
//! # Example
//!
//! ```
//! use tilegrab::coord::{tiles, BoundingBox, ZoomSet};
//!
//! let bbox: BoundingBox = "19.79,49.97,20.22,50.13".parse().unwrap();
//! let zooms: ZoomSet = "10".parse().unwrap();
//!
//! let covering = tiles(&bbox, &zooms).unwrap();
//! assert_eq!(covering.total(), 4);
//! ```

pub mod config;
pub mod coord;
pub mod download;
pub mod logging;
pub mod provider;
pub mod store;
pub mod template;

/// Version of the tilegrab library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
