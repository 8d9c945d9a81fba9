//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`download`] - Fetch every tile covering a bounding box
//! - [`list`] - Print the tiles covering a bounding box

pub mod common;
pub mod download;
pub mod list;
