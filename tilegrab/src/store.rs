//! On-disk tile layout: `<root>/<z>/<x>/<y>.<ext>`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::trace;

use crate::coord::TileId;

/// Default file extension for saved tiles.
pub const DEFAULT_EXTENSION: &str = "png";

/// Errors writing tiles to disk.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to create the `<z>/<x>` directory
    #[error("Failed to create directory '{}': {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// Failed to write the tile file
    #[error("Failed to write tile '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Writes tiles into a `z/x/y` directory tree.
#[derive(Debug, Clone)]
pub struct TileStore {
    root: PathBuf,
    extension: String,
}

impl TileStore {
    /// Creates a store rooted at `root` using the default extension.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Sets the file extension. A leading dot is ignored.
    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Directory holding a tile: `<root>/<z>/<x>`.
    pub fn dir_for(&self, tile: &TileId) -> PathBuf {
        self.root.join(tile.z.to_string()).join(tile.x.to_string())
    }

    /// Full path of a tile: `<root>/<z>/<x>/<y>.<ext>`.
    pub fn path_for(&self, tile: &TileId) -> PathBuf {
        let name = if self.extension.is_empty() {
            tile.y.to_string()
        } else {
            format!("{}.{}", tile.y, self.extension)
        };
        self.dir_for(tile).join(name)
    }

    /// Writes `data` for `tile`, creating parent directories as needed.
    ///
    /// An existing file is overwritten.
    pub fn save(&self, tile: &TileId, data: &[u8]) -> Result<PathBuf, StoreError> {
        let dir = self.dir_for(tile);
        fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let path = self.path_for(tile);
        fs::write(&path, data).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        trace!(tile = %tile, path = %path.display(), bytes = data.len(), "Saved tile");
        Ok(path)
    }
}
