//! List command - print the tiles covering a bounding box.

use std::io::{self, BufWriter, Write};

use tilegrab::coord::{format_tile_bbox, TileId};

use super::common::enumerate_area;
use crate::error::CliError;

/// Arguments for the list command.
pub struct ListArgs {
    pub zooms: String,
    pub bbox: String,
    /// Append each tile's `left,bottom,right,top` bounds
    pub bounds: bool,
    /// Print only the number of tiles
    pub count: bool,
}

/// Run the list command.
pub fn run(args: ListArgs) -> Result<(), CliError> {
    let sequence = enumerate_area(&args.bbox, &args.zooms)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.count {
        writeln!(out, "{}", sequence.total())?;
    } else {
        write_tiles(&mut out, sequence, args.bounds)?;
    }

    out.flush()?;
    Ok(())
}

/// Writes one `z/x/y` line per tile, optionally followed by its bounds.
fn write_tiles<W, I>(out: &mut W, tiles: I, bounds: bool) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = TileId>,
{
    for tile in tiles {
        if bounds {
            writeln!(out, "{} {}", tile, format_tile_bbox(&tile))?;
        } else {
            writeln!(out, "{}", tile)?;
        }
    }
    Ok(())
}
