use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, UniformityError};
use crate::grid::Grid;

/// One line per grid row, comma-separated, no header, `\n` after every row.
pub fn write_csv_to<W: Write>(mut out: W, grid: &Grid<u8>) -> io::Result<()> {
    for row in grid.row_slices() {
        let mut first = true;
        for v in row {
            if !first {
                out.write_all(b",")?;
            }
            write!(out, "{v}")?;
            first = false;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Write `grid` to `path`, replacing any existing file.
pub fn write_csv(path: &Path, grid: &Grid<u8>) -> Result<()> {
    let write_err = |source| UniformityError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    write_csv_to(&mut out, grid).map_err(write_err)?;
    out.flush().map_err(write_err)?;
    Ok(())
}
