use crate::error::{Result, UniformityError};
use crate::grid::Grid;

/// `floor(v / max * 100)` in `f64`, division first, so values match the
/// floating-point reference output bit for bit.
fn percent_of(v: u8, max: u8) -> u8 {
    ((v as f64 / max as f64) * 100.0) as u8
}

/// Express every cell as an integer percentage of the grid's brightest cell.
///
/// All cells equal to the maximum read 100. A grid whose maximum is zero has
/// no meaningful reference and is rejected.
pub fn percentages(brightness: &Grid<u8>) -> Result<Grid<u8>> {
    let (_, max) = brightness.min_max();
    if max == 0 {
        return Err(UniformityError::DegenerateBrightnessRange);
    }
    Ok(brightness.map(|v| percent_of(v, max)))
}
