use image::RgbImage;
use std::path::Path;

pub mod colormap;
pub mod config;
pub mod csv;
pub mod error;
pub mod font;
pub mod grid;
pub mod heatmap;
pub mod loader;
pub mod region;
pub mod resample;
pub mod uniformity;

pub use config::{AnalysisParams, HeatmapStyle, Resolution};
pub use error::{Result, UniformityError};
pub use grid::Grid;
pub use region::Region;

/// Everything one pipeline run produces: where the display is, its
/// downsampled brightness, and each cell as a percentage of the brightest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub region: Region,
    pub brightness: Grid<u8>,
    pub percent: Grid<u8>,
}

// --- pipeline ---

/// Detect the display in `photo`, resample it to the configured grid and
/// compute per-cell uniformity.
pub fn measure(photo: &RgbImage, params: &AnalysisParams) -> Result<Measurement> {
    params.validate()?;

    let gray = region::to_brightness(photo);
    let region = region::detect_display(&gray, params.threshold)?;
    let brightness = resample::resample_area(&gray, region, params.grid_x, params.grid_y)?;
    let percent = uniformity::percentages(&brightness)?;

    let (lo, hi) = brightness.min_max();
    tracing::info!(
        "Resampled to {}x{} cells, brightness {}..={}",
        brightness.cols(),
        brightness.rows(),
        lo,
        hi
    );

    Ok(Measurement {
        region,
        brightness,
        percent,
    })
}

/// Load the photo at `input` and measure it.
pub fn measure_file(input: &Path, params: &AnalysisParams) -> Result<Measurement> {
    let photo = loader::load_photo(input)?;
    measure(&photo, params)
}

/// Measure a photo supplied as encoded bytes (png/jpg/etc).
pub fn measure_encoded_bytes(input: &[u8], params: &AnalysisParams) -> Result<Measurement> {
    let photo = loader::load_photo_from_bytes(input)?;
    measure(&photo, params)
}
