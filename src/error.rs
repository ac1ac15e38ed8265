use std::path::PathBuf;

use crate::region::Region;

/// Errors produced by the uniformity pipeline and its emitters.
#[derive(Debug, thiserror::Error)]
pub enum UniformityError {
    /// The input photo is missing, unreadable or not a decodable image.
    #[error("unable to load the image from path: {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Encoded bytes handed to the loader could not be decoded.
    #[error("unable to decode image bytes")]
    Decode(#[source] image::ImageError),

    /// No pixel reached the brightness threshold.
    #[error("no display detected: no pixel at or above brightness {threshold}")]
    NoDisplayDetected { threshold: u8 },

    #[error("invalid grid size {grid_x}x{grid_y}: both dimensions must be positive")]
    InvalidGridSize { grid_x: u32, grid_y: u32 },

    /// The region handed to the resampler is empty or leaves the image.
    #[error("region {region:?} does not fit inside a {width}x{height} image")]
    InvalidRegion {
        region: Region,
        width: u32,
        height: u32,
    },

    /// Every grid cell is zero, so there is no maximum to normalize against.
    #[error("degenerate brightness range: the brightest grid cell is 0")]
    DegenerateBrightnessRange,

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render heatmap: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, UniformityError>;
