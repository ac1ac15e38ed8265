use std::fmt;
use std::str::FromStr;

use crate::error::{Result, UniformityError};

/// Brightness (0-255) at or above which a pixel counts as part of the display.
pub const DEFAULT_THRESHOLD: u8 = 200;

pub const DEFAULT_GRID_X: u32 = 80;
pub const DEFAULT_GRID_Y: u32 = 45;
pub const DEFAULT_TEXT_SIZE: u32 = 8;
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisParams {
    pub grid_x: u32,
    pub grid_y: u32,
    pub threshold: u8,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            grid_x: DEFAULT_GRID_X,
            grid_y: DEFAULT_GRID_Y,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl AnalysisParams {
    pub fn with_grid(grid_x: u32, grid_y: u32) -> Self {
        Self {
            grid_x,
            grid_y,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_x == 0 || self.grid_y == 0 {
            return Err(UniformityError::InvalidGridSize {
                grid_x: self.grid_x,
                grid_y: self.grid_y,
            });
        }
        Ok(())
    }
}

/// Output pixel size of the rendered heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("resolution must be in the format WIDTHxHEIGHT (e.g., 1920x1080), got {0:?}")]
pub struct ParseResolutionError(String);

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ParseResolutionError(s.to_string());
        let lower = s.to_ascii_lowercase();
        let (w, h) = lower.split_once('x').ok_or_else(err)?;
        let width: u32 = w.parse().map_err(|_| err())?;
        let height: u32 = h.parse().map_err(|_| err())?;
        if width == 0 || height == 0 {
            return Err(err());
        }
        Ok(Self { width, height })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapStyle {
    pub resolution: Resolution,
    /// Nominal font size of the per-cell percentage labels.
    pub text_size: u32,
    pub quality: u8,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            text_size: DEFAULT_TEXT_SIZE,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolution() {
        assert_eq!(
            "1920x1080".parse::<Resolution>(),
            Ok(Resolution {
                width: 1920,
                height: 1080
            })
        );
        assert_eq!(
            "640X480".parse::<Resolution>(),
            Ok(Resolution {
                width: 640,
                height: 480
            })
        );
    }

    #[test]
    fn rejects_malformed_resolution() {
        for bad in ["", "1920", "1920x", "x1080", "1920*1080", "0x1080", "1920x0", "-1x5", "1x2x3"] {
            assert!(bad.parse::<Resolution>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn zero_grid_is_invalid() {
        assert!(AnalysisParams::with_grid(0, 45).validate().is_err());
        assert!(AnalysisParams::with_grid(80, 0).validate().is_err());
        assert!(AnalysisParams::default().validate().is_ok());
    }
}
