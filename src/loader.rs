use std::path::Path;

use image::{ImageReader, RgbImage};

use crate::error::{Result, UniformityError};

/// Load a photo from disk as 8-bit RGB. The format is sniffed from the file
/// contents, so a mislabeled extension still decodes.
pub fn load_photo(path: &Path) -> Result<RgbImage> {
    let load_err = |source| UniformityError::Load {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(|e| load_err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| load_err(image::ImageError::IoError(e)))?;
    let photo = reader.decode().map_err(load_err)?.to_rgb8();

    tracing::info!(
        "Loaded {} ({}x{})",
        path.display(),
        photo.width(),
        photo.height()
    );
    Ok(photo)
}

/// Decode an encoded photo (png/jpg/etc) held in memory.
pub fn load_photo_from_bytes(bytes: &[u8]) -> Result<RgbImage> {
    let photo = image::load_from_memory(bytes)
        .map_err(UniformityError::Decode)?
        .to_rgb8();
    Ok(photo)
}
