//! Upload rules for product images.
//!
//! Only the dimension arithmetic lives here; decoding and resampling the
//! pixels is done by whatever stores the file.

use super::errors::DomainError;

pub const MIN_RESOLUTION: (u32, u32) = (400, 400);
pub const MAX_RESOLUTION: (u32, u32) = (800, 800);
/// 3 MiB.
pub const MAX_IMAGE_SIZE: u64 = 3_145_728;

/// Metadata of an uploaded image, as reported by the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

/// Rejects images smaller than [`MIN_RESOLUTION`] in either dimension or
/// heavier than [`MAX_IMAGE_SIZE`].
pub fn check(image: &ImageUpload) -> Result<(), DomainError> {
    let (min_w, min_h) = MIN_RESOLUTION;
    if image.width < min_w || image.height < min_h {
        return Err(DomainError::InvalidInput(format!(
            "image {}x{} is below the minimum resolution {min_w}x{min_h}",
            image.width, image.height
        )));
    }
    if image.size_bytes > MAX_IMAGE_SIZE {
        return Err(DomainError::InvalidInput(format!(
            "image of {} bytes exceeds the {MAX_IMAGE_SIZE} byte limit",
            image.size_bytes
        )));
    }
    if image.path.trim().is_empty() {
        return Err(DomainError::InvalidInput("image path is empty".to_string()));
    }
    Ok(())
}

/// Size the image is displayed at: unchanged up to the maximum width,
/// otherwise scaled down to it keeping the aspect ratio.
pub fn fit_to_max_width(width: u32, height: u32) -> (u32, u32) {
    let (max_w, _) = MAX_RESOLUTION;
    if width <= max_w {
        return (width, height);
    }
    let scaled = (u64::from(height) * u64::from(max_w) + u64::from(width) / 2) / u64::from(width);
    (max_w, u32::try_from(scaled).unwrap_or(u32::MAX))
}
