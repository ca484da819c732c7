//! Owned sample buffers and file helpers for tools.
//!
//! - `OwnedImageU8`: owned interleaved 8-bit buffer with a borrowed view.
//! - `load_image`: read a PNG/JPEG/etc. through the `image` crate, keeping
//!   grayscale inputs single-channel and converting everything else to RGB.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageU8;
use crate::error::ImageError;
use image::DynamicImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned, tightly packed 8-bit buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImageU8 {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl OwnedImageU8 {
    /// Wrap raw samples. Shape is checked when the buffer is borrowed via
    /// [`OwnedImageU8::as_view`].
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Borrow as a validated `ImageU8` view
    pub fn as_view(&self) -> Result<ImageU8<'_>, ImageError> {
        ImageU8::new(self.width, self.height, self.channels, &self.data)
    }
}

impl From<DynamicImage> for OwnedImageU8 {
    fn from(img: DynamicImage) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);
        match img {
            DynamicImage::ImageLuma8(gray) => Self::new(width, height, 1, gray.into_raw()),
            other => Self::new(width, height, 3, other.into_rgb8().into_raw()),
        }
    }
}

/// Load an image from disk as an owned 8-bit buffer (gray or RGB).
pub fn load_image(path: &Path) -> Result<OwnedImageU8, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    Ok(OwnedImageU8::from(img))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
