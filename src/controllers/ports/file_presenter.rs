use crate::core::data::pixel_buffer::PixelBuffer;
use std::path::Path;

/// Persists a finished raster.
pub trait FilePresenterPort {
    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()>;
}
