//! Error types for the logo-inpaint crate.

use std::path::PathBuf;

/// Errors that can occur while loading, inpainting, or saving images.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input image could not be loaded or decoded.
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        /// Path of the image that failed to load.
        path: PathBuf,
        /// Underlying decode error.
        source: image::ImageError,
    },

    /// The mask could not be loaded or decoded.
    #[error("failed to load mask {path}: {source}")]
    MaskLoad {
        /// Path of the mask that failed to load.
        path: PathBuf,
        /// Underlying decode error.
        source: image::ImageError,
    },

    /// The mask dimensions do not match the image dimensions.
    #[error("image is {image_width}x{image_height} but mask is {mask_width}x{mask_height}")]
    DimensionMismatch {
        /// Image width in pixels.
        image_width: u32,
        /// Image height in pixels.
        image_height: u32,
        /// Mask width in pixels.
        mask_width: u32,
        /// Mask height in pixels.
        mask_height: u32,
    },

    /// The image or mask has zero width or height.
    #[error("image and mask must have non-zero dimensions")]
    EmptyInput,

    /// The inpaint radius is zero.
    #[error("inpaint radius must be at least 1")]
    ZeroRadius,

    /// The output format is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred during image processing (decode, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
