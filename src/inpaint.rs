//! Public inpainting API: option types, input validation, and dispatch to
//! the algorithm implementations.

use image::{GrayImage, RgbImage};

use crate::diffusion;
use crate::error::{Error, Result};
use crate::fmm;

/// Default neighborhood radius considered around each masked pixel.
pub const DEFAULT_RADIUS: u32 = 3;

/// Inpainting algorithm variant.
///
/// Both variants honor the same contract and differ only in the texture of
/// the synthesized pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    any(feature = "cli", feature = "server"),
    derive(clap::ValueEnum)
)]
pub enum InpaintAlgorithm {
    /// Fast-marching method (Telea). Good general-purpose default.
    #[default]
    Telea,
    /// Diffusion fill. Smoother gradients, softer texture.
    Diffusion,
}

/// Options controlling the inpaint operation.
#[derive(Debug, Clone, Copy)]
pub struct InpaintOptions {
    /// Neighborhood radius in pixels (must be at least 1).
    pub radius: u32,
    /// Algorithm variant to use.
    pub algorithm: InpaintAlgorithm,
}

impl Default for InpaintOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            algorithm: InpaintAlgorithm::default(),
        }
    }
}

/// Remove the masked region of `image`, synthesizing it from surrounding
/// content.
///
/// Non-zero mask pixels are synthesized; zero mask pixels are bit-identical
/// to the input. The input image is not modified.
///
/// # Errors
///
/// - [`Error::EmptyInput`] if the image or mask has a zero dimension.
/// - [`Error::DimensionMismatch`] if the mask does not match the image size.
/// - [`Error::ZeroRadius`] if `options.radius` is zero.
pub fn inpaint(image: &RgbImage, mask: &GrayImage, options: &InpaintOptions) -> Result<RgbImage> {
    if image.width() == 0 || image.height() == 0 || mask.width() == 0 || mask.height() == 0 {
        return Err(Error::EmptyInput);
    }
    if image.dimensions() != mask.dimensions() {
        return Err(Error::DimensionMismatch {
            image_width: image.width(),
            image_height: image.height(),
            mask_width: mask.width(),
            mask_height: mask.height(),
        });
    }
    if options.radius == 0 {
        return Err(Error::ZeroRadius);
    }

    let result = match options.algorithm {
        InpaintAlgorithm::Telea => fmm::inpaint_telea(image, mask, options.radius),
        InpaintAlgorithm::Diffusion => diffusion::inpaint_diffusion(image, mask, options.radius),
    };
    Ok(result)
}
