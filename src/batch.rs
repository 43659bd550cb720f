//! Batch runner: file-path plumbing around the inpaint operation.
//!
//! Decode image and mask from disk, inpaint, encode the result to the path's
//! implied format. Nothing is written when any step fails.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};

use crate::error::{Error, Result};
use crate::inpaint::{inpaint, InpaintOptions};

/// Load a color image from `path`, converting to RGB8.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] naming the path if the file is missing,
/// corrupt, or in an unsupported format.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Load a mask from `path`, converting to single-channel grayscale.
///
/// Non-zero pixels mark regions to synthesize; zero pixels are preserved.
///
/// # Errors
///
/// Returns [`Error::MaskLoad`] naming the path if the file is missing,
/// corrupt, or in an unsupported format.
pub fn load_mask(path: &Path) -> Result<GrayImage> {
    let img = image::open(path).map_err(|source| Error::MaskLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_luma8())
}

/// Save an RGB image in the format implied by the path's extension.
///
/// JPEG is written at quality 100 to keep re-encoding loss minimal.
///
/// # Errors
///
/// Returns an error if the format is unsupported or writing fails.
pub fn save_image(img: &RgbImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    let dyn_img = DynamicImage::ImageRgb8(img.clone());

    match format {
        ImageFormat::Jpeg => {
            let file = std::fs::File::create(path)?;
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(file, 100);
            encoder.encode_image(&dyn_img)?;
        }
        ImageFormat::Png | ImageFormat::WebP | ImageFormat::Bmp => {
            dyn_img.save(path)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    Ok(())
}

/// Encode an RGB image as lossless PNG bytes.
///
/// # Errors
///
/// Returns an error if PNG encoding fails.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Remove the masked region of the image at `image_path` and write the
/// result to `output_path`.
///
/// The mask is loaded as grayscale; its dimensions must match the image.
/// The output format is taken from the output path's extension and is
/// validated before any compute. On failure nothing is written.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] or [`Error::MaskLoad`] naming the input
/// that failed to decode, [`Error::UnsupportedFormat`] for an unknown
/// output extension, or any error from [`inpaint`].
pub fn remove_marked_region(
    image_path: &Path,
    mask_path: &Path,
    output_path: &Path,
    options: &InpaintOptions,
) -> Result<()> {
    // Reject an unwritable output format up front, before the compute.
    ImageFormat::from_path(output_path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    let img = load_image(image_path)?;
    let mask = load_mask(mask_path)?;
    let result = inpaint(&img, &mask, options)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    save_image(&result, output_path)
}

/// Write a side-by-side before/after composite into `dir` for inspection.
///
/// Non-blocking replacement for an interactive preview window; only invoked
/// when explicitly requested. Returns the path of the written PNG.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the composite
/// cannot be encoded.
pub fn write_debug_composite(
    original: &RgbImage,
    result: &RgbImage,
    dir: &Path,
) -> Result<PathBuf> {
    let (w, h) = original.dimensions();
    let mut composite = RgbImage::new(w * 2, h);
    for (x, y, px) in original.enumerate_pixels() {
        composite.put_pixel(x, y, *px);
    }
    for (x, y, px) in result.enumerate_pixels() {
        composite.put_pixel(x + w, y, *px);
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join("before_after.png");
    composite.save(&path)?;
    Ok(path)
}
