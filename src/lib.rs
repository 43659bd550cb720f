//! Remove marked regions (logos, text overlays) from photos via inpainting.
//!
//! Given a color image and a single-channel mask of the same size, masked
//! pixels (value 255) are synthesized from the surrounding content and
//! unmasked pixels (value 0) are preserved bit-for-bit. Two algorithm
//! variants are available: a fast-marching method (Telea) and a smoother
//! diffusion fill.
//!
//! # Quick Start
//!
//! ```no_run
//! use logo_inpaint::{inpaint, InpaintOptions};
//!
//! let img = image::open("photo.jpg").unwrap().to_rgb8();
//! let mask = image::open("mask.png").unwrap().to_luma8();
//! let result = inpaint(&img, &mask, &InpaintOptions::default()).unwrap();
//! result.save("cleaned.jpg").unwrap();
//! ```
//!
//! # File-based usage
//!
//! The batch runner wraps the same operation in path-to-path plumbing:
//!
//! ```no_run
//! use std::path::Path;
//! use logo_inpaint::{remove_marked_region, InpaintOptions};
//!
//! remove_marked_region(
//!     Path::new("photo.jpg"),
//!     Path::new("mask.png"),
//!     Path::new("cleaned.jpg"),
//!     &InpaintOptions::default(),
//! )
//! .unwrap();
//! ```
//!
//! With the `server` feature enabled, [`server`] exposes the operation as a
//! one-route HTTP service (`POST /inpaint`, multipart `image` + `mask`).

#![deny(missing_docs)]

pub mod batch;
mod diffusion;
pub mod error;
mod fmm;
mod inpaint;
#[cfg(feature = "server")]
pub mod server;

pub use batch::{
    encode_png, load_image, load_mask, remove_marked_region, save_image, write_debug_composite,
};
pub use error::{Error, Result};
pub use inpaint::{inpaint, InpaintAlgorithm, InpaintOptions, DEFAULT_RADIUS};
