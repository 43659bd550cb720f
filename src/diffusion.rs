//! Diffusion inpainting.
//!
//! A simpler, smoother alternative to the fast-marching variant: masked
//! pixels are first seeded layer by layer from the mask boundary (onion
//! peel), then relaxed with Jacobi sweeps until the fill is harmonic. The
//! result propagates surrounding color into the hole the way heat diffuses,
//! which trades the fast-marching texture for smoother gradients.

use std::collections::VecDeque;

use image::{GrayImage, RgbImage};

/// Convergence threshold for a Jacobi sweep, in 8-bit channel units.
const CONVERGENCE: f32 = 0.1;

/// Jacobi sweeps per unit of radius.
const SWEEPS_PER_RADIUS: usize = 64;

/// Inpaint `image` at the non-zero pixels of `mask` by diffusion.
///
/// Preconditions (dimensions match, non-empty, radius >= 1) are enforced by
/// the caller. `radius` scales the relaxation budget.
pub(crate) fn inpaint_diffusion(image: &RgbImage, mask: &GrayImage, radius: u32) -> RgbImage {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let len = width * height;

    let mut channels = [
        vec![0.0f32; len],
        vec![0.0f32; len],
        vec![0.0f32; len],
    ];
    let mut masked = vec![false; len];
    let mut filled = vec![false; len];

    for (x, y, px) in image.enumerate_pixels() {
        let i = y as usize * width + x as usize;
        for ch in 0..3 {
            channels[ch][i] = f32::from(px[ch]);
        }
        let is_masked = mask.get_pixel(x, y)[0] != 0;
        masked[i] = is_masked;
        filled[i] = !is_masked;
    }

    seed_from_boundary(&mut channels, &masked, &mut filled, width, height);
    relax(&mut channels, &masked, width, height, radius);

    let mut out = image.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        let i = y as usize * width + x as usize;
        if masked[i] {
            for ch in 0..3 {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    px[ch] = channels[ch][i].round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }
    out
}

fn neighbors(i: usize, width: usize, height: usize) -> impl Iterator<Item = usize> {
    let x = i % width;
    let y = i / width;
    let mut out = [usize::MAX; 4];
    let mut n = 0;
    if x > 0 {
        out[n] = i - 1;
        n += 1;
    }
    if x + 1 < width {
        out[n] = i + 1;
        n += 1;
    }
    if y > 0 {
        out[n] = i - width;
        n += 1;
    }
    if y + 1 < height {
        out[n] = i + width;
        n += 1;
    }
    out.into_iter().take(n)
}

/// Seed masked pixels breadth-first from the boundary, each taking the mean
/// of its already-filled neighbors.
fn seed_from_boundary(
    channels: &mut [Vec<f32>; 3],
    masked: &[bool],
    filled: &mut [bool],
    width: usize,
    height: usize,
) {
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut queued = vec![false; masked.len()];

    for i in 0..masked.len() {
        if masked[i] && neighbors(i, width, height).any(|n| filled[n]) {
            queue.push_back(i);
            queued[i] = true;
        }
    }

    while let Some(i) = queue.pop_front() {
        let mut sums = [0.0f32; 3];
        let mut count = 0.0f32;
        for n in neighbors(i, width, height) {
            if filled[n] {
                for ch in 0..3 {
                    sums[ch] += channels[ch][n];
                }
                count += 1.0;
            }
        }
        if count > 0.0 {
            for ch in 0..3 {
                channels[ch][i] = sums[ch] / count;
            }
        } else {
            // Fully masked image with no known boundary anywhere.
            for ch in 0..3 {
                channels[ch][i] = 128.0;
            }
        }
        filled[i] = true;

        for n in neighbors(i, width, height) {
            if masked[n] && !filled[n] && !queued[n] {
                queue.push_back(n);
                queued[n] = true;
            }
        }
    }

    // A mask covering the whole image never enters the queue above.
    for i in 0..masked.len() {
        if masked[i] && !filled[i] {
            for ch in 0..3 {
                channels[ch][i] = 128.0;
            }
            filled[i] = true;
        }
    }
}

/// Jacobi relaxation over the masked region until convergence or the sweep
/// budget is exhausted.
fn relax(
    channels: &mut [Vec<f32>; 3],
    masked: &[bool],
    width: usize,
    height: usize,
    radius: u32,
) {
    let sweeps = SWEEPS_PER_RADIUS * radius as usize;
    let mut next = channels.clone();

    for _ in 0..sweeps {
        let mut max_delta = 0.0f32;
        for i in 0..masked.len() {
            if !masked[i] {
                continue;
            }
            let mut sums = [0.0f32; 3];
            let mut count = 0.0f32;
            for n in neighbors(i, width, height) {
                for ch in 0..3 {
                    sums[ch] += channels[ch][n];
                }
                count += 1.0;
            }
            for ch in 0..3 {
                let v = sums[ch] / count;
                max_delta = max_delta.max((v - channels[ch][i]).abs());
                next[ch][i] = v;
            }
        }
        for ch in 0..3 {
            for i in 0..masked.len() {
                if masked[i] {
                    channels[ch][i] = next[ch][i];
                }
            }
        }
        if max_delta < CONVERGENCE {
            break;
        }
    }
}
