//! Telea fast-marching inpainting.
//!
//! The masked region is filled from its boundary inward. A fast marching
//! method propagates an arrival-time field `T` (distance to the mask
//! boundary) by solving the eikonal equation `|grad T| = 1`, and each pixel
//! is synthesized when the front reaches it, as a weighted average of the
//! already-known pixels in a `radius` neighborhood. Weights follow Telea
//! (2004): alignment with the propagation direction, geometric distance,
//! and level-set distance.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use image::{GrayImage, RgbImage};

/// Pixel state: value is usable for synthesis.
const KNOWN: u8 = 0;
/// Pixel state: on the marching front, `dist` assigned.
const BAND: u8 = 1;
/// Pixel state: masked, not yet reached by the front.
const INSIDE: u8 = 2;

/// Arrival time assigned to unreached masked pixels.
const FAR: f32 = 1.0e6;

/// A pixel on the marching front, ordered so the heap pops smallest `dist`.
struct FrontPixel {
    dist: f32,
    x: i32,
    y: i32,
}

impl PartialEq for FrontPixel {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist
    }
}

impl Eq for FrontPixel {}

impl PartialOrd for FrontPixel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontPixel {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we need the closest pixel first.
        other.dist.total_cmp(&self.dist)
    }
}

/// Per-pixel state and arrival-time fields for the march.
struct Grid {
    width: i32,
    height: i32,
    flags: Vec<u8>,
    dist: Vec<f32>,
}

impl Grid {
    fn from_mask(mask: &GrayImage) -> Self {
        let width = i32::try_from(mask.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(mask.height()).unwrap_or(i32::MAX);
        let len = (width as usize) * (height as usize);
        let mut grid = Self {
            width,
            height,
            flags: vec![KNOWN; len],
            dist: vec![0.0; len],
        };
        for (x, y, px) in mask.enumerate_pixels() {
            if px[0] != 0 {
                let i = grid.index(x as i32, y as i32);
                grid.flags[i] = INSIDE;
                grid.dist[i] = FAR;
            }
        }
        grid
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[inline]
    fn flag(&self, x: i32, y: i32) -> u8 {
        if self.in_bounds(x, y) {
            self.flags[self.index(x, y)]
        } else {
            INSIDE
        }
    }

    /// Eikonal update from one horizontal and one vertical neighbor.
    fn solve(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> f32 {
        let f1 = self.flag(x1, y1);
        let f2 = self.flag(x2, y2);
        if f1 == KNOWN {
            let t1 = self.dist[self.index(x1, y1)];
            if f2 == KNOWN {
                let t2 = self.dist[self.index(x2, y2)];
                if (t1 - t2).abs() >= 1.0 {
                    1.0 + t1.min(t2)
                } else {
                    let disc = 2.0 - (t1 - t2) * (t1 - t2);
                    (t1 + t2 + disc.sqrt()) * 0.5
                }
            } else {
                1.0 + t1
            }
        } else if f2 == KNOWN {
            1.0 + self.dist[self.index(x2, y2)]
        } else {
            FAR
        }
    }

    /// Gradient of the arrival-time field, central differences where both
    /// neighbors carry a value, one-sided at the front edge.
    fn dist_gradient(&self, x: i32, y: i32) -> (f32, f32) {
        let here = self.dist[self.index(x, y)];
        let axis = |xa: i32, ya: i32, xb: i32, yb: i32| -> f32 {
            let a_ok = self.flag(xa, ya) != INSIDE;
            let b_ok = self.flag(xb, yb) != INSIDE;
            match (a_ok, b_ok) {
                (true, true) => {
                    (self.dist[self.index(xb, yb)] - self.dist[self.index(xa, ya)]) * 0.5
                }
                (true, false) => here - self.dist[self.index(xa, ya)],
                (false, true) => self.dist[self.index(xb, yb)] - here,
                (false, false) => 0.0,
            }
        };
        (axis(x - 1, y, x + 1, y), axis(x, y - 1, x, y + 1))
    }
}

/// Inpaint `image` at the non-zero pixels of `mask`.
///
/// Preconditions (dimensions match, non-empty, radius >= 1) are enforced by
/// the caller. Returns a new image; zero-mask pixels are copied unchanged.
pub(crate) fn inpaint_telea(image: &RgbImage, mask: &GrayImage, radius: u32) -> RgbImage {
    let mut out = image.clone();
    let mut grid = Grid::from_mask(mask);
    let mut front = BinaryHeap::new();

    // Seed the front with known pixels that touch the masked region.
    for y in 0..grid.height {
        for x in 0..grid.width {
            if grid.flags[grid.index(x, y)] != INSIDE {
                continue;
            }
            for (nx, ny) in neighbors4(x, y) {
                if grid.in_bounds(nx, ny) {
                    let ni = grid.index(nx, ny);
                    if grid.flags[ni] == KNOWN {
                        grid.flags[ni] = BAND;
                        front.push(FrontPixel {
                            dist: 0.0,
                            x: nx,
                            y: ny,
                        });
                    }
                }
            }
        }
    }

    // March inward, synthesizing each masked pixel as the front reaches it.
    while let Some(FrontPixel { x, y, .. }) = front.pop() {
        let i = grid.index(x, y);
        if grid.flags[i] == KNOWN {
            continue;
        }
        grid.flags[i] = KNOWN;

        for (nx, ny) in neighbors4(x, y) {
            if !grid.in_bounds(nx, ny) {
                continue;
            }
            let ni = grid.index(nx, ny);
            if grid.flags[ni] != INSIDE {
                continue;
            }
            let t = grid
                .solve(nx - 1, ny, nx, ny - 1)
                .min(grid.solve(nx + 1, ny, nx, ny - 1))
                .min(grid.solve(nx - 1, ny, nx, ny + 1))
                .min(grid.solve(nx + 1, ny, nx, ny + 1));
            grid.dist[ni] = t;
            synthesize_pixel(&mut out, &grid, nx, ny, radius);
            grid.flags[ni] = BAND;
            front.push(FrontPixel {
                dist: t,
                x: nx,
                y: ny,
            });
        }
    }

    out
}

#[inline]
fn neighbors4(x: i32, y: i32) -> [(i32, i32); 4] {
    [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
}

/// Fill one pixel from the known pixels within `radius`.
fn synthesize_pixel(out: &mut RgbImage, grid: &Grid, x: i32, y: i32, radius: u32) {
    let r = i32::try_from(radius).unwrap_or(i32::MAX);
    let t_here = grid.dist[grid.index(x, y)];
    let (grad_x, grad_y) = grid.dist_gradient(x, y);

    #[allow(clippy::cast_precision_loss)]
    let radius_sq = (radius * radius) as f32;

    let mut acc = [0.0f32; 3];
    let mut weight_sum = 0.0f32;

    for ny in (y - r)..=(y + r) {
        for nx in (x - r)..=(x + r) {
            if (nx == x && ny == y) || !grid.in_bounds(nx, ny) {
                continue;
            }
            let ni = grid.index(nx, ny);
            if grid.flags[ni] == INSIDE {
                continue;
            }

            #[allow(clippy::cast_precision_loss)]
            let (vx, vy) = ((x - nx) as f32, (y - ny) as f32);
            let len_sq = vx * vx + vy * vy;
            if len_sq > radius_sq {
                continue;
            }
            let len = len_sq.sqrt();

            let mut dir = (vx * grad_x + vy * grad_y) / len;
            if dir.abs() <= 0.01 {
                dir = 1.0e-6;
            }
            let dst = 1.0 / len_sq;
            let lev = 1.0 / (1.0 + (grid.dist[ni] - t_here).abs());
            let w = (dir * dst * lev).abs();

            #[allow(clippy::cast_sign_loss)]
            let px = out.get_pixel(nx as u32, ny as u32);
            for ch in 0..3 {
                acc[ch] += w * f32::from(px[ch]);
            }
            weight_sum += w;
        }
    }

    if weight_sum > 0.0 {
        #[allow(clippy::cast_sign_loss)]
        let px = out.get_pixel_mut(x as u32, y as u32);
        for ch in 0..3 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                px[ch] = (acc[ch] / weight_sum).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    fn solid_image(w: u32, h: u32, value: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(value))
    }

    fn square_mask(w: u32, h: u32, x0: u32, y0: u32, size: u32) -> GrayImage {
        let mut mask = GrayImage::new(w, h);
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        mask
    }

    #[test]
    fn uniform_surroundings_fill_with_the_same_value() {
        let img = solid_image(40, 40, [120, 60, 200]);
        let mask = square_mask(40, 40, 16, 16, 8);

        let result = inpaint_telea(&img, &mask, 3);

        for y in 16..24 {
            for x in 16..24 {
                let px = result.get_pixel(x, y);
                for ch in 0..3 {
                    let expected = i32::from(img.get_pixel(x, y)[ch]);
                    let got = i32::from(px[ch]);
                    assert!(
                        (got - expected).abs() <= 1,
                        "pixel ({x},{y}) ch {ch}: {got} vs {expected}"
                    );
                }
            }
        }
    }

    #[test]
    fn pixels_outside_mask_are_untouched() {
        let mut img = solid_image(30, 30, [10, 20, 30]);
        // Non-uniform content so a copy error would be visible.
        img.put_pixel(2, 3, Rgb([200, 100, 50]));
        let mask = square_mask(30, 30, 10, 10, 5);

        let result = inpaint_telea(&img, &mask, 3);

        for (x, y, px) in result.enumerate_pixels() {
            let masked = (10..15).contains(&x) && (10..15).contains(&y);
            if !masked {
                assert_eq!(px, img.get_pixel(x, y), "pixel ({x},{y}) changed");
            }
        }
    }

    #[test]
    fn empty_mask_returns_identical_image() {
        let img = solid_image(20, 20, [1, 2, 3]);
        let mask = GrayImage::new(20, 20);
        let result = inpaint_telea(&img, &mask, 3);
        assert_eq!(result.as_raw(), img.as_raw());
    }

    #[test]
    fn masked_edge_pixels_are_synthesized() {
        let img = solid_image(16, 16, [80, 80, 80]);
        // Mask touching the image border.
        let mask = square_mask(16, 16, 0, 0, 4);
        let result = inpaint_telea(&img, &mask, 3);
        for y in 0..4 {
            for x in 0..4 {
                let px = result.get_pixel(x, y);
                assert!((i32::from(px[0]) - 80).abs() <= 1);
            }
        }
    }
}
