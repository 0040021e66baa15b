//! Separable Gaussian blur over a single 8-bit coverage plane.
//!
//! The threshold pass only looks at coverage, so blurring alpha alone is enough and four times
//! cheaper than blurring RGBA.

use crate::foundation::error::{BlobscapeError, BlobscapeResult};

/// Largest kernel radius (taps on each side) the blur accepts.
pub const MAX_BLUR_RADIUS_PX: u32 = 256;

/// Kernel taps needed on each side for a given sigma (3 sigma, clamped to
/// `1..=MAX_BLUR_RADIUS_PX`).
pub fn kernel_radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    ((sigma * 3.0).ceil().min(MAX_BLUR_RADIUS_PX as f32) as u32).max(1)
}

/// Normalized Gaussian weights in Q16 fixed point; they sum to exactly `1 << 16`.
pub fn gaussian_kernel_q16(radius: u32, sigma: f32) -> BlobscapeResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if radius > MAX_BLUR_RADIUS_PX {
        return Err(BlobscapeError::validation(format!(
            "blur radius {radius} exceeds {MAX_BLUR_RADIUS_PX}"
        )));
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BlobscapeError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(BlobscapeError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|&w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

/// Blur `plane` (`width * height` bytes) in place, using `scratch` as the intermediate buffer.
///
/// Edges clamp to the nearest pixel.
pub fn blur_plane_q16(
    plane: &mut [u8],
    scratch: &mut Vec<u8>,
    width: u32,
    height: u32,
    kernel: &[u32],
) -> BlobscapeResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| BlobscapeError::render("blur plane size overflow"))?;
    if plane.len() != expected {
        return Err(BlobscapeError::render(
            "blur_plane_q16 expects a plane of width*height bytes",
        ));
    }
    if kernel.len() <= 1 || expected == 0 {
        return Ok(());
    }

    scratch.resize(expected, 0);
    horizontal_pass(plane, scratch, width as usize, height as usize, kernel);
    vertical_pass(scratch, plane, width as usize, height as usize, kernel);
    Ok(())
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], w: usize, h: usize, k: &[u32]) {
    let radius = (k.len() / 2) as isize;
    let max_x = w as isize - 1;
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        let out = &mut dst[y * w..(y + 1) * w];
        for (x, o) in out.iter_mut().enumerate() {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x as isize + ki as isize - radius).clamp(0, max_x) as usize;
                acc += u64::from(kw) * u64::from(row[sx]);
            }
            *o = q16_to_u8(acc);
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], w: usize, h: usize, k: &[u32]) {
    let radius = (k.len() / 2) as isize;
    let max_y = h as isize - 1;
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y as isize + ki as isize - radius).clamp(0, max_y) as usize;
                acc += u64::from(kw) * u64::from(src[sy * w + x]);
            }
            dst[y * w + x] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
