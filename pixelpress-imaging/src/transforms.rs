//! Per-pixel transforms. Every function allocates a fresh output buffer.

use image::RgbaImage;

pub(crate) const BLUR_SIGMA: f32 = 5.0;

const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

#[inline]
fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// ITU-R 601 luma replicated into R, G and B. Alpha is kept.
pub(crate) fn grayscale(src: &RgbaImage) -> RgbaImage {
    let mut out = RgbaImage::new(src.width(), src.height());
    for (dst, px) in out.pixels_mut().zip(src.pixels()) {
        let [r, g, b, a] = px.0;
        let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000;
        let luma = luma.min(255) as u8;
        dst.0 = [luma, luma, luma, a];
    }
    out
}

/// Fixed sepia tone matrix, saturating at 255. Alpha is kept.
pub(crate) fn sepia(src: &RgbaImage) -> RgbaImage {
    let mut out = RgbaImage::new(src.width(), src.height());
    for (dst, px) in out.pixels_mut().zip(src.pixels()) {
        let [r, g, b, a] = px.0;
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let mut tone = [0u8; 3];
        for (channel, row) in tone.iter_mut().zip(SEPIA.iter()) {
            *channel = clamp_channel(row[0] * r + row[1] * g + row[2] * b);
        }
        dst.0 = [tone[0], tone[1], tone[2], a];
    }
    out
}

/// 3x3 sharpen kernel: centre 32, neighbours -2, divided by 16.
///
/// Edge pixels reuse the nearest in-bounds neighbour.
pub(crate) fn sharpen(src: &RgbaImage) -> RgbaImage {
    let (width, height) = src.dimensions();
    let mut out = RgbaImage::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let max_x = width as i64 - 1;
    let max_y = height as i64 - 1;

    for y in 0..height {
        for x in 0..width {
            let centre = src.get_pixel(x, y).0;
            let mut neighbours = [0i32; 3];
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = (x as i64 + dx).clamp(0, max_x) as u32;
                    let ny = (y as i64 + dy).clamp(0, max_y) as u32;
                    let n = src.get_pixel(nx, ny).0;
                    for c in 0..3 {
                        neighbours[c] += n[c] as i32;
                    }
                }
            }

            let mut sharpened = [0u8; 4];
            for c in 0..3 {
                let acc = 32 * centre[c] as i32 - 2 * neighbours[c];
                sharpened[c] = clamp_channel(acc as f32 / 16.0);
            }
            sharpened[3] = centre[3];
            out.put_pixel(x, y, image::Rgba(sharpened));
        }
    }
    out
}

fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (3.0 * sigma).ceil() as i32;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / two_sigma_sq).exp())
        .collect();
    let sum: f32 = kernel.iter().sum();
    for weight in kernel.iter_mut() {
        *weight /= sum;
    }
    kernel
}

/// Separable Gaussian blur over all four channels with clamped borders.
pub(crate) fn gaussian_blur(src: &RgbaImage, sigma: f32) -> RgbaImage {
    let (width, height) = src.dimensions();
    let mut out = RgbaImage::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as i64;
    let (w, h) = (width as usize, height as usize);
    let raw: &[u8] = src.as_raw();

    // Horizontal pass into an intermediate float buffer
    let mut horizontal = vec![0f32; w * h * 4];
    for y in 0..h {
        let row = y * w * 4;
        for x in 0..w {
            let mut acc = [0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let sx = (x as i64 + k as i64 - radius).clamp(0, w as i64 - 1) as usize;
                let idx = row + sx * 4;
                for c in 0..4 {
                    acc[c] += raw[idx + c] as f32 * weight;
                }
            }
            let idx = row + x * 4;
            horizontal[idx..idx + 4].copy_from_slice(&acc);
        }
    }

    // Vertical pass straight into the output
    let dst: &mut [u8] = &mut out;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let sy = (y as i64 + k as i64 - radius).clamp(0, h as i64 - 1) as usize;
                let idx = (sy * w + x) * 4;
                for c in 0..4 {
                    acc[c] += horizontal[idx + c] * weight;
                }
            }
            let idx = (y * w + x) * 4;
            for c in 0..4 {
                dst[idx + c] = clamp_channel(acc[c]);
            }
        }
    }
    out
}
