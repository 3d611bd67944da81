use image::RgbImage;
use rayon::prelude::*;

use super::{blend, color};

/// Channel values strictly above this receive the highlights offset.
pub const HIGHLIGHT_THRESHOLD: u8 = 200;

/// Scales every channel by `factor`: a blend from black toward the image.
pub fn apply_brightness(img: RgbImage, factor: f32) -> RgbImage {
    if factor == 1.0 {
        return img;
    }
    blend(&img, factor, |_, _| [0, 0, 0])
}

/// Scales each channel's distance from the image's mean gray by `factor`.
pub fn apply_contrast(img: RgbImage, factor: f32) -> RgbImage {
    if factor == 1.0 {
        return img;
    }
    let mean = color::mean_luma(&img);
    blend(&img, factor, |_, _| [mean, mean, mean])
}

/// Adds `offset` to every channel above the highlight threshold.
///
/// The sum is rounded half to even and saturates at 255 instead of wrapping.
pub fn apply_highlights(mut img: RgbImage, offset: f32) -> RgbImage {
    if offset <= 0.0 {
        return img;
    }
    let lut = highlight_lut(offset);
    let raw: &mut [u8] = &mut img;
    raw.par_iter_mut().for_each(|v| *v = lut[*v as usize]);
    img
}

fn highlight_lut(offset: f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = if i as u8 > HIGHLIGHT_THRESHOLD {
            (i as f32 + offset).round_ties_even().min(255.0) as u8
        } else {
            i as u8
        };
    }
    lut
}
