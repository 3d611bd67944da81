use image::RgbImage;
use imageproc::filter::{gaussian_blur_f32, median_filter};

/// Gaussian blur with `radius` used as the standard deviation.
pub fn apply_blur(img: RgbImage, radius: f32) -> RgbImage {
    if radius <= 0.0 {
        return img;
    }
    gaussian_blur_f32(&img, radius)
}

/// Median filter whose window grows with `strength` (0..=100).
pub fn apply_noise_reduction(img: RgbImage, strength: f32) -> RgbImage {
    if strength <= 0.0 {
        return img;
    }
    let radius = median_window(strength) / 2;
    median_filter(&img, radius, radius)
}

/// Odd median window size: `floor(strength / 10) + 1`, bumped to odd, at least 3.
pub fn median_window(strength: f32) -> u32 {
    let mut size = (strength / 10.0).floor().max(0.0) as u32 + 1;
    if size % 2 == 0 {
        size += 1;
    }
    size.max(3)
}
