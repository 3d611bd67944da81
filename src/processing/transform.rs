use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Gray level at or above which a pixel counts as background.
pub const BACKGROUND_THRESHOLD: u8 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Crop rectangle in pixel coordinates, `right` and `lower` exclusive.
pub struct CropRect {
    pub left: u32,
    pub upper: u32,
    pub right: u32,
    pub lower: u32,
}

impl CropRect {
    pub fn new(left: u32, upper: u32, right: u32, lower: u32) -> Self {
        Self {
            left,
            upper,
            right,
            lower,
        }
    }

    /// True when the rectangle is non-empty and lies inside a `width`×`height` image.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.left < self.right
            && self.right <= width
            && self.upper < self.lower
            && self.lower <= height
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.lower - self.upper
    }
}

/// Returns the sub-rectangle, or `None` if it does not fit the image.
pub fn crop(img: &RgbImage, rect: CropRect) -> Option<RgbImage> {
    if !rect.fits(img.width(), img.height()) {
        return None;
    }
    Some(imageops::crop_imm(img, rect.left, rect.upper, rect.width(), rect.height()).to_image())
}

/// Rotate counterclockwise by whole degrees about the centre.
///
/// The canvas keeps its size, so corners can clip and uncovered area is
/// filled black. Half turns, and quarter turns of square images, are exact.
pub fn rotate(img: &RgbImage, degrees: i32) -> RgbImage {
    let turn = degrees.rem_euclid(360);
    let square = img.width() == img.height();
    match turn {
        0 => img.clone(),
        180 => imageops::rotate180(img),
        90 if square => imageops::rotate270(img),
        270 if square => imageops::rotate90(img),
        _ => rotate_nearest(img, turn),
    }
}

/// Inverse-maps each output pixel centre onto the source and takes the
/// pixel it lands in.
fn rotate_nearest(img: &RgbImage, degrees: i32) -> RgbImage {
    let (w, h) = img.dimensions();
    let theta = (degrees as f64).to_radians();
    // Trig results are rounded so quarter turns map onto exact offsets.
    let cos = round15(theta.cos());
    let sin = round15(theta.sin());
    let cx = w as f64 / 2.0;
    let cy = h as f64 / 2.0;

    RgbImage::from_fn(w, h, |x, y| {
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        let sx = (cos * dx - sin * dy + cx).floor();
        let sy = (sin * dx + cos * dy + cy).floor();
        if sx >= 0.0 && sy >= 0.0 && sx < w as f64 && sy < h as f64 {
            *img.get_pixel(sx as u32, sy as u32)
        } else {
            Rgb([0, 0, 0])
        }
    })
}

fn round15(v: f64) -> f64 {
    (v * 1e15).round() / 1e15
}

/// Mirror left to right.
pub fn flip(img: &RgbImage) -> RgbImage {
    imageops::flip_horizontal(img)
}

/// Lanczos resample to exactly `width`×`height`. Zero dimensions are rejected.
pub fn resize(img: &RgbImage, width: u32, height: u32) -> Option<RgbImage> {
    if width == 0 || height == 0 {
        return None;
    }
    Some(imageops::resize(img, width, height, FilterType::Lanczos3))
}

/// Double both dimensions.
pub fn upscale_2x(img: &RgbImage) -> Option<RgbImage> {
    let width = img.width().checked_mul(2)?;
    let height = img.height().checked_mul(2)?;
    resize(img, width, height)
}

/// Gray value used for background classification, 14-bit fixed point.
pub fn background_gray(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    ((r * 4_899 + g * 9_617 + b * 1_868 + (1 << 13)) >> 14) as u8
}

/// Blacks out every pixel whose gray value reaches the background threshold.
pub fn remove_background(img: &RgbImage) -> RgbImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        if background_gray(px.0) >= BACKGROUND_THRESHOLD {
            *px = Rgb([0, 0, 0]);
        }
    }
    out
}
