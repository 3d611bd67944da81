use image::RgbImage;

use super::blend;

// 3x3 smoothing kernel, centre weight 5, normalised by 13.
const SMOOTH_CENTER: u32 = 5;
const SMOOTH_DIVISOR: u32 = 13;

/// Blends between a smoothed copy (0.0) and the original (1.0, identity).
/// Factors above 1.0 extrapolate away from the smoothed copy and sharpen.
pub fn apply(img: RgbImage, factor: f32) -> RgbImage {
    if factor == 1.0 {
        return img;
    }
    let smoothed = smooth(&img);
    blend(&img, factor, |x, y| smoothed.get_pixel(x, y).0)
}

/// 3x3 smoothing pass. The one-pixel border is copied through unchanged.
fn smooth(img: &RgbImage) -> RgbImage {
    let (w, h) = img.dimensions();
    let mut out = img.clone();
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut acc = [0u32; 3];
            for dy in 0..3 {
                for dx in 0..3 {
                    let weight = if dx == 1 && dy == 1 { SMOOTH_CENTER } else { 1 };
                    let p = img.get_pixel(x + dx - 1, y + dy - 1);
                    for c in 0..3 {
                        acc[c] += p[c] as u32 * weight;
                    }
                }
            }
            let px = out.get_pixel_mut(x, y);
            for c in 0..3 {
                px[c] = ((acc[c] + SMOOTH_DIVISOR / 2) / SMOOTH_DIVISOR) as u8;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb, RgbImage};

    use super::{apply, smooth};

    fn edge() -> RgbImage {
        // Left half dark, right half bright.
        ImageBuffer::from_fn(8, 5, |x, _| {
            if x < 4 {
                Rgb([50, 50, 50])
            } else {
                Rgb([200, 200, 200])
            }
        })
    }

    #[test]
    fn unit_sharpness_is_identity() {
        let img = edge();
        assert_eq!(apply(img.clone(), 1.0), img);
    }

    #[test]
    fn flat_image_survives_any_factor() {
        let img = ImageBuffer::from_pixel(6, 6, Rgb([128u8, 64, 32]));
        assert_eq!(apply(img.clone(), 4.0), img);
        assert_eq!(apply(img.clone(), 0.0), img);
    }

    #[test]
    fn smoothing_keeps_border_pixels() {
        let img = edge();
        let s = smooth(&img);
        for x in 0..8 {
            assert_eq!(s.get_pixel(x, 0), img.get_pixel(x, 0));
            assert_eq!(s.get_pixel(x, 4), img.get_pixel(x, 4));
        }
    }

    #[test]
    fn sharpening_raises_edge_contrast() {
        let img = edge();
        let out = apply(img.clone(), 3.0);
        assert!(out.get_pixel(3, 2)[0] < img.get_pixel(3, 2)[0]);
        assert!(out.get_pixel(4, 2)[0] > img.get_pixel(4, 2)[0]);
    }

    #[test]
    fn softening_lowers_edge_contrast() {
        let img = edge();
        let out = apply(img.clone(), 0.0);
        assert!(out.get_pixel(3, 2)[0] > img.get_pixel(3, 2)[0]);
        assert!(out.get_pixel(4, 2)[0] < img.get_pixel(4, 2)[0]);
    }
}
