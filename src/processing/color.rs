use image::{GrayImage, ImageBuffer, Luma, RgbImage};

use super::blend;

/// ITU-R 601 luma in 16-bit fixed point, rounded.
pub fn luma(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    ((r * 19_595 + g * 38_470 + b * 7_471 + 0x8000) >> 16) as u8
}

/// Grayscale copy of `img` using [`luma`].
pub fn to_gray(img: &RgbImage) -> GrayImage {
    ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
        Luma([luma(img.get_pixel(x, y).0)])
    })
}

/// Mean luma of the whole image, rounded half up. Empty images yield 0.
pub fn mean_luma(img: &RgbImage) -> u8 {
    let count = img.width() as u64 * img.height() as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = img.pixels().map(|p| luma(p.0) as u64).sum();
    ((sum * 2 + count) / (count * 2)) as u8
}

/// Blends between the grayscale image (0.0) and the original (1.0).
pub fn apply_saturation(img: RgbImage, factor: f32) -> RgbImage {
    if factor == 1.0 {
        return img;
    }
    let gray = to_gray(&img);
    blend(&img, factor, |x, y| {
        let v = gray.get_pixel(x, y)[0];
        [v, v, v]
    })
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb};

    use super::{apply_saturation, luma, mean_luma};

    #[test]
    fn luma_of_gray_is_unchanged() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            assert_eq!(luma([v, v, v]), v);
        }
    }

    #[test]
    fn luma_weights_green_heaviest() {
        assert!(luma([0, 255, 0]) > luma([255, 0, 0]));
        assert!(luma([255, 0, 0]) > luma([0, 0, 255]));
    }

    #[test]
    fn mean_luma_rounds_half_up() {
        let mut img = ImageBuffer::from_pixel(2, 1, Rgb([10u8, 10, 10]));
        img.put_pixel(1, 0, Rgb([11, 11, 11]));
        assert_eq!(mean_luma(&img), 11);
    }

    #[test]
    fn zero_saturation_is_grayscale() {
        let img = ImageBuffer::from_pixel(2, 2, Rgb([200u8, 40, 90]));
        let out = apply_saturation(img, 0.0);
        let p = out.get_pixel(0, 0);
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
        assert_eq!(p[0], luma([200, 40, 90]));
    }

    #[test]
    fn boosted_saturation_pushes_channels_apart() {
        let img = ImageBuffer::from_pixel(1, 1, Rgb([160u8, 100, 100]));
        let out = apply_saturation(img, 2.0);
        let p = out.get_pixel(0, 0);
        assert!(p[0] > 160);
        assert!(p[1] < 100);
    }
}
