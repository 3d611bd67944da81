use std::borrow::Cow;

use image::RgbImage;
use image::imageops::{self, FilterType};

/// Bounding box for the on-screen preview.
pub const PREVIEW_MAX_W: u32 = 600;
pub const PREVIEW_MAX_H: u32 = 400;

/// Largest size that fits inside `max_w`×`max_h`, keeping aspect. Never upscales.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 || (width <= max_w && height <= max_h) {
        return (width, height);
    }
    let scale = (max_w as f64 / width as f64).min(max_h as f64 / height as f64);
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

/// Display copy of `img`, downscaled to the preview box when needed.
pub fn preview_image(img: &RgbImage) -> Cow<'_, RgbImage> {
    let (w, h) = fit_within(img.width(), img.height(), PREVIEW_MAX_W, PREVIEW_MAX_H);
    if (w, h) == img.dimensions() {
        Cow::Borrowed(img)
    } else {
        Cow::Owned(imageops::resize(img, w, h, FilterType::Lanczos3))
    }
}

pub fn to_color_image(img: &RgbImage) -> egui::ColorImage {
    let preview = preview_image(img);
    egui::ColorImage::from_rgb(
        [preview.width() as usize, preview.height() as usize],
        preview.as_raw(),
    )
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb};

    use super::{fit_within, preview_image, to_color_image};

    #[test]
    fn small_images_are_left_alone() {
        assert_eq!(fit_within(300, 200, 600, 400), (300, 200));
    }

    #[test]
    fn landscape_is_bounded_by_width() {
        assert_eq!(fit_within(1200, 400, 600, 400), (600, 200));
    }

    #[test]
    fn portrait_is_bounded_by_height() {
        assert_eq!(fit_within(1000, 2000, 600, 400), (200, 400));
    }

    #[test]
    fn preview_never_mutates_source() {
        let img = ImageBuffer::from_pixel(1200, 100, Rgb([9u8, 8, 7]));
        let copy = img.clone();
        let preview = preview_image(&img);
        assert_eq!(preview.dimensions(), (600, 50));
        assert_eq!(img, copy);
    }

    #[test]
    fn color_image_matches_preview_size() {
        let img = ImageBuffer::from_pixel(10, 4, Rgb([1u8, 2, 3]));
        let ci = to_color_image(&img);
        assert_eq!(ci.size, [10, 4]);
        assert_eq!(ci.pixels[0], egui::Color32::from_rgb(1, 2, 3));
    }
}
