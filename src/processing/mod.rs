pub mod color;
pub mod exposure;
pub mod filters;
pub mod sharpness;
pub mod transform;

use image::RgbImage;
use rayon::prelude::*;

use crate::state::Adjustments;

/// Render `source` through every adjustment stage, in fixed order.
///
/// Parameters are clamped first. Stages whose parameter sits at its identity
/// value are skipped, so `render(img, &Adjustments::default()) == *img`.
pub fn render(source: &RgbImage, adjustments: &Adjustments) -> RgbImage {
    let adj = adjustments.clamped();

    let mut out = source.clone();
    out = exposure::apply_brightness(out, adj.brightness);
    out = exposure::apply_contrast(out, adj.contrast);
    out = sharpness::apply(out, adj.sharpness);
    out = color::apply_saturation(out, adj.saturation);
    out = exposure::apply_highlights(out, adj.highlights);
    out = filters::apply_blur(out, adj.blur);
    out = filters::apply_noise_reduction(out, adj.noise_reduction);
    out
}

/// Interpolate from a degenerate image toward `img` by `factor`.
///
/// `degenerate` yields the reference pixel for each coordinate. Results are
/// truncated toward zero and clamped to the 8-bit range; a factor of 1.0
/// reproduces `img` exactly.
pub(crate) fn blend<F>(img: &RgbImage, factor: f32, degenerate: F) -> RgbImage
where
    F: Fn(u32, u32) -> [u8; 3] + Sync,
{
    let (w, h) = img.dimensions();
    let mut out = img.clone();
    if w == 0 || h == 0 {
        return out;
    }

    let stride = w as usize * 3;
    let raw: &mut [u8] = &mut out;
    raw.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(3).enumerate() {
                let base = degenerate(x as u32, y as u32);
                for c in 0..3 {
                    px[c] = blend_channel(base[c], px[c], factor);
                }
            }
        });
    out
}

fn blend_channel(a: u8, b: u8, factor: f32) -> u8 {
    let v = a as f32 + factor * (b as f32 - a as f32);
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}
