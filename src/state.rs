use std::ops::RangeInclusive;

pub const BRIGHTNESS_RANGE: RangeInclusive<f32> = 0.0..=3.0;
pub const CONTRAST_RANGE: RangeInclusive<f32> = 0.0..=3.0;
pub const SHARPNESS_RANGE: RangeInclusive<f32> = 0.0..=5.0;
pub const SATURATION_RANGE: RangeInclusive<f32> = 0.0..=3.0;
pub const HIGHLIGHTS_RANGE: RangeInclusive<f32> = 0.0..=100.0;
pub const BLUR_RANGE: RangeInclusive<f32> = 0.0..=10.0;
pub const NOISE_REDUCTION_RANGE: RangeInclusive<f32> = 0.0..=100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Slider-driven adjustment parameters, always rendered against the original.
pub struct Adjustments {
    pub brightness: f32,
    pub contrast: f32,
    pub sharpness: f32,
    pub saturation: f32,
    pub highlights: f32,
    pub blur: f32,
    pub noise_reduction: f32,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            sharpness: 1.0,
            saturation: 1.0,
            highlights: 0.0,
            blur: 0.0,
            noise_reduction: 0.0,
        }
    }
}

impl Adjustments {
    /// Returns a copy with every field clamped into its slider range.
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            brightness: clamp_or(self.brightness, BRIGHTNESS_RANGE, d.brightness),
            contrast: clamp_or(self.contrast, CONTRAST_RANGE, d.contrast),
            sharpness: clamp_or(self.sharpness, SHARPNESS_RANGE, d.sharpness),
            saturation: clamp_or(self.saturation, SATURATION_RANGE, d.saturation),
            highlights: clamp_or(self.highlights, HIGHLIGHTS_RANGE, d.highlights),
            blur: clamp_or(self.blur, BLUR_RANGE, d.blur),
            noise_reduction: clamp_or(
                self.noise_reduction,
                NOISE_REDUCTION_RANGE,
                d.noise_reduction,
            ),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn clamp_or(value: f32, range: RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        fallback
    }
}
