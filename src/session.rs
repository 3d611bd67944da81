use std::path::Path;

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::decode;
use crate::error::EditorError;
use crate::processing::{self, transform};
use crate::state::Adjustments;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Loaded,
}

struct Images {
    /// As loaded; never modified afterwards.
    original: RgbImage,
    /// Accumulates discrete transforms.
    working: RgbImage,
    rendered: RgbImage,
}

/// Owns the loaded image and everything derived from it.
///
/// Slider adjustments always re-render from the original. Transforms stack
/// onto the working image, and the most recent of the two is what
/// [`EditSession::rendered`] returns.
#[derive(Default)]
pub struct EditSession {
    adjustments: Adjustments,
    images: Option<Images>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.images.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Empty
        }
    }

    pub fn adjustments(&self) -> &Adjustments {
        &self.adjustments
    }

    pub fn original(&self) -> Option<&RgbImage> {
        self.images.as_ref().map(|i| &i.original)
    }

    pub fn working(&self) -> Option<&RgbImage> {
        self.images.as_ref().map(|i| &i.working)
    }

    pub fn rendered(&self) -> Option<&RgbImage> {
        self.images.as_ref().map(|i| &i.rendered)
    }

    /// Replace any current image and render it with the current adjustments.
    pub fn load(&mut self, image: RgbImage) {
        let rendered = processing::render(&image, &self.adjustments);
        self.images = Some(Images {
            working: image.clone(),
            original: image,
            rendered,
        });
    }

    /// Decode `path` and load it. On failure the session is left untouched.
    pub fn load_path(&mut self, path: &Path) -> Result<(), EditorError> {
        match decode::open_rgb(path) {
            Ok(image) => {
                info!(path = %path.display(), width = image.width(), height = image.height(), "loaded image");
                self.load(image);
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load image");
                Err(EditorError::Load {
                    path: path.to_path_buf(),
                    source: err.into(),
                })
            }
        }
    }

    /// Store `adjustments` and re-render from the original.
    ///
    /// Without an image only the adjustments are stored.
    pub fn apply_parameters(&mut self, adjustments: Adjustments) {
        self.adjustments = adjustments.clamped();
        if let Some(images) = self.images.as_mut() {
            images.rendered = processing::render(&images.original, &self.adjustments);
        }
    }

    /// Discard every transform and re-apply the current adjustments.
    pub fn reset(&mut self) -> bool {
        let Some(images) = self.images.as_mut() else {
            debug!("reset ignored: no image loaded");
            return false;
        };
        images.working = images.original.clone();
        images.rendered = processing::render(&images.original, &self.adjustments);
        debug!("reset to original");
        true
    }

    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.transform_working("resize", |img| transform::resize(img, width, height))
    }

    pub fn upscale_2x(&mut self) -> bool {
        self.transform_working("upscale_2x", transform::upscale_2x)
    }

    pub fn crop(&mut self, left: u32, upper: u32, right: u32, lower: u32) -> bool {
        let rect = transform::CropRect::new(left, upper, right, lower);
        self.transform_working("crop", |img| transform::crop(img, rect))
    }

    pub fn rotate(&mut self, angle_degrees: i32) -> bool {
        self.transform_working("rotate", |img| Some(transform::rotate(img, angle_degrees)))
    }

    pub fn flip(&mut self) -> bool {
        self.transform_working("flip", |img| Some(transform::flip(img)))
    }

    pub fn remove_background(&mut self) -> bool {
        self.transform_working("remove_background", |img| {
            Some(transform::remove_background(img))
        })
    }

    /// Encode the rendered output, format chosen by extension.
    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        let Some(images) = self.images.as_ref() else {
            return Err(EditorError::NothingToSave);
        };
        let Some(format) = decode::output_format(path) else {
            return Err(EditorError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        };
        images
            .rendered
            .save_with_format(path, format)
            .map_err(|source| {
                warn!(path = %path.display(), error = %source, "failed to save image");
                EditorError::Save {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        info!(path = %path.display(), "saved image");
        Ok(())
    }

    /// Run `op` on the working image; `None` means the input was rejected.
    fn transform_working<F>(&mut self, name: &str, op: F) -> bool
    where
        F: FnOnce(&RgbImage) -> Option<RgbImage>,
    {
        let Some(images) = self.images.as_mut() else {
            debug!(op = name, "transform ignored: no image loaded");
            return false;
        };
        let Some(next) = op(&images.working) else {
            debug!(
                op = name,
                width = images.working.width(),
                height = images.working.height(),
                "transform rejected"
            );
            return false;
        };
        debug!(op = name, width = next.width(), height = next.height(), "transform applied");
        images.rendered = next.clone();
        images.working = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb, RgbImage};

    use super::{EditSession, SessionState};
    use crate::error::EditorError;
    use crate::processing::{render, transform};
    use crate::state::Adjustments;

    fn numbered(w: u32, h: u32) -> RgbImage {
        ImageBuffer::from_fn(w, h, |x, y| Rgb([(x * 20) as u8, (y * 20) as u8, 90]))
    }

    fn loaded(w: u32, h: u32) -> EditSession {
        let mut s = EditSession::new();
        s.load(numbered(w, h));
        s
    }

    fn brighter() -> Adjustments {
        let mut adj = Adjustments::default();
        adj.brightness = 1.5;
        adj
    }

    #[test]
    fn starts_empty_and_ignores_transforms() {
        let mut s = EditSession::new();
        assert_eq!(s.state(), SessionState::Empty);
        assert!(!s.flip());
        assert!(!s.crop(0, 0, 1, 1));
        assert!(!s.reset());
        assert!(s.rendered().is_none());
        assert!(matches!(
            s.save(std::path::Path::new("out.png")),
            Err(EditorError::NothingToSave)
        ));
    }

    #[test]
    fn load_populates_all_three_images() {
        let s = loaded(4, 3);
        assert_eq!(s.state(), SessionState::Loaded);
        let img = numbered(4, 3);
        assert_eq!(s.original(), Some(&img));
        assert_eq!(s.working(), Some(&img));
        assert_eq!(s.rendered(), Some(&img));
    }

    #[test]
    fn load_renders_with_stored_adjustments() {
        let mut s = EditSession::new();
        s.apply_parameters(brighter());
        s.load(numbered(4, 4));
        assert_eq!(s.rendered(), Some(&render(&numbered(4, 4), &brighter())));
    }

    #[test]
    fn apply_parameters_rerenders_from_original_only() {
        let mut s = loaded(6, 6);
        s.flip();
        s.apply_parameters(brighter());
        let expected = render(&numbered(6, 6), &brighter());
        assert_eq!(s.rendered(), Some(&expected));
        assert_eq!(s.original(), Some(&numbered(6, 6)));
        assert_eq!(s.working(), Some(&transform::flip(&numbered(6, 6))));
    }

    #[test]
    fn transforms_accumulate_on_working() {
        let mut s = loaded(10, 10);
        assert!(s.crop(2, 2, 8, 8));
        assert!(s.crop(1, 1, 3, 4));
        assert_eq!(s.working().map(|w| w.dimensions()), Some((2, 3)));
        assert_eq!(s.rendered(), s.working());
        assert_eq!(s.original().map(|o| o.dimensions()), Some((10, 10)));
    }

    #[test]
    fn rejected_transforms_leave_state_unchanged() {
        let mut s = loaded(5, 5);
        s.apply_parameters(brighter());
        let before = s.rendered().cloned();
        assert!(!s.crop(3, 0, 2, 5));
        assert!(!s.crop(0, 0, 6, 5));
        assert!(!s.resize(0, 10));
        assert_eq!(s.rendered().cloned(), before);
        assert_eq!(s.working(), Some(&numbered(5, 5)));
    }

    #[test]
    fn resize_and_upscale_set_exact_dimensions() {
        let mut s = loaded(7, 5);
        assert!(s.resize(3, 9));
        assert_eq!(s.working().map(|w| w.dimensions()), Some((3, 9)));
        assert!(s.upscale_2x());
        assert_eq!(s.rendered().map(|w| w.dimensions()), Some((6, 18)));
    }

    #[test]
    fn reset_restores_original_and_reapplies_adjustments() {
        let mut s = loaded(8, 6);
        s.apply_parameters(brighter());
        s.rotate(90);
        s.remove_background();
        assert!(s.reset());
        assert_eq!(s.working(), Some(&numbered(8, 6)));
        assert_eq!(s.rendered(), Some(&render(&numbered(8, 6), &brighter())));
        assert_ne!(s.rendered(), s.working());
    }

    #[test]
    fn double_flip_restores_working() {
        let mut s = loaded(5, 2);
        s.flip();
        s.flip();
        assert_eq!(s.working(), Some(&numbered(5, 2)));
    }

    #[test]
    fn two_quarter_turns_on_landscape_clip_side_columns() {
        let mut s = loaded(6, 4);
        assert!(s.rotate(90));
        assert!(s.rotate(90));
        let working = s.working().unwrap();
        assert_eq!(working.dimensions(), (6, 4));
        for y in 0..4 {
            assert_eq!(working.get_pixel(0, y).0, [0, 0, 0]);
            assert_eq!(working.get_pixel(5, y).0, [0, 0, 0]);
            for x in 1..5 {
                let expected = [((5 - x) * 20) as u8, ((3 - y) * 20) as u8, 90];
                assert_eq!(working.get_pixel(x, y).0, expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn highlights_on_white_saturate() {
        let mut s = EditSession::new();
        s.load(ImageBuffer::from_pixel(4, 4, Rgb([255, 255, 255])));
        let mut adj = Adjustments::default();
        adj.highlights = 50.0;
        s.apply_parameters(adj);
        let out = s.rendered().unwrap();
        assert!(out.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn apply_parameters_stores_clamped_values() {
        let mut s = EditSession::new();
        let mut adj = Adjustments::default();
        adj.sharpness = 80.0;
        s.apply_parameters(adj);
        assert_eq!(s.adjustments().sharpness, 5.0);
    }

    #[test]
    fn save_rejects_unknown_extension() {
        let s = loaded(2, 2);
        let err = s.save(std::path::Path::new("out.gif")).unwrap_err();
        assert!(matches!(err, EditorError::UnsupportedFormat { .. }));
    }

    #[test]
    fn save_then_load_png_round_trips_rendered_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut s = loaded(6, 4);
        s.flip();
        s.save(&path).unwrap();

        let mut reopened = EditSession::new();
        reopened.load_path(&path).unwrap();
        assert_eq!(reopened.original(), s.rendered());
    }

    #[test]
    fn save_to_missing_directory_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.jpg");
        let s = loaded(3, 3);
        assert!(matches!(s.save(&path), Err(EditorError::Save { .. })));
    }

    #[test]
    fn failed_load_keeps_previous_image() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("broken.png");
        std::fs::write(&bogus, b"not an image").unwrap();

        let mut s = loaded(3, 3);
        let err = s.load_path(&bogus).unwrap_err();
        assert!(matches!(err, EditorError::Load { .. }));
        assert_eq!(s.original(), Some(&numbered(3, 3)));
    }
}
