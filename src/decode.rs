use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};

static RAW_EXTS: &[&str] = &["raf", "dng", "nef", "cr2", "arw"];
static SUPPORTED_IMAGE_EXTS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp", "raf", "dng", "nef", "cr2", "arw",
];

fn has_extension(path: &Path, exts: &[&str]) -> bool {
    let Some(ext) = path.extension().map(|e| e.to_string_lossy()) else {
        return false;
    };
    exts.iter().any(|known| ext.eq_ignore_ascii_case(known))
}

pub fn is_raw_image(path: &Path) -> bool {
    has_extension(path, RAW_EXTS)
}

/// Returns `true` if the path has a supported image extension.
pub fn is_supported_image(path: &Path) -> bool {
    has_extension(path, SUPPORTED_IMAGE_EXTS)
}

/// Extensions offered by the open dialog and accepted on drop.
pub fn supported_extensions() -> &'static [&'static str] {
    SUPPORTED_IMAGE_EXTS
}

/// Decode any supported file as 8-bit RGB, dropping alpha.
///
/// Camera RAW files the image crate rejects are developed with rawler.
pub fn open_rgb(path: &Path) -> anyhow::Result<RgbImage> {
    match image::open(path) {
        Ok(img) => Ok(img.into_rgb8()),
        Err(err) if !is_raw_image(path) => Err(err.into()),
        Err(_) => develop_raw(path),
    }
}

fn develop_raw(path: &Path) -> anyhow::Result<RgbImage> {
    let raw = rawler::decode_file(path)?;
    let developed = rawler::imgop::develop::RawDevelop::default().develop_intermediate(&raw)?;
    developed
        .to_dynamic_image()
        .map(|img| img.into_rgb8())
        .ok_or_else(|| anyhow::anyhow!("{} developed to an empty image", path.display()))
}

/// Output encoding picked from the destination extension.
pub fn output_format(path: &Path) -> Option<ImageFormat> {
    if has_extension(path, &["png"]) {
        Some(ImageFormat::Png)
    } else if has_extension(path, &["jpg", "jpeg"]) {
        Some(ImageFormat::Jpeg)
    } else {
        None
    }
}

/// Destination path with `.png` appended when no extension was given.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}
