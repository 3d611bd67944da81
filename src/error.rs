use std::path::PathBuf;

use thiserror::Error;

/// User-facing failures. None of these are fatal; the session is left as it was.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot save {}: use a .png, .jpg or .jpeg extension", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("no image loaded")]
    NothingToSave,
}
