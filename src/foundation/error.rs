use std::path::{Path, PathBuf};

/// Convenience result type used across Slotweave.
pub type SlotweaveResult<T> = Result<T, SlotweaveError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlotweaveError {
    /// A source file could not be decoded or is missing.
    #[error("invalid image '{}': {reason}", path.display())]
    InvalidImage {
        /// Offending file path.
        path: PathBuf,
        /// Decoder or IO failure description.
        reason: String,
    },

    /// Fewer distinct assets are available than slots require.
    #[error("insufficient assets: {required} required but only {available} available")]
    InsufficientAssets {
        /// Number of distinct assets the caller asked for.
        required: usize,
        /// Number of assets in the pool.
        available: usize,
    },

    /// A template filename does not follow the `layout_<id>` /
    /// `background_<id>_<variant>` naming convention.
    #[error("invalid filename format: '{0}'")]
    InvalidFilenameFormat(String),

    /// Invalid user-provided configuration or precondition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlotweaveError {
    /// Build a [`SlotweaveError::InvalidImage`] value.
    pub fn invalid_image(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Build a [`SlotweaveError::InvalidFilenameFormat`] value.
    pub fn invalid_filename(stem: impl Into<String>) -> Self {
        Self::InvalidFilenameFormat(stem.into())
    }

    /// Build a [`SlotweaveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
