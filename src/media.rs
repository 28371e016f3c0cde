//! Local storage for uploaded product images.
//!
//! Files live in one directory and are served publicly under [`PUBLIC_PREFIX`].

use crate::model::PLACEHOLDER_IMAGE;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

pub const PUBLIC_PREFIX: &str = "/uploads";

/// Extensions and the content types a browser may declare for them.
const ALLOWED: &[(&str, &[&str])] = &[
    ("jpg", &["image/jpeg", "image/jpg"]),
    ("jpeg", &["image/jpeg", "image/jpg"]),
    ("png", &["image/png"]),
    ("webp", &["image/webp"]),
];

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Images only (jpg, jpeg, png, webp)")]
    UnsupportedType,

    #[error("No image provided")]
    MissingFile,

    #[error("Media storage failure: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores an image and returns its public path.
    ///
    /// Both the file extension and, when given, the declared content type must name a
    /// supported image format.
    pub async fn save(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, MediaError> {
        if bytes.is_empty() {
            return Err(MediaError::MissingFile);
        }
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or(MediaError::UnsupportedType)?;
        let (ext, mimes) = ALLOWED
            .iter()
            .find(|(allowed, _)| *allowed == ext)
            .ok_or(MediaError::UnsupportedType)?;
        if content_type
            .is_some_and(|declared| !mimes.iter().any(|m| declared.eq_ignore_ascii_case(m)))
        {
            return Err(MediaError::UnsupportedType);
        }

        tokio::fs::create_dir_all(&self.root).await?;
        let file_name = format!("{}.{ext}", Uuid::new_v4());
        tokio::fs::write(self.root.join(&file_name), bytes).await?;
        info!(file = %file_name, size = bytes.len(), "Image stored");
        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }

    /// Deletes a previously stored image.
    ///
    /// Returns `Ok(false)` for the placeholder, for references outside this store and
    /// for files that are already gone.
    pub async fn remove(&self, public_path: &str) -> Result<bool, MediaError> {
        let Some(file_name) = self.owned_file(public_path) else {
            debug!(path = public_path, "Not a stored image, skipping removal");
            return Ok(false);
        };
        match tokio::fs::remove_file(self.root.join(file_name)).await {
            Ok(()) => {
                info!(file = file_name, "Image removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn owned_file<'a>(&self, public_path: &'a str) -> Option<&'a str> {
        if public_path == PLACEHOLDER_IMAGE {
            return None;
        }
        let name = public_path.strip_prefix(PUBLIC_PREFIX)?.strip_prefix('/')?;
        let plain = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != ".."
            && name != ".";
        plain.then_some(name)
    }
}
