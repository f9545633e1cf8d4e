//! Recipe image storage
//!
//! Images arrive as `data:image/<type>;base64,<payload>` strings and are
//! written under `MEDIA_ROOT/recipes/images/`. Recipes store the path
//! relative to the media root.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use foodgram_common::MediaConfig;
use foodgram_core::DomainError;
use tracing::{debug, warn};
use uuid::Uuid;

/// Directory under the media root that recipe images go to
pub const RECIPE_IMAGE_DIR: &str = "recipes/images";

/// Accepted `data:` media types and the extension they are stored with
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Decoded image payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Parse and decode a base64 image data URI
pub fn decode_data_uri(value: &str, max_bytes: usize) -> Result<DecodedImage, DomainError> {
    let rest = value
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| DomainError::InvalidImage("expected a data URI".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DomainError::InvalidImage("missing image payload".to_string()))?;
    let media_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| DomainError::InvalidImage("image must be base64 encoded".to_string()))?;

    let extension = IMAGE_TYPES
        .iter()
        .find(|(accepted, _)| accepted.eq_ignore_ascii_case(media_type))
        .map(|(_, ext)| *ext)
        .ok_or_else(|| {
            DomainError::InvalidImage(format!("unsupported image type '{media_type}'"))
        })?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| DomainError::InvalidImage(format!("invalid base64 payload: {e}")))?;
    if bytes.is_empty() {
        return Err(DomainError::InvalidImage("image is empty".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(DomainError::InvalidImage(format!(
            "image exceeds {max_bytes} bytes"
        )));
    }

    Ok(DecodedImage { extension, bytes })
}

/// Writes and removes recipe images on the local filesystem
#[derive(Debug, Clone)]
pub struct ImageStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl ImageStorage {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(config.root.clone(), config.max_image_bytes())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decode a data URI and store it; returns the path relative to the root
    pub async fn save(&self, data_uri: &str) -> Result<String, DomainError> {
        let image = decode_data_uri(data_uri, self.max_bytes)?;
        let relative = format!("{RECIPE_IMAGE_DIR}/{}.{}", Uuid::new_v4(), image.extension);

        let dir = self.root.join(RECIPE_IMAGE_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| DomainError::InternalError(format!("failed to create {}: {e}", dir.display())))?;
        tokio::fs::write(self.root.join(&relative), &image.bytes)
            .await
            .map_err(|e| DomainError::InternalError(format!("failed to write image: {e}")))?;

        debug!(path = %relative, size = image.bytes.len(), "Stored recipe image");
        Ok(relative)
    }

    /// Remove a stored image. Failures are logged and otherwise ignored.
    pub async fn remove(&self, relative: &str) {
        if relative.is_empty() || relative.contains("..") {
            return;
        }
        if let Err(e) = tokio::fs::remove_file(self.root.join(relative)).await {
            warn!(path = %relative, error = %e, "Failed to remove recipe image");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_decode_png() {
        let image = decode_data_uri(&format!("data:image/png;base64,{PNG}"), 1024).unwrap();
        assert_eq!(image.extension, "png");
        assert!(image.bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_jpeg_is_stored_as_jpg() {
        let image = decode_data_uri(&format!("data:image/jpeg;base64,{PNG}"), 1024).unwrap();
        assert_eq!(image.extension, "jpg");
    }

    #[test]
    fn test_rejects_malformed_uris() {
        let cases = [
            PNG.to_string(),
            "data:image/png;base64".to_string(),
            format!("data:image/png,{PNG}"),
            format!("data:image/svg+xml;base64,{PNG}"),
            "data:image/png;base64,@@@".to_string(),
            "data:image/png;base64,".to_string(),
        ];
        for case in cases {
            assert!(
                matches!(decode_data_uri(&case, 1024), Err(DomainError::InvalidImage(_))),
                "accepted {case}"
            );
        }
    }

    #[test]
    fn test_rejects_oversized_images() {
        let err = decode_data_uri(&format!("data:image/png;base64,{PNG}"), 10).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[tokio::test]
    async fn test_save_and_remove() {
        let root = std::env::temp_dir().join(format!("foodgram-media-{}", Uuid::new_v4()));
        let storage = ImageStorage::new(&root, 1024);

        let relative = storage
            .save(&format!("data:image/png;base64,{PNG}"))
            .await
            .unwrap();
        assert!(relative.starts_with("recipes/images/"));
        assert!(relative.ends_with(".png"));
        assert!(root.join(&relative).exists());

        storage.remove(&relative).await;
        assert!(!root.join(&relative).exists());

        let _ = std::fs::remove_dir_all(root);
    }
}
