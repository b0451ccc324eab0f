use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine as _;
use chrono::Utc;
use thiserror::Error;

use crate::error::Result;
use crate::kv::KeyValueStore;
use crate::model::MediaItem;
use crate::notify::Notifier;
use crate::slug::generate_id;
use crate::storage::StorageAccessor;

pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} is not a supported image (png, jpeg, gif, webp, svg)")]
    NotAnImage { name: String },

    #[error("{name} is {size} bytes; images may be at most {max} bytes")]
    TooLarge { name: String, size: u64, max: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: &'static str,
    pub size: u64,
    pub data_uri: String,
}

/// Reads an image file into a `data:` URI after checking type and size.
pub fn read_image_file(path: &Path) -> Result<ImageData, MediaError> {
    let name = display_name(path);
    let read_err = |source| MediaError::Read {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(read_err)?.len();
    if size > MAX_IMAGE_BYTES {
        return Err(MediaError::TooLarge {
            name,
            size,
            max: MAX_IMAGE_BYTES,
        });
    }

    let bytes = std::fs::read(path).map_err(read_err)?;
    image_data_from_bytes(&name, &bytes)
}

pub fn image_data_from_bytes(name: &str, bytes: &[u8]) -> Result<ImageData, MediaError> {
    let size = bytes.len() as u64;
    if size > MAX_IMAGE_BYTES {
        return Err(MediaError::TooLarge {
            name: name.to_owned(),
            size,
            max: MAX_IMAGE_BYTES,
        });
    }

    let Some(mime_type) = sniff_image_type(name, bytes) else {
        return Err(MediaError::NotAnImage {
            name: name.to_owned(),
        });
    };

    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(ImageData {
        mime_type,
        size,
        data_uri: format!("data:{mime_type};base64,{encoded}"),
    })
}

fn sniff_image_type(name: &str, bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]) {
        return Some("image/png");
    }
    if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    let is_svg_name = name.to_ascii_lowercase().ends_with(".svg");
    let text = String::from_utf8_lossy(bytes);
    if is_svg_name && text.contains("<svg") {
        return Some("image/svg+xml");
    }
    None
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[derive(Debug)]
pub struct MediaLibrary<S> {
    storage: Arc<StorageAccessor<S>>,
}

impl<S: KeyValueStore> MediaLibrary<S> {
    pub fn new(storage: Arc<StorageAccessor<S>>) -> Self {
        Self { storage }
    }

    pub fn items(&self) -> Result<Vec<MediaItem>> {
        Ok(self.storage.get_media()?)
    }

    pub fn get(&self, id: &str) -> Result<Option<MediaItem>> {
        Ok(self.items()?.into_iter().find(|m| m.id == id))
    }

    pub fn upload(&self, path: &Path, notifier: &dyn Notifier) -> Result<Option<MediaItem>> {
        let image = match read_image_file(path) {
            Ok(image) => image,
            Err(err) => {
                notifier.error(&err.to_string());
                return Ok(None);
            }
        };

        let item = MediaItem {
            id: generate_id(),
            name: display_name(path),
            mime_type: image.mime_type.to_owned(),
            size: image.size,
            data_uri: image.data_uri,
            uploaded_at: Utc::now(),
        };
        let mut items = self.items()?;
        items.push(item.clone());
        self.storage.save_media(&items)?;

        notifier.success(&format!("Uploaded {}", item.name));
        tracing::info!(media_id = %item.id, size = item.size, "stored media item");
        Ok(Some(item))
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut items = self.items()?;
        let before = items.len();
        items.retain(|m| m.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.storage.save_media(&items)?;
        Ok(true)
    }
}
