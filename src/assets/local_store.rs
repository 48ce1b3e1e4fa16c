//! Directory-backed asset storage implementation

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{info, warn};
use uuid::Uuid;

use crate::assets::{extension_of, is_allowed_extension, sanitize_filename, Asset, AssetStorage};
use crate::config::AssetsConfig;
use crate::error::ServiceError;

/// Asset store backed by a flat directory of files.
///
/// The directory itself is the catalog: every file whose extension is in the
/// allow-set counts as a stored asset, and size/mtime are re-read from disk
/// on every enumeration.
pub struct LocalAssetStore {
    upload_dir: PathBuf,
    allowed_extensions: Vec<String>,
    max_file_size: u64,
}

impl LocalAssetStore {
    pub fn new(config: &AssetsConfig) -> Self {
        let upload_dir = PathBuf::from(&config.upload_dir);
        if !upload_dir.exists() {
            fs::create_dir_all(&upload_dir).expect("Failed to create upload directory");
        }
        info!("Using upload directory: {}", upload_dir.display());

        Self {
            upload_dir,
            allowed_extensions: config.allowed_extensions.clone(),
            max_file_size: config.max_file_size,
        }
    }

    fn asset_path(&self, filename: &str) -> PathBuf {
        self.upload_dir.join(filename)
    }

    /// Generate a `<32-hex-token>.<ext>` name that does not exist yet.
    ///
    /// A 128-bit random token cannot realistically collide, but existence is
    /// still checked before the write and the token regenerated once.
    fn unique_filename(&self, ext: &str) -> String {
        let candidate = format!("{}.{}", Uuid::new_v4().simple(), ext);
        if self.asset_path(&candidate).exists() {
            warn!("Storage name collision on {}, regenerating", candidate);
            return format!("{}.{}", Uuid::new_v4().simple(), ext);
        }
        candidate
    }

    fn io_error(op: &'static str, path: &str, source: io::Error) -> ServiceError {
        ServiceError::StorageIo {
            op,
            path: path.to_string(),
            source,
        }
    }
}

impl AssetStorage for LocalAssetStore {
    fn store(&self, original_name: &str, content: &[u8]) -> Result<Asset, ServiceError> {
        if original_name.is_empty() {
            return Err(ServiceError::Validation("No file selected".to_string()));
        }
        // Extension is checked on the raw name, before sanitization.
        if !is_allowed_extension(original_name, &self.allowed_extensions) {
            return Err(ServiceError::Validation(format!(
                "Invalid file type. Please upload {} files.",
                self.allowed_extensions.join(", ").to_uppercase()
            )));
        }
        if content.len() as u64 > self.max_file_size {
            return Err(ServiceError::PayloadTooLarge {
                limit: self.max_file_size,
            });
        }

        let sanitized = sanitize_filename(original_name);
        let ext = extension_of(&sanitized).ok_or_else(|| {
            ServiceError::Validation("Filename is unusable after sanitization".to_string())
        })?;

        let filename = self.unique_filename(&ext);
        let path = self.asset_path(&filename);
        fs::write(&path, content).map_err(|e| Self::io_error("write", &filename, e))?;

        // Verify the write landed fully before reporting success.
        let meta = fs::metadata(&path).map_err(|e| Self::io_error("verify", &filename, e))?;
        if meta.len() != content.len() as u64 {
            let _ = fs::remove_file(&path);
            return Err(Self::io_error(
                "verify",
                &filename,
                io::Error::new(io::ErrorKind::UnexpectedEof, "incomplete write"),
            ));
        }

        let upload_time = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        info!("Stored asset {} ({} bytes)", filename, meta.len());
        Ok(Asset {
            filename,
            size: meta.len(),
            upload_time,
        })
    }

    fn list(&self) -> Result<Vec<Asset>, ServiceError> {
        let mut assets = Vec::new();
        let entries = match fs::read_dir(&self.upload_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(assets),
            Err(e) => return Err(Self::io_error("list", "upload directory", e)),
        };

        for entry in entries {
            let entry = entry.map_err(|e| Self::io_error("list", "upload directory", e))?;
            let filename = entry.file_name().to_string_lossy().into_owned();
            if !is_allowed_extension(&filename, &self.allowed_extensions) {
                continue;
            }
            let meta = match fs::metadata(entry.path()) {
                Ok(meta) => meta,
                // Entry vanished between read_dir and stat; the delete/list
                // race is benign, skip it.
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(Self::io_error("stat", &filename, e)),
            };
            if !meta.is_file() {
                continue;
            }
            let upload_time = meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            assets.push(Asset {
                filename,
                size: meta.len(),
                upload_time,
            });
        }

        assets.sort_by(|a, b| b.upload_time.cmp(&a.upload_time));
        Ok(assets)
    }

    fn delete(&self, filename: &str) -> Result<(), ServiceError> {
        // Storage names never contain separators; anything else is not ours.
        if filename.is_empty() || filename.contains('/') || filename.contains('\\') {
            return Err(ServiceError::Validation("Invalid filename".to_string()));
        }
        let path = self.asset_path(filename);
        if !path.exists() {
            return Err(ServiceError::NotFound(filename.to_string()));
        }
        fs::remove_file(&path).map_err(|e| Self::io_error("delete", filename, e))?;
        info!("Deleted asset {}", filename);
        Ok(())
    }
}
