//! In-memory asset storage implementation for testing

use std::sync::Mutex;

use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::assets::{extension_of, is_allowed_extension, sanitize_filename, Asset, AssetStorage};
use crate::config::AssetsConfig;
use crate::error::ServiceError;

struct MockEntry {
    asset: Asset,
    data: Vec<u8>,
    // Insertion sequence, breaks mtime ties in list ordering
    seq: u64,
}

struct MockState {
    entries: Vec<MockEntry>,
    next_seq: u64,
}

/// Mock asset store with the same validation semantics as the local store,
/// holding everything in memory.
pub struct MockAssetStore {
    state: Mutex<MockState>,
    allowed_extensions: Vec<String>,
    max_file_size: u64,
}

impl MockAssetStore {
    pub fn new(config: &AssetsConfig) -> Self {
        Self {
            state: Mutex::new(MockState {
                entries: Vec::new(),
                next_seq: 0,
            }),
            allowed_extensions: config.allowed_extensions.clone(),
            max_file_size: config.max_file_size,
        }
    }

    /// Raw bytes of a stored asset, for test assertions.
    pub fn content_of(&self, filename: &str) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state
            .entries
            .iter()
            .find(|e| e.asset.filename == filename)
            .map(|e| e.data.clone())
    }
}

impl AssetStorage for MockAssetStore {
    fn store(&self, original_name: &str, content: &[u8]) -> Result<Asset, ServiceError> {
        if original_name.is_empty() {
            return Err(ServiceError::Validation("No file selected".to_string()));
        }
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

        let asset = Asset {
            filename: format!("{}.{}", Uuid::new_v4().simple(), ext),
            size: content.len() as u64,
            upload_time: Utc::now(),
        };

        let mut state = self.state.lock().unwrap();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.push(MockEntry {
            asset: asset.clone(),
            data: content.to_vec(),
            seq,
        });

        info!("Mock-stored asset {} ({} bytes)", asset.filename, asset.size);
        Ok(asset)
    }

    fn list(&self) -> Result<Vec<Asset>, ServiceError> {
        let state = self.state.lock().unwrap();
        let mut entries: Vec<(&MockEntry, u64)> =
            state.entries.iter().map(|e| (e, e.seq)).collect();
        entries.sort_by(|a, b| {
            b.0.asset
                .upload_time
                .cmp(&a.0.asset.upload_time)
                .then(b.1.cmp(&a.1))
        });
        Ok(entries.into_iter().map(|(e, _)| e.asset.clone()).collect())
    }

    fn delete(&self, filename: &str) -> Result<(), ServiceError> {
        let mut state = self.state.lock().unwrap();
        let before = state.entries.len();
        state.entries.retain(|e| e.asset.filename != filename);
        if state.entries.len() == before {
            return Err(ServiceError::NotFound(filename.to_string()));
        }
        Ok(())
    }
}
