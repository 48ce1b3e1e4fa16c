//! Asset Storage Layer Abstraction
//!
//! This module provides an abstraction over asset storage backends. The
//! catalog of stored images is always derived from backend state on demand;
//! there is no separate index that could drift out of sync.

pub mod local_store;
pub mod mock_store;


use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ServiceError;

/// A stored image plus its filesystem-derived metadata.
///
/// The original client-supplied name is not retained; the server-generated
/// `filename` is authoritative.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Asset {
    /// Unique storage name, `<32-hex-token>.<ext>`
    pub filename: String,
    /// Size in bytes, read from the backend at enumeration time
    pub size: u64,
    /// Modification time, read from the backend at enumeration time
    pub upload_time: DateTime<Utc>,
}

impl Asset {
    /// Relative URL path the static file route serves this asset under.
    pub fn url(&self) -> String {
        format!("/uploads/{}", self.filename)
    }
}

/// Trait defining the asset storage interface
pub trait AssetStorage: Send + Sync {
    /// Validate and persist an upload, returning the stored asset.
    fn store(&self, original_name: &str, content: &[u8]) -> Result<Asset, ServiceError>;

    /// Enumerate all stored assets, most recently modified first.
    fn list(&self) -> Result<Vec<Asset>, ServiceError>;

    /// Remove a stored asset by its storage name.
    fn delete(&self, filename: &str) -> Result<(), ServiceError>;
}

/// Lowercase extension after the last `.`, if the name has one.
pub fn extension_of(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())
}

/// True iff `name` contains a `.` and its lowercased suffix is in `allowed`.
pub fn is_allowed_extension(name: &str, allowed: &[String]) -> bool {
    match extension_of(name) {
        Some(ext) => allowed.iter().any(|a| *a == ext),
        None => false,
    }
}

/// Strip path components and unsafe characters from a client-supplied name.
///
/// Runs after the extension check, never before, so it cannot corrupt that
/// check. Whitespace becomes `_`; anything outside `[A-Za-z0-9._-]` is
/// dropped.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}
