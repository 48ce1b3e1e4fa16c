//! JSON-document-backed record storage implementation

use std::fs;
use std::io;
use std::path::PathBuf;

use log::{info, warn};

use crate::config::RecordsConfig;
use crate::error::ServiceError;
use crate::records::{NewReview, RecordStorage, Review};

/// Record store backed by a single JSON document holding the ordered array
/// of reviews. Every insert rewrites the whole document; the write goes to a
/// temp file first and is renamed into place so readers never observe a
/// partial document. Single-writer assumption, no locking.
pub struct JsonRecordStore {
    db_path: PathBuf,
}

impl JsonRecordStore {
    pub fn new(config: &RecordsConfig) -> Self {
        let db_path = PathBuf::from(&config.db_path);
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).expect("Failed to create record store directory");
            }
        }
        info!("Using review document: {}", db_path.display());
        Self { db_path }
    }

    fn document_name(&self) -> String {
        self.db_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "reviews.json".to_string())
    }

    /// Strict read of the backing document: missing file is an empty
    /// collection, malformed JSON is a `Parse` error for the caller to
    /// decide about.
    fn read_document(&self) -> Result<Vec<Review>, ServiceError> {
        let content = match fs::read_to_string(&self.db_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ServiceError::StorageIo {
                    op: "read",
                    path: self.document_name(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&content).map_err(|e| ServiceError::Parse(e.to_string()))
    }

    fn write_document(&self, reviews: &[Review]) -> Result<(), ServiceError> {
        let body = serde_json::to_vec_pretty(reviews).map_err(|e| ServiceError::StorageIo {
            op: "serialize",
            path: self.document_name(),
            source: e.into(),
        })?;

        let tmp_path = self.db_path.with_extension("json.tmp");
        fs::write(&tmp_path, &body).map_err(|e| ServiceError::StorageIo {
            op: "write",
            path: self.document_name(),
            source: e,
        })?;
        fs::rename(&tmp_path, &self.db_path).map_err(|e| ServiceError::StorageIo {
            op: "rename",
            path: self.document_name(),
            source: e,
        })
    }
}

impl RecordStorage for JsonRecordStore {
    fn load_all(&self) -> Result<Vec<Review>, ServiceError> {
        match self.read_document() {
            Ok(reviews) => Ok(reviews),
            Err(ServiceError::Parse(cause)) => {
                // Lossy-but-available: a corrupt document reads as empty.
                // The next successful insert overwrites it.
                warn!(
                    "Review document is not valid JSON ({}), treating collection as empty",
                    cause
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn insert(&self, fields: NewReview) -> Result<Review, ServiceError> {
        let review = fields.into_review()?;

        let mut reviews = self.load_all()?;
        reviews.insert(0, review.clone());
        self.write_document(&reviews)?;

        info!("Inserted review {} for {}", review.id, review.name);
        Ok(review)
    }
}
