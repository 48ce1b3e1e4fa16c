//! In-memory record storage implementation for testing

use std::sync::Mutex;

use crate::error::ServiceError;
use crate::records::{NewReview, RecordStorage, Review};

/// Mock record store keeping the ordered collection in memory, with the same
/// validation and prepend semantics as the JSON-backed store.
pub struct MockRecordStore {
    reviews: Mutex<Vec<Review>>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self {
            reviews: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStorage for MockRecordStore {
    fn load_all(&self) -> Result<Vec<Review>, ServiceError> {
        Ok(self.reviews.lock().unwrap().clone())
    }

    fn insert(&self, fields: NewReview) -> Result<Review, ServiceError> {
        let review = fields.into_review()?;
        self.reviews.lock().unwrap().insert(0, review.clone());
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mock_store_prepends() {
        let store = MockRecordStore::new();
        for name in ["A", "B", "C"] {
            let fields: NewReview = serde_json::from_value(json!({
                "name": name,
                "date": "2024-05-05",
                "rating": 3,
            }))
            .unwrap();
            store.insert(fields).unwrap();
        }

        let names: Vec<String> = store
            .load_all()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_mock_store_rejects_invalid_fields() {
        let store = MockRecordStore::new();
        let invalid: NewReview = serde_json::from_value(json!({"rating": "bad"})).unwrap();
        assert!(store.insert(invalid).is_err());
        assert!(store.load_all().unwrap().is_empty());
    }
}
