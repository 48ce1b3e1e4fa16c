//! Record Storage Layer Abstraction
//!
//! This module provides an abstraction over the review-record backends. The
//! collection is a single ordered sequence; new records are prepended, so
//! newest-first is an insertion-order invariant rather than a sort on any
//! date field.

pub mod json_store;
pub mod mock_store;


use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ServiceError;

/// A persisted restaurant review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Generated unique token, immutable after creation
    pub id: String,
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub cuisine: String,
    /// Integer rating, deliberately unbounded in both directions
    pub rating: i64,
    #[serde(default)]
    pub favorite_dish: String,
    #[serde(default)]
    pub favorite_drink: String,
    #[serde(default)]
    pub review_text: String,
    /// Server-assigned RFC 3339 timestamp at insert time
    pub created_at: String,
}

/// Client-supplied fields for a new review. Unknown keys are ignored by
/// serde; `rating` stays a raw JSON value until coercion so both numbers
/// and numeric strings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReview {
    pub name: Option<String>,
    pub date: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<Value>,
    pub favorite_dish: Option<String>,
    pub favorite_drink: Option<String>,
    pub review_text: Option<String>,
}

impl NewReview {
    /// Validate required fields and build the full record.
    ///
    /// Validation is sequential and fail-fast: only the first missing
    /// required field (`name`, then `date`, then `rating`) is reported.
    pub fn into_review(self) -> Result<Review, ServiceError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(missing_field("name")),
        };
        let date = match self.date {
            Some(d) if !d.trim().is_empty() => d,
            _ => return Err(missing_field("date")),
        };
        let rating = coerce_rating(self.rating)?;

        Ok(Review {
            id: Uuid::new_v4().simple().to_string(),
            name,
            date,
            cuisine: self.cuisine.unwrap_or_default(),
            rating,
            favorite_dish: self.favorite_dish.unwrap_or_default(),
            favorite_drink: self.favorite_drink.unwrap_or_default(),
            review_text: self.review_text.unwrap_or_default(),
            created_at: Utc::now().to_rfc3339(),
        })
    }
}

fn missing_field(field: &str) -> ServiceError {
    ServiceError::Validation(format!("Missing required field: {}", field))
}

/// Coerce a JSON number or numeric string to an integer rating.
fn coerce_rating(value: Option<Value>) -> Result<i64, ServiceError> {
    let value = match value {
        Some(Value::Null) | None => return Err(missing_field("rating")),
        Some(v) => v,
    };
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ServiceError::Validation("Rating must be an integer".to_string())),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ServiceError::Validation("Rating must be an integer".to_string())),
        _ => Err(ServiceError::Validation(
            "Rating must be an integer".to_string(),
        )),
    }
}

/// Trait defining the record storage interface
pub trait RecordStorage: Send + Sync {
    /// Read the whole collection, newest first. A missing or unparseable
    /// backing document yields an empty collection, never an error.
    fn load_all(&self) -> Result<Vec<Review>, ServiceError>;

    /// Validate, prepend, and persist a new review.
    fn insert(&self, fields: NewReview) -> Result<Review, ServiceError>;
}
