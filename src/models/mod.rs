//! Shared catalog data types returned by the backend API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named scent-family classification, e.g. "Woody Spicy".
/// Immutable once fetched; identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AromaCategory {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
