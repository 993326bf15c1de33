//! Customer reviews.

use serde::{Deserialize, Serialize};

use super::ReviewId;

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// A posted review. Reviews are never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    #[serde(flatten)]
    pub body: ReviewDraft,
}

/// Review content before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub text: String,
    pub rating: u8,
    pub date: String,
    pub author: String,
    /// Opaque references to attached photos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Review {
    /// Attach an id to a draft.
    #[must_use]
    pub const fn new(id: ReviewId, body: ReviewDraft) -> Self {
        Self { id, body }
    }
}
