//! Review submission from the menu page.

use chrono::Local;
use thiserror::Error;
use tracing::{info, instrument};

use grado_core::{MAX_RATING, MIN_RATING, ReviewDraft, ReviewId};

use crate::store::AppStore;

/// Author shown when nobody is signed in.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous Student";

/// Rating preselected on the review form.
pub const DEFAULT_RATING: u8 = 5;

/// Reasons a review was not posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// Review text left blank.
    #[error("Please write a review")]
    EmptyText,

    /// Rating outside one to five stars.
    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
}

/// Values entered on the review form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewForm {
    pub text: String,
    pub rating: u8,
    /// Opaque references to attached photos.
    pub images: Vec<String>,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            rating: DEFAULT_RATING,
            images: Vec::new(),
        }
    }
}

/// Post a review as the signed-in user, or anonymously.
///
/// # Errors
///
/// Returns `ReviewError::EmptyText` for blank text and
/// `ReviewError::RatingOutOfRange` for ratings outside 1..=5. No review is
/// created on error.
#[instrument(skip_all, fields(rating = form.rating))]
pub fn submit_review(store: &mut AppStore, form: ReviewForm) -> Result<ReviewId, ReviewError> {
    if form.text.trim().is_empty() {
        return Err(ReviewError::EmptyText);
    }
    if !(MIN_RATING..=MAX_RATING).contains(&form.rating) {
        return Err(ReviewError::RatingOutOfRange(form.rating));
    }

    let author = store
        .user()
        .map_or_else(|| ANONYMOUS_AUTHOR.to_owned(), |user| user.name.clone());

    let draft = ReviewDraft {
        text: form.text,
        rating: form.rating,
        date: Local::now().format("%Y-%m-%d").to_string(),
        author,
        images: (!form.images.is_empty()).then_some(form.images),
    };

    let id = store.add_review(draft);
    info!(review_id = %id, "Review posted");
    Ok(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::auth;

    fn form(text: &str, rating: u8) -> ReviewForm {
        ReviewForm {
            text: text.to_string(),
            rating,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_blank_review_rejected() {
        let mut store = AppStore::new();
        let result = submit_review(&mut store, form("   ", 5));
        assert_eq!(result.unwrap_err(), ReviewError::EmptyText);
        assert_eq!(store.reviews().len(), 2);
    }

    #[test]
    fn test_rating_range() {
        let mut store = AppStore::new();
        assert_eq!(
            submit_review(&mut store, form("Tasty", 0)).unwrap_err(),
            ReviewError::RatingOutOfRange(0)
        );
        assert_eq!(
            submit_review(&mut store, form("Tasty", 6)).unwrap_err(),
            ReviewError::RatingOutOfRange(6)
        );
        assert!(submit_review(&mut store, form("Tasty", 1)).is_ok());
    }

    #[test]
    fn test_anonymous_author() {
        let mut store = AppStore::new();
        let id = submit_review(&mut store, form("Loved the egg biryani", 4)).unwrap();
        let review = store.reviews().first().unwrap();
        assert_eq!(review.id, id);
        assert_eq!(review.body.author, ANONYMOUS_AUTHOR);
        assert_eq!(review.body.date.len(), "2024-01-15".len());
        assert!(review.body.images.is_none());
    }

    #[test]
    fn test_signed_in_author_and_images() {
        let mut store = AppStore::new();
        auth::login_with_google(&mut store);
        let mut review_form = form("Quick delivery", 5);
        review_form.images = vec!["blob:photo-1".to_string()];

        submit_review(&mut store, review_form).unwrap();
        let review = store.reviews().first().unwrap();
        assert_eq!(review.body.author, auth::GOOGLE_USER_NAME);
        assert_eq!(review.body.images.as_deref(), Some(&["blob:photo-1".to_string()][..]));
    }
}
