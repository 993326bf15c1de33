//! `grado reviews`

use std::io::Write;

use grado_core::MAX_RATING;
use grado_storefront::AppStore;
use grado_storefront::services::reviews::{self, ReviewForm};

use crate::error::CliError;

/// List reviews, newest first.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(store: &AppStore, out: &mut impl Write) -> Result<(), CliError> {
    if store.reviews().is_empty() {
        writeln!(out, "No reviews yet")?;
        return Ok(());
    }

    for (index, review) in store.reviews().iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        let body = &review.body;
        writeln!(out, "{} {} - {}", stars(body.rating), body.author, body.date)?;
        writeln!(out, "  {}", body.text)?;
        if let Some(images) = body.images.as_ref().filter(|images| !images.is_empty()) {
            match images.len() {
                1 => writeln!(out, "  (1 photo)")?,
                n => writeln!(out, "  ({n} photos)")?,
            }
        }
    }
    Ok(())
}

/// Post a review as the signed-in user, or anonymously.
///
/// # Errors
///
/// Returns `ReviewError` for blank text or an out-of-range rating.
pub fn post(
    store: &mut AppStore,
    out: &mut impl Write,
    text: String,
    rating: u8,
    images: Vec<String>,
) -> Result<(), CliError> {
    reviews::submit_review(
        store,
        ReviewForm {
            text,
            rating,
            images,
        },
    )?;
    writeln!(out, "Thanks for your review!")?;
    Ok(())
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(MAX_RATING));
    let empty = usize::from(MAX_RATING) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}
