//! Book catalogue backend
//!
//! An in-process stand-in for a remote API: users, books and reviews
//! held in memory, with ownership-checked mutations, derived rating
//! statistics and an artificial response delay.
//!
//! # Flow of one call
//!
//! 1. Take the store lock
//! 2. Authorize the token (mutations only) and check ownership
//! 3. Read or mutate the collections, recomputing stats as needed
//! 4. Release the lock
//! 5. Wait out the configured latency and return an owned copy

mod covers;
mod errors;
mod model;
mod query;
mod service;
mod stats;
mod store;

pub use covers::{placeholder_url, COVER_SIZE, THUMBNAIL_SIZE};
pub use errors::{CatalogError, CatalogResult, EntityKind};
pub use model::{
    validate_rating, Book, BookPage, BookPatch, BookWithReviews, NewBook, NewReview, Review,
    ReviewPatch, ReviewWithBookTitle, UserActivity, MAX_RATING, MIN_RATING,
};
pub use query::{BookQuery, SortOrder};
pub use service::{Catalog, UNKNOWN_BOOK_TITLE};
pub use stats::{compute_stats, RatingDistribution, RatingStats};
pub use store::EntityStore;
