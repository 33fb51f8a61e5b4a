//! Catalog entities and the views built from them
//!
//! Field names serialize in camelCase so the JSON matches what the
//! presentation layer already consumes.

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};
use super::stats::RatingDistribution;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A catalogued book, owned by the user who added it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub year: i32,
    /// Owning user id
    pub added_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

/// Fields supplied when adding a book. Id and owner are assigned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub genre: String,
    pub year: i32,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            description: String::new(),
            genre: genre.into(),
            year,
            cover_image_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cover(mut self, url: impl Into<String>) -> Self {
        self.cover_image_url = Some(url.into());
        self
    }

    pub fn validate(&self) -> CatalogResult<()> {
        require_text("title", &self.title)?;
        require_text("author", &self.author)?;
        Ok(())
    }
}

/// Partial update of a book.
///
/// There is deliberately no `id` or `addedBy` field, and unknown fields
/// are rejected on deserialization, so a patch can't transfer ownership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl BookPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn cover_image_url(mut self, url: impl Into<String>) -> Self {
        self.cover_image_url = Some(url.into());
        self
    }

    pub fn validate(&self) -> CatalogResult<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(author) = &self.author {
            require_text("author", author)?;
        }
        Ok(())
    }

    /// Merge every present field onto `book`
    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(description) = self.description {
            book.description = description;
        }
        if let Some(genre) = self.genre {
            book.genre = genre;
        }
        if let Some(year) = self.year {
            book.year = year;
        }
        if let Some(url) = self.cover_image_url {
            book.cover_image_url = Some(url);
        }
    }
}

/// A star rating with text, owned by its author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub book_id: String,
    pub user_id: String,
    pub rating: u8,
    pub review_text: String,
    /// Author's name when the review was written. Not kept in sync.
    pub user_name: String,
}

/// Fields supplied when posting a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub book_id: String,
    pub user_id: String,
    pub rating: u8,
    #[serde(default)]
    pub review_text: String,
}

impl NewReview {
    pub fn new(
        book_id: impl Into<String>,
        user_id: impl Into<String>,
        rating: u8,
        review_text: impl Into<String>,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            user_id: user_id.into(),
            rating,
            review_text: review_text.into(),
        }
    }

    pub fn validate(&self) -> CatalogResult<()> {
        validate_rating(self.rating)
    }
}

/// Edit of a review's rating and text. Nothing else is editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReviewPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

impl ReviewPatch {
    pub fn new(rating: u8, review_text: impl Into<String>) -> Self {
        Self {
            rating: Some(rating),
            review_text: Some(review_text.into()),
        }
    }

    pub fn validate(&self) -> CatalogResult<()> {
        match self.rating {
            Some(rating) => validate_rating(rating),
            None => Ok(()),
        }
    }

    pub fn apply(self, review: &mut Review) {
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
        if let Some(text) = self.review_text {
            review.review_text = text;
        }
    }
}

/// A book joined with its reviews and their statistics. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWithReviews {
    #[serde(flatten)]
    pub book: Book,
    pub reviews: Vec<Review>,
    pub average_rating: f64,
    pub rating_counts: RatingDistribution,
}

/// A review annotated with its book's current title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithBookTitle {
    #[serde(flatten)]
    pub review: Review,
    pub book_title: String,
}

/// Everything one user has contributed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub user_books: Vec<Book>,
    pub user_reviews: Vec<ReviewWithBookTitle>,
}

/// One page of a book listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub books: Vec<BookWithReviews>,
    pub total_pages: usize,
}

pub fn validate_rating(rating: u8) -> CatalogResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CatalogError::invalid(format!(
            "rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::invalid(format!("{} must not be empty", field)));
    }
    Ok(())
}
