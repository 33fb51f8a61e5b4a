//! Book listing pipeline
//!
//! # Processing order (fixed)
//!
//! 1. Search: case-insensitive substring of title or author
//! 2. Genre: exact match
//! 3. Year sort, if requested
//! 4. Join reviews and rating statistics
//! 5. Rating sort, if requested
//! 6. Page slicing
//!
//! Sorts are stable, so ties keep collection order (newest first).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::covers::{with_cover, COVER_SIZE};
use super::model::{Book, BookPage, BookWithReviews};
use super::stats::{compute_stats, RatingDistribution};
use super::store::EntityStore;

/// Listing order. At most one sort applies per listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Collection order
    #[default]
    None,
    YearAsc,
    YearDesc,
    RatingAsc,
    RatingDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::None => "",
            SortOrder::YearAsc => "year_asc",
            SortOrder::YearDesc => "year_desc",
            SortOrder::RatingAsc => "rating_asc",
            SortOrder::RatingDesc => "rating_desc",
        }
    }

    /// Parse a wire value. Unrecognised values mean no sorting.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    fn by_year(self) -> bool {
        matches!(self, SortOrder::YearAsc | SortOrder::YearDesc)
    }

    fn by_rating(self) -> bool {
        matches!(self, SortOrder::RatingAsc | SortOrder::RatingDesc)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(SortOrder::None),
            "year_asc" => Ok(SortOrder::YearAsc),
            "year_desc" => Ok(SortOrder::YearDesc),
            "rating_asc" => Ok(SortOrder::RatingAsc),
            "rating_desc" => Ok(SortOrder::RatingDesc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Listing parameters. Empty search or genre means no filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookQuery {
    /// 1-indexed page; pages outside the result are empty
    pub page: usize,
    pub search: String,
    pub genre: String,
    pub sort: SortOrder,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            genre: String::new(),
            sort: SortOrder::None,
        }
    }
}

impl BookQuery {
    pub fn page(page: usize) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    fn matches_search(&self, book: &Book) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        book.title.to_lowercase().contains(&needle) || book.author.to_lowercase().contains(&needle)
    }

    fn matches_genre(&self, book: &Book) -> bool {
        self.genre.is_empty() || book.genre == self.genre
    }
}

/// Attach reviews, average and distribution to a book
pub fn join_reviews(store: &EntityStore, book: &Book) -> BookWithReviews {
    let reviews = store.reviews_for(&book.id);
    let stats = compute_stats(&reviews);
    let rating_counts = RatingDistribution::from_reviews(&reviews);

    BookWithReviews {
        book: with_cover(book.clone(), COVER_SIZE),
        reviews,
        average_rating: stats.average_rating,
        rating_counts,
    }
}

/// Run the listing pipeline against the store
pub fn list_books(store: &EntityStore, query: &BookQuery, page_size: usize) -> BookPage {
    let mut filtered: Vec<&Book> = store
        .books()
        .iter()
        .filter(|b| query.matches_search(b))
        .filter(|b| query.matches_genre(b))
        .collect();

    if query.sort.by_year() {
        match query.sort {
            SortOrder::YearDesc => filtered.sort_by(|a, b| b.year.cmp(&a.year)),
            _ => filtered.sort_by(|a, b| a.year.cmp(&b.year)),
        }
    }

    let mut joined: Vec<BookWithReviews> =
        filtered.into_iter().map(|b| join_reviews(store, b)).collect();

    if query.sort.by_rating() {
        match query.sort {
            SortOrder::RatingDesc => {
                joined.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating))
            }
            _ => joined.sort_by(|a, b| a.average_rating.total_cmp(&b.average_rating)),
        }
    }

    paginate(joined, query.page, page_size)
}

/// Slice one page out of the full result
pub fn paginate(items: Vec<BookWithReviews>, page: usize, page_size: usize) -> BookPage {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size);

    let books = if page == 0 {
        Vec::new()
    } else {
        items
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect()
    };

    BookPage { books, total_pages }
}

/// Distinct genres present in the catalogue, sorted
pub fn genres(store: &EntityStore) -> Vec<String> {
    let mut genres: Vec<String> = store.books().iter().map(|b| b.genre.clone()).collect();
    genres.sort();
    genres.dedup();
    genres
}
