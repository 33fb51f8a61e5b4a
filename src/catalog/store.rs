//! Entity store
//!
//! Owns the three collections and the id counters. Newest books and
//! reviews sit at the front of their collection.
//!
//! The store itself is plain data; `Catalog` wraps it in a single lock
//! so each operation sees and leaves it consistent.

use crate::auth::{User, UserDirectory};

use super::model::{Book, BookPatch, NewBook, NewReview, Review, ReviewPatch};

/// Monotonic id source, independent of how many entities currently exist
#[derive(Debug, Clone, PartialEq, Eq)]
struct IdSequence {
    next: u64,
}

impl IdSequence {
    fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Smallest sequence that can't collide with any of `ids`
    fn after<'a>(ids: impl Iterator<Item = &'a str>) -> Self {
        let max = ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0);
        Self::starting_at(max + 1)
    }

    fn next_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct EntityStore {
    users: Vec<User>,
    books: Vec<Book>,
    reviews: Vec<Review>,
    user_ids: IdSequence,
    book_ids: IdSequence,
    review_ids: IdSequence,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl EntityStore {
    /// Store with no users, books or reviews
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new())
    }

    /// Store loaded with the fixture catalogue
    pub fn seeded() -> Self {
        Self::from_parts(seed_users(), seed_books(), seed_reviews())
    }

    pub fn from_parts(users: Vec<User>, books: Vec<Book>, reviews: Vec<Review>) -> Self {
        let user_ids = IdSequence::after(users.iter().map(|u| u.id.as_str()));
        let book_ids = IdSequence::after(books.iter().map(|b| b.id.as_str()));
        let review_ids = IdSequence::after(reviews.iter().map(|r| r.id.as_str()));

        Self {
            users,
            books,
            reviews,
            user_ids,
            book_ids,
            review_ids,
        }
    }

    /// Throw away all changes and reload the fixture
    pub fn reset(&mut self) {
        *self = Self::seeded();
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    // ==================
    // Users
    // ==================

    /// Append a user. Email uniqueness is the caller's check.
    pub fn insert_user(&mut self, name: String, email: String, password: Option<String>) -> User {
        let user = User::new(self.user_ids.next_id(), name, email, password);
        self.users.push(user.clone());
        user
    }

    // ==================
    // Books
    // ==================

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Insert at the front with a fresh id and the given owner
    pub fn insert_book(&mut self, data: NewBook, owner_id: &str) -> Book {
        let book = Book {
            id: self.book_ids.next_id(),
            title: data.title,
            author: data.author,
            description: data.description,
            genre: data.genre,
            year: data.year,
            added_by: owner_id.to_string(),
            cover_image_url: data.cover_image_url,
        };
        self.books.insert(0, book.clone());
        book
    }

    /// Apply a patch, returning the updated book, or `None` if absent
    pub fn patch_book(&mut self, id: &str, patch: BookPatch) -> Option<Book> {
        let book = self.books.iter_mut().find(|b| b.id == id)?;
        patch.apply(book);
        Some(book.clone())
    }

    /// Remove a book and every review of it.
    ///
    /// Returns the removed book and how many reviews went with it.
    pub fn remove_book(&mut self, id: &str) -> Option<(Book, usize)> {
        let index = self.books.iter().position(|b| b.id == id)?;
        let book = self.books.remove(index);

        let before = self.reviews.len();
        self.reviews.retain(|r| r.book_id != id);

        Some((book, before - self.reviews.len()))
    }

    pub fn books_added_by(&self, user_id: &str) -> Vec<Book> {
        self.books
            .iter()
            .filter(|b| b.added_by == user_id)
            .cloned()
            .collect()
    }

    // ==================
    // Reviews
    // ==================

    pub fn review(&self, id: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == id)
    }

    /// Reviews of one book, newest first
    pub fn reviews_for(&self, book_id: &str) -> Vec<Review> {
        self.reviews
            .iter()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect()
    }

    pub fn reviews_by(&self, user_id: &str) -> Vec<Review> {
        self.reviews
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Insert at the front, snapshotting the author's current name
    pub fn insert_review(&mut self, data: NewReview, user_name: &str) -> Review {
        let review = Review {
            id: self.review_ids.next_id(),
            book_id: data.book_id,
            user_id: data.user_id,
            rating: data.rating,
            review_text: data.review_text,
            user_name: user_name.to_string(),
        };
        self.reviews.insert(0, review.clone());
        review
    }

    pub fn patch_review(&mut self, id: &str, patch: ReviewPatch) -> Option<Review> {
        let review = self.reviews.iter_mut().find(|r| r.id == id)?;
        patch.apply(review);
        Some(review.clone())
    }

    pub fn remove_review(&mut self, id: &str) -> Option<Review> {
        let index = self.reviews.iter().position(|r| r.id == id)?;
        Some(self.reviews.remove(index))
    }
}

impl UserDirectory for EntityStore {
    fn find_by_id(&self, id: &str) -> Option<&User> {
        self.users.as_slice().find_by_id(id)
    }

    fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.as_slice().find_by_email(email)
    }
}

// ==================
// Fixture
// ==================

fn seed_users() -> Vec<User> {
    vec![User::new(
        "1",
        "Alice",
        "alice@example.com",
        Some("password123".to_string()),
    )]
}

fn seed_books() -> Vec<Book> {
    // (id, title, author, description, genre, year, openlibrary cover id)
    let rows = [
        (
            "1",
            "The Hobbit",
            "J.R.R. Tolkien",
            "A fantasy novel.",
            "Fantasy",
            1937,
            "10441294",
        ),
        (
            "2",
            "1984",
            "George Orwell",
            "A dystopian novel.",
            "Dystopian",
            1949,
            "12662369",
        ),
        (
            "3",
            "To Kill a Mockingbird",
            "Harper Lee",
            "A novel about injustice.",
            "Classic",
            1960,
            "10206240",
        ),
        (
            "4",
            "The Great Gatsby",
            "F. Scott Fitzgerald",
            "A novel about the American dream.",
            "Classic",
            1925,
            "13137910",
        ),
        (
            "5",
            "Dune",
            "Frank Herbert",
            "A science fiction epic.",
            "Sci-Fi",
            1965,
            "10074218",
        ),
        (
            "6",
            "Pride and Prejudice",
            "Jane Austen",
            "A romantic novel.",
            "Romance",
            1813,
            "12845749",
        ),
    ];

    rows.into_iter()
        .map(|(id, title, author, description, genre, year, cover)| Book {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            genre: genre.to_string(),
            year,
            added_by: "1".to_string(),
            cover_image_url: Some(format!(
                "https://covers.openlibrary.org/b/id/{}-L.jpg",
                cover
            )),
        })
        .collect()
}

fn seed_reviews() -> Vec<Review> {
    let review = |id: &str, book_id: &str, rating: u8, text: &str| Review {
        id: id.to_string(),
        book_id: book_id.to_string(),
        user_id: "1".to_string(),
        rating,
        review_text: text.to_string(),
        user_name: "Alice".to_string(),
    };

    vec![
        review("1", "1", 5, "An absolute classic!"),
        review("2", "1", 4, "A great read for all ages."),
        review("3", "2", 5, "Chilling and thought-provoking."),
        review("4", "5", 5, "Mind-bending sci-fi."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_counts() {
        let store = EntityStore::seeded();
        assert_eq!(store.users().len(), 1);
        assert_eq!(store.books().len(), 6);
        assert_eq!(store.reviews().len(), 4);
    }

    #[test]
    fn test_ids_continue_after_fixture() {
        let mut store = EntityStore::seeded();
        let book = store.insert_book(NewBook::new("Emma", "Jane Austen", "Romance", 1815), "1");

        assert_eq!(book.id, "7");
        assert_eq!(store.books()[0].id, "7");
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let mut store = EntityStore::seeded();
        let first = store.insert_book(NewBook::new("Emma", "Jane Austen", "Romance", 1815), "1");
        store.remove_book(&first.id).unwrap();
        store.remove_book("6").unwrap();

        let second = store.insert_book(NewBook::new("Emma", "Jane Austen", "Romance", 1815), "1");
        assert_ne!(first.id, second.id);
        assert!(store.books().iter().filter(|b| b.id == second.id).count() == 1);
    }

    #[test]
    fn test_remove_book_cascades() {
        let mut store = EntityStore::seeded();
        let (book, removed) = store.remove_book("1").unwrap();

        assert_eq!(book.title, "The Hobbit");
        assert_eq!(removed, 2);
        assert!(store.reviews_for("1").is_empty());
        assert_eq!(store.reviews().len(), 2);
    }

    #[test]
    fn test_review_inserted_first() {
        let mut store = EntityStore::seeded();
        let review = store.insert_review(NewReview::new("1", "1", 3, "Fine."), "Alice");

        assert_eq!(review.id, "5");
        assert_eq!(store.reviews_for("1")[0].id, "5");
    }

    #[test]
    fn test_reset_restores_fixture() {
        let mut store = EntityStore::seeded();
        store.remove_book("5");
        store.insert_user("Bob".into(), "bob@example.com".into(), None);

        store.reset();
        assert_eq!(store.books().len(), 6);
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn test_empty_store_starts_at_one() {
        let mut store = EntityStore::empty();
        let user = store.insert_user("Bob".into(), "bob@example.com".into(), None);
        assert_eq!(user.id, "1");
    }
}
