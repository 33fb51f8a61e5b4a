//! Catalog operation set
//!
//! Every operation runs its business logic under one acquisition of the
//! store lock, releases it, and only then waits out the simulated
//! latency. Readers therefore never see a half-applied write. Failures
//! are returned immediately, without the delay.
//!
//! Results are owned copies; nothing handed out aliases the store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::auth::{AccessGate, Ownership, Session, SignupRequest, UserDirectory, UserProfile};
use crate::config::CatalogConfig;

use super::covers::{resolve_cover, with_cover, COVER_SIZE, THUMBNAIL_SIZE};
use super::errors::{CatalogError, CatalogResult};
use super::model::{
    Book, BookPage, BookPatch, BookWithReviews, NewBook, NewReview, Review, ReviewPatch,
    ReviewWithBookTitle, UserActivity,
};
use super::query::{self, BookQuery};
use super::store::EntityStore;

/// Title shown for a review whose book has since been deleted
pub const UNKNOWN_BOOK_TITLE: &str = "Unknown Book";

/// The catalogue backend: store, access gate and simulated latency
#[derive(Debug)]
pub struct Catalog {
    config: CatalogConfig,
    gate: AccessGate,
    store: RwLock<EntityStore>,
}

impl Catalog {
    /// Catalog over the seeded fixture
    pub fn new(config: CatalogConfig) -> Self {
        Self::with_store(config, EntityStore::seeded())
    }

    pub fn with_store(config: CatalogConfig, store: EntityStore) -> Self {
        let gate = AccessGate::new(config.token.clone());
        Self {
            config,
            gate,
            store: RwLock::new(store),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Restore the seeded fixture, dropping every change (test hook)
    pub fn reset(&self) -> CatalogResult<()> {
        self.write()?.reset();
        info!("catalog store reset to fixture");
        Ok(())
    }

    // ==================
    // Accounts
    // ==================

    pub async fn signup(&self, request: SignupRequest) -> CatalogResult<UserProfile> {
        let profile = {
            if request.name.trim().is_empty() {
                return Err(CatalogError::invalid("name must not be empty"));
            }
            if request.email.trim().is_empty() {
                return Err(CatalogError::invalid("email must not be empty"));
            }
            if request.password.is_empty() {
                return Err(CatalogError::invalid("password must not be empty"));
            }

            let mut store = self.write()?;
            self.gate.check_email_available(&*store, &request.email)?;

            let user = store.insert_user(request.name, request.email, Some(request.password));
            info!(user_id = %user.id, "user signed up");
            user.profile()
        };

        Ok(self.respond(profile).await)
    }

    pub async fn login(&self, email: &str, password: &str) -> CatalogResult<Session> {
        let session = {
            let store = self.read()?;
            self.gate
                .authenticate(&*store, email, password)
                .map_err(|e| {
                    warn!(error = %e, "login rejected");
                    CatalogError::from(e)
                })?
        };

        debug!(user_id = %session.user.id, "user logged in");
        Ok(self.respond(session).await)
    }

    /// Resolve a token to the id of an existing user
    pub fn authorize(&self, token: &str) -> CatalogResult<String> {
        let store = self.read()?;
        Ok(self.gate.authorize(&*store, token)?)
    }

    // ==================
    // Books
    // ==================

    pub async fn list_books(&self, query: &BookQuery) -> CatalogResult<BookPage> {
        let page = {
            let store = self.read()?;
            query::list_books(&store, query, self.config.page_size)
        };

        debug!(
            page = query.page,
            search = %query.search,
            genre = %query.genre,
            sort = %query.sort,
            returned = page.books.len(),
            total_pages = page.total_pages,
            "listed books"
        );
        Ok(self.respond(page).await)
    }

    pub async fn get_book(&self, id: &str) -> CatalogResult<BookWithReviews> {
        let view = {
            let store = self.read()?;
            let book = store.book(id).ok_or_else(|| CatalogError::book_not_found(id))?;
            query::join_reviews(&store, book)
        };

        debug!(book_id = %id, reviews = view.reviews.len(), "fetched book");
        Ok(self.respond(view).await)
    }

    pub async fn genres(&self) -> CatalogResult<Vec<String>> {
        let genres = query::genres(&*self.read()?);
        Ok(self.respond(genres).await)
    }

    /// Add a book owned by the token's user. Not idempotent.
    pub async fn add_book(&self, data: NewBook, token: &str) -> CatalogResult<Book> {
        let book = {
            let mut store = self.write()?;
            let caller = self.gate.authorize(&*store, token)?;
            data.validate()?;

            let data = NewBook {
                cover_image_url: Some(resolve_cover(
                    data.cover_image_url.as_deref(),
                    &data.title,
                    COVER_SIZE,
                )),
                ..data
            };
            let book = store.insert_book(data, &caller);
            info!(book_id = %book.id, user_id = %caller, "book added");
            book
        };

        Ok(self.respond(book).await)
    }

    pub async fn update_book(
        &self,
        id: &str,
        patch: BookPatch,
        token: &str,
    ) -> CatalogResult<Book> {
        let book = {
            let mut store = self.write()?;
            let caller = self.gate.authorize(&*store, token)?;
            let existing = store.book(id).ok_or_else(|| CatalogError::book_not_found(id))?;
            require_owner(&existing.added_by, &caller, "book", id)?;
            patch.validate()?;

            let book = store
                .patch_book(id, patch)
                .ok_or_else(|| CatalogError::book_not_found(id))?;
            info!(book_id = %id, user_id = %caller, "book updated");
            book
        };

        Ok(self.respond(book).await)
    }

    /// Delete a book and every review of it
    pub async fn delete_book(&self, id: &str, token: &str) -> CatalogResult<()> {
        {
            let mut store = self.write()?;
            let caller = self.gate.authorize(&*store, token)?;
            let existing = store.book(id).ok_or_else(|| CatalogError::book_not_found(id))?;
            require_owner(&existing.added_by, &caller, "book", id)?;

            let (_, removed_reviews) = store
                .remove_book(id)
                .ok_or_else(|| CatalogError::book_not_found(id))?;
            info!(book_id = %id, user_id = %caller, removed_reviews, "book deleted");
        }

        self.respond(()).await;
        Ok(())
    }

    // ==================
    // Reviews
    // ==================

    /// Post a review. The token must belong to `data.user_id`.
    pub async fn add_review(&self, data: NewReview, token: &str) -> CatalogResult<Review> {
        let review = {
            let mut store = self.write()?;
            self.gate.authorize_as(&*store, token, &data.user_id)?;
            data.validate()?;

            if store.book(&data.book_id).is_none() {
                return Err(CatalogError::book_not_found(&data.book_id));
            }

            let user_name = store
                .find_by_id(&data.user_id)
                .map(|u| u.name.clone())
                .ok_or(CatalogError::Unauthorized)?;

            let review = store.insert_review(data, &user_name);
            info!(
                review_id = %review.id,
                book_id = %review.book_id,
                user_id = %review.user_id,
                rating = review.rating,
                "review added"
            );
            review
        };

        Ok(self.respond(review).await)
    }

    pub async fn update_review(
        &self,
        id: &str,
        patch: ReviewPatch,
        token: &str,
    ) -> CatalogResult<Review> {
        let review = {
            let mut store = self.write()?;
            let caller = self.gate.authorize(&*store, token)?;
            let existing = store.review(id).ok_or_else(|| CatalogError::review_not_found(id))?;
            require_owner(&existing.user_id, &caller, "review", id)?;
            patch.validate()?;

            let review = store
                .patch_review(id, patch)
                .ok_or_else(|| CatalogError::review_not_found(id))?;
            info!(review_id = %id, user_id = %caller, "review updated");
            review
        };

        Ok(self.respond(review).await)
    }

    pub async fn delete_review(&self, id: &str, token: &str) -> CatalogResult<()> {
        {
            let mut store = self.write()?;
            let caller = self.gate.authorize(&*store, token)?;
            let existing = store.review(id).ok_or_else(|| CatalogError::review_not_found(id))?;
            require_owner(&existing.user_id, &caller, "review", id)?;

            store
                .remove_review(id)
                .ok_or_else(|| CatalogError::review_not_found(id))?;
            info!(review_id = %id, user_id = %caller, "review deleted");
        }

        self.respond(()).await;
        Ok(())
    }

    // ==================
    // Profile
    // ==================

    /// Books and reviews contributed by the token's user
    pub async fn user_activity(&self, token: &str) -> CatalogResult<UserActivity> {
        let activity = {
            let store = self.read()?;
            let caller = self.gate.authorize(&*store, token)?;

            let user_books = store
                .books_added_by(&caller)
                .into_iter()
                .map(|b| with_cover(b, THUMBNAIL_SIZE))
                .collect();

            let user_reviews = store
                .reviews_by(&caller)
                .into_iter()
                .map(|review| {
                    let book_title = store
                        .book(&review.book_id)
                        .map(|b| b.title.clone())
                        .unwrap_or_else(|| UNKNOWN_BOOK_TITLE.to_string());
                    ReviewWithBookTitle { review, book_title }
                })
                .collect();

            UserActivity {
                user_books,
                user_reviews,
            }
        };

        Ok(self.respond(activity).await)
    }

    // ==================
    // Internals
    // ==================

    fn read(&self) -> CatalogResult<RwLockReadGuard<'_, EntityStore>> {
        self.store
            .read()
            .map_err(|_| CatalogError::Storage("store lock poisoned".to_string()))
    }

    fn write(&self) -> CatalogResult<RwLockWriteGuard<'_, EntityStore>> {
        self.store
            .write()
            .map_err(|_| CatalogError::Storage("store lock poisoned".to_string()))
    }

    /// Hand back an already-computed result after the configured delay
    async fn respond<T>(&self, value: T) -> T {
        let latency = self.config.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        value
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

fn require_owner(owner_id: &str, caller_id: &str, kind: &str, id: &str) -> CatalogResult<()> {
    if Ownership::of(owner_id, caller_id).is_owner() {
        return Ok(());
    }
    warn!(
        resource = kind,
        id = %id,
        owner = %owner_id,
        caller = %caller_id,
        "ownership check failed"
    );
    Err(CatalogError::Forbidden)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(CatalogConfig::instant())
    }

    #[tokio::test]
    async fn test_guards_released_before_latency() {
        // With a real delay, a second operation must still be able to
        // take the lock while the first one is sleeping.
        let catalog = std::sync::Arc::new(Catalog::new(CatalogConfig {
            latency_ms: 50,
            ..CatalogConfig::instant()
        }));

        let slow = {
            let catalog = catalog.clone();
            tokio::spawn(async move { catalog.get_book("1").await })
        };
        tokio::task::yield_now().await;
        catalog.reset().unwrap();
        assert!(slow.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_error_returns_without_delay() {
        let catalog = Catalog::new(CatalogConfig {
            latency_ms: 60_000,
            ..CatalogConfig::instant()
        });

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            catalog.get_book("404"),
        )
        .await
        .expect("errors must not wait out the latency");
        assert_eq!(result.unwrap_err(), CatalogError::book_not_found("404"));
    }

    #[tokio::test]
    async fn test_new_book_gets_placeholder_cover() {
        let catalog = catalog();
        let session = catalog.login("alice@example.com", "password123").await.unwrap();

        let book = catalog
            .add_book(NewBook::new("Emma", "Jane Austen", "Romance", 1815), &session.token)
            .await
            .unwrap();

        assert_eq!(
            book.cover_image_url.as_deref(),
            Some("https://placehold.co/400x600/3b82f6/ffffff?text=Emma")
        );
    }

    #[tokio::test]
    async fn test_signup_rejects_blank_fields() {
        let catalog = catalog();
        let result = catalog
            .signup(SignupRequest::new("", "bob@example.com", "pw"))
            .await;
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_reset_hook() {
        let catalog = catalog();
        let session = catalog.login("alice@example.com", "password123").await.unwrap();
        catalog.delete_book("1", &session.token).await.unwrap();

        catalog.reset().unwrap();
        assert!(catalog.get_book("1").await.is_ok());
    }
}
