//! Placeholder cover images for books added without one

use super::model::Book;

/// Size used on listing and detail pages
pub const COVER_SIZE: &str = "400x600";

/// Size used for thumbnails in the user activity view
pub const THUMBNAIL_SIZE: &str = "100x150";

/// Characters `encodeURIComponent` leaves alone but `urlencoding` escapes
const UNRESERVED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

fn encode_component(text: &str) -> String {
    UNRESERVED_MARKS
        .iter()
        .fold(urlencoding::encode(text).into_owned(), |acc, (escaped, raw)| {
            acc.replace(escaped, raw)
        })
}

/// Build a placeholder image URL showing the book's title
pub fn placeholder_url(title: &str, size: &str) -> String {
    format!(
        "https://placehold.co/{}/3b82f6/ffffff?text={}",
        size,
        encode_component(title)
    )
}

/// `cover` if present and non-empty, otherwise a placeholder for `title`
pub fn resolve_cover(cover: Option<&str>, title: &str, size: &str) -> String {
    match cover {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => placeholder_url(title, size),
    }
}

/// The book's own cover URL, or a placeholder if it has none
pub fn cover_or_placeholder(book: &Book, size: &str) -> String {
    resolve_cover(book.cover_image_url.as_deref(), &book.title, size)
}

/// Return `book` with its cover filled in
pub fn with_cover(mut book: Book, size: &str) -> Book {
    book.cover_image_url = Some(cover_or_placeholder(&book, size));
    book
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(cover: Option<&str>) -> Book {
        Book {
            id: "9".to_string(),
            title: "Dune & Sons".to_string(),
            author: "Frank Herbert".to_string(),
            description: String::new(),
            genre: "Sci-Fi".to_string(),
            year: 1965,
            added_by: "1".to_string(),
            cover_image_url: cover.map(str::to_string),
        }
    }

    #[test]
    fn test_placeholder_encodes_title() {
        assert_eq!(
            placeholder_url("Dune & Sons", COVER_SIZE),
            "https://placehold.co/400x600/3b82f6/ffffff?text=Dune%20%26%20Sons"
        );
    }

    #[test]
    fn test_placeholder_keeps_component_marks() {
        assert_eq!(
            placeholder_url("Don't Panic!", THUMBNAIL_SIZE),
            "https://placehold.co/100x150/3b82f6/ffffff?text=Don't%20Panic!"
        );
        assert_eq!(encode_component("(*)"), "(*)");
        assert_eq!(encode_component("100%!"), "100%25!");
    }

    #[test]
    fn test_existing_cover_kept() {
        let url = "https://covers.openlibrary.org/b/id/10074218-L.jpg";
        assert_eq!(cover_or_placeholder(&book(Some(url)), COVER_SIZE), url);
    }

    #[test]
    fn test_empty_cover_replaced() {
        let filled = with_cover(book(Some("")), THUMBNAIL_SIZE);
        assert!(filled
            .cover_image_url
            .unwrap()
            .starts_with("https://placehold.co/100x150/"));
    }
}
