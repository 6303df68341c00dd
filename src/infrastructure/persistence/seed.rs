//! Sample data for fresh databases.

use crate::domain::entities::NewBook;
use crate::domain::query::{BookFilter, QuerySpec};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;

/// The four books a new installation starts with.
pub fn sample_books() -> Vec<NewBook> {
    let book = |title: &str, author: &str, year: i32, isbn: Option<&str>, description: &str| {
        NewBook {
            title: title.to_string(),
            author: author.to_string(),
            year,
            isbn: isbn.map(str::to_string),
            description: Some(description.to_string()),
        }
    };

    vec![
        book(
            "The Go Programming Language",
            "Alan Donovan",
            2015,
            Some("9780134190440"),
            "The authoritative resource to writing clear and idiomatic Go",
        ),
        book(
            "Clean Code",
            "Robert C. Martin",
            2008,
            Some("9780132350884"),
            "A Handbook of Agile Software Craftsmanship",
        ),
        book(
            "Design Patterns",
            "Gang of Four",
            1994,
            Some("9780201633610"),
            "Elements of Reusable Object-Oriented Software",
        ),
        book(
            "Microservices Patterns",
            "Chris Richardson",
            2018,
            None,
            "With examples in Java",
        ),
    ]
}

/// Inserts [`sample_books`] when the store holds no live books.
///
/// Returns the number of books inserted; `0` when the store already had data.
pub async fn seed_sample_books<R: BookRepository + ?Sized>(repository: &R) -> Result<usize, AppError> {
    let first_page = QuerySpec::build(BookFilter {
        limit: Some(1),
        ..BookFilter::default()
    });
    let (_, existing) = repository.query(&first_page).await?;
    if existing > 0 {
        tracing::debug!(existing, "Skipping sample data, books already present");
        return Ok(0);
    }

    let books = sample_books();
    let count = books.len();
    for book in books {
        repository.create(book).await?;
    }

    tracing::info!(count, "Seeded sample books");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryBookRepository;

    #[tokio::test]
    async fn test_seed_only_once() {
        let repo = InMemoryBookRepository::new();

        assert_eq!(seed_sample_books(&repo).await.unwrap(), 4);
        assert_eq!(seed_sample_books(&repo).await.unwrap(), 0);

        let found = repo.search("java").await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].isbn.is_none());
    }

    #[test]
    fn test_sample_books_are_valid() {
        for book in sample_books() {
            assert!((1000..=2024).contains(&book.year));
            assert!(book.isbn.as_deref().is_none_or(|isbn| isbn.len() == 13));
        }
    }
}
