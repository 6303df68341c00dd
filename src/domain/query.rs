//! Filtering and pagination for book listings.
//!
//! [`BookFilter`] is what a caller asked for; [`QuerySpec`] is what the store
//! actually runs. Building a spec never fails: out-of-range values are coerced.

use std::cmp::Ordering;

use crate::domain::entities::Book;

/// Page size used when none (or a non-positive one) is requested.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size the store will be asked for.
pub const MAX_LIMIT: i64 = 100;

/// Raw, unvalidated listing parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Resolved listing query.
///
/// Results are ordered by `created_at` descending, then `id` descending so that
/// rows created in the same instant still page deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub limit: i64,
    pub offset: i64,
}

impl QuerySpec {
    /// Resolves a filter into a bounded query.
    ///
    /// # Coercion
    ///
    /// - `limit`: unset or `<= 0` becomes [`DEFAULT_LIMIT`]; above [`MAX_LIMIT`]
    ///   is truncated to [`MAX_LIMIT`]
    /// - `offset`: unset or negative becomes 0
    /// - empty `title` / `author` impose no constraint
    pub fn build(filter: BookFilter) -> Self {
        let limit = match filter.limit {
            Some(limit) if limit > 0 => limit.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        };

        let offset = filter.offset.filter(|o| *o > 0).unwrap_or(0);

        Self {
            title: non_empty(filter.title),
            author: non_empty(filter.author),
            year: filter.year,
            limit,
            offset,
        }
    }

    /// 1-based page number the offset falls on.
    pub fn page(&self) -> i64 {
        self.offset / self.limit + 1
    }

    /// Number of pages needed to show `total` matches.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total + self.limit - 1) / self.limit
    }

    /// Title pattern for `ILIKE`, with wildcards in the user input escaped.
    pub fn title_pattern(&self) -> Option<String> {
        self.title.as_deref().map(contains_pattern)
    }

    /// Author pattern for `ILIKE`, with wildcards in the user input escaped.
    pub fn author_pattern(&self) -> Option<String> {
        self.author.as_deref().map(contains_pattern)
    }

    /// Evaluates the filter predicates against a book in memory.
    ///
    /// Soft-deleted books never match.
    pub fn matches(&self, book: &Book) -> bool {
        book.is_live()
            && self
                .title
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&book.title, needle))
            && self
                .author
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&book.author, needle))
            && self.year.is_none_or(|year| book.year == year)
    }

    /// Result ordering: newest first, then highest id first.
    pub fn compare(a: &Book, b: &Book) -> Ordering {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Builds a `%needle%` pattern for `LIKE`/`ILIKE` with `\`, `%` and `_` escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
