//! In-memory book collection

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::models::book::{Book, BookFilter, BookSummary};

/// Insertion-ordered book store keyed by id.
///
/// Clones share the same collection. Mutations hold the write lock for the
/// whole lookup-then-change sequence.
#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<IndexMap<String, Book>>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summaries of matching books, in insertion order
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .read()
            .await
            .values()
            .filter(|book| filter.matches(book))
            .map(BookSummary::from)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<Book> {
        self.books.read().await.get(id).cloned()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.books.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    /// Append a new book under an id from `next_id`, drawing again on collision.
    /// Returns the id used.
    pub async fn insert_with<G, B>(&self, mut next_id: G, build: B) -> String
    where
        G: FnMut() -> String,
        B: FnOnce(String) -> Book,
    {
        let mut books = self.books.write().await;
        let mut id = next_id();
        while books.contains_key(&id) {
            tracing::warn!("Generated book id {} already in use, drawing another", id);
            id = next_id();
        }
        let book = build(id.clone());
        books.insert(id.clone(), book);
        id
    }

    /// Apply `change` to the book with this id in place.
    /// Returns false when no such book exists.
    pub async fn update<F>(&self, id: &str, change: F) -> bool
    where
        F: FnOnce(&mut Book),
    {
        match self.books.write().await.get_mut(id) {
            Some(book) => {
                change(book);
                true
            }
            None => false,
        }
    }

    /// Remove a book, keeping the order of the others
    pub async fn remove(&self, id: &str) -> Option<Book> {
        self.books.write().await.shift_remove(id)
    }
}
