//! Book catalog service

use chrono::Utc;
use rand::Rng;

use crate::{
    config::{CatalogConfig, MIN_ID_LENGTH},
    error::{AppError, AppResult},
    i18n::{Locale, Message},
    models::book::{Book, BookFilter, BookPayload, BookQuery, BookSummary},
    repository::Repository,
};

/// Symbols used for generated ids (URL-safe)
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Random opaque identifier of `len` URL-safe characters
pub fn random_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    locale: Locale,
    id_length: usize,
}

impl BooksService {
    pub fn new(repository: Repository, config: &CatalogConfig) -> Self {
        Self {
            repository,
            locale: config.locale,
            id_length: config.id_length.max(MIN_ID_LENGTH),
        }
    }

    /// Locale used for every rendered message
    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn text(&self, message: Message) -> String {
        self.locale.text(message).to_string()
    }

    /// List book summaries matching the query
    pub async fn list(&self, query: &BookQuery) -> Vec<BookSummary> {
        tracing::debug!(
            name = ?query.name,
            reading = ?query.reading,
            finished = ?query.finished,
            "Listing books"
        );
        self.repository.books.list(&BookFilter::new(query)).await
    }

    /// Get a full book record
    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(self.text(Message::NotFound)))
    }

    /// Validate and add a book, returning its new id
    pub async fn create(&self, payload: BookPayload) -> AppResult<String> {
        let draft = payload
            .into_draft()
            .map_err(|violation| AppError::Validation(self.text(Message::AddRejected(violation))))?;

        let now = Utc::now();
        let id_length = self.id_length;
        let id = self
            .repository
            .books
            .insert_with(|| random_id(id_length), |id| Book::create(id, draft, now))
            .await;

        if !self.repository.books.contains(&id).await {
            return Err(AppError::Internal(self.text(Message::AddFailed)));
        }

        tracing::info!("Book {} added", id);
        Ok(id)
    }

    /// Validate and replace a book's fields
    pub async fn update(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        let draft = payload.into_draft().map_err(|violation| {
            AppError::Validation(self.text(Message::UpdateRejected(violation)))
        })?;

        let now = Utc::now();
        let updated = self
            .repository
            .books
            .update(id, |book| book.apply(draft, now))
            .await;

        if !updated {
            return Err(AppError::NotFound(self.text(Message::UpdateUnknownId)));
        }

        tracing::info!("Book {} updated", id);
        Ok(())
    }

    /// Remove a book
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository
            .books
            .remove(id)
            .await
            .ok_or_else(|| AppError::NotFound(self.text(Message::DeleteUnknownId)))?;

        tracing::info!("Book {} deleted", id);
        Ok(())
    }

    /// Number of stored books
    pub async fn count(&self) -> usize {
        self.repository.books.len().await
    }
}
