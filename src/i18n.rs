//! Response message catalog
//!
//! Handlers and services decide *what* happened through [`Message`]; the
//! wording is looked up here so it can change per locale without touching
//! control flow.

use serde::{Deserialize, Serialize};

use crate::models::book::BookViolation;

/// Language of human-readable response messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Bahasa Indonesia
    #[default]
    Id,
    /// English
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Id => "id",
            Locale::En => "en",
        }
    }

    /// Render a message in this locale
    pub fn text(&self, message: Message) -> &'static str {
        match self {
            Locale::Id => indonesian(message),
            Locale::En => english(message),
        }
    }
}

/// Every message the catalog can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Added,
    Updated,
    Deleted,
    AddRejected(BookViolation),
    UpdateRejected(BookViolation),
    AddFailed,
    NotFound,
    UpdateUnknownId,
    DeleteUnknownId,
    MalformedBody,
}

fn indonesian(message: Message) -> &'static str {
    use BookViolation::*;

    match message {
        Message::Added => "Buku berhasil ditambahkan",
        Message::Updated => "Buku berhasil diperbarui",
        Message::Deleted => "Buku berhasil dihapus",
        Message::AddRejected(MissingName) => "Gagal menambahkan buku. Mohon isi nama buku",
        Message::AddRejected(ReadPageExceedsPageCount) => {
            "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
        }
        Message::UpdateRejected(MissingName) => "Gagal memperbarui buku. Mohon isi nama buku",
        Message::UpdateRejected(ReadPageExceedsPageCount) => {
            "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
        }
        Message::AddFailed => "Buku gagal ditambahkan",
        Message::NotFound => "Buku tidak ditemukan",
        Message::UpdateUnknownId => "Gagal memperbarui buku. Id tidak ditemukan",
        Message::DeleteUnknownId => "Buku gagal dihapus. Id tidak ditemukan",
        Message::MalformedBody => "Permintaan tidak valid. Periksa kembali data buku",
    }
}

fn english(message: Message) -> &'static str {
    use BookViolation::*;

    match message {
        Message::Added => "Book added successfully",
        Message::Updated => "Book updated successfully",
        Message::Deleted => "Book deleted successfully",
        Message::AddRejected(MissingName) => "Failed to add book. Please fill in the book name",
        Message::AddRejected(ReadPageExceedsPageCount) => {
            "Failed to add book. readPage may not exceed pageCount"
        }
        Message::UpdateRejected(MissingName) => {
            "Failed to update book. Please fill in the book name"
        }
        Message::UpdateRejected(ReadPageExceedsPageCount) => {
            "Failed to update book. readPage may not exceed pageCount"
        }
        Message::AddFailed => "Failed to add book",
        Message::NotFound => "Book not found",
        Message::UpdateUnknownId => "Failed to update book. Id not found",
        Message::DeleteUnknownId => "Failed to delete book. Id not found",
        Message::MalformedBody => "Invalid request. Please check the book data",
    }
}
