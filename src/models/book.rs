//! Book record, request payload and list filters

use chrono::{DateTime, SecondsFormat, Utc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Full stored representation of a book
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque identifier, assigned at creation
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    /// Always `page_count == read_page`
    pub finished: bool,
    pub reading: bool,
    #[serde(serialize_with = "iso_millis")]
    pub inserted_at: DateTime<Utc>,
    #[serde(serialize_with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from a validated draft
    pub fn create(id: String, draft: BookDraft, now: DateTime<Utc>) -> Self {
        let mut book = Self {
            id,
            name: String::new(),
            year: None,
            author: None,
            summary: None,
            publisher: None,
            page_count: 0,
            read_page: 0,
            finished: false,
            reading: false,
            inserted_at: now,
            updated_at: now,
        };
        book.apply(draft, now);
        book
    }

    /// Replace every mutable field with the draft's values
    pub fn apply(&mut self, draft: BookDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.year = draft.year;
        self.author = draft.author;
        self.summary = draft.summary;
        self.publisher = draft.publisher;
        self.page_count = draft.page_count;
        self.read_page = draft.read_page;
        self.reading = draft.reading;
        self.finished = draft.page_count == draft.read_page;
        self.updated_at = now;
    }
}

/// JavaScript-style `toISOString()` rendering (millisecond precision, `Z` suffix)
fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Reduced view returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Create / update request body
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    #[serde(default)]
    pub reading: bool,
}

/// Why a payload was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookViolation {
    MissingName,
    ReadPageExceedsPageCount,
}

/// A payload that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookPayload {
    /// Validate the payload. The name rule is checked before the page rule.
    pub fn into_draft(self) -> Result<BookDraft, BookViolation> {
        // name is the only field-level rule
        self.validate().map_err(|_| BookViolation::MissingName)?;
        let name = self.name.ok_or(BookViolation::MissingName)?;

        if self.read_page > self.page_count {
            return Err(BookViolation::ReadPageExceedsPageCount);
        }

        Ok(BookDraft {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count,
            read_page: self.read_page,
            reading: self.reading,
        })
    }
}

/// Raw list query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive pattern matched against the book name
    pub name: Option<String>,
    /// `0` or `1`
    pub reading: Option<String>,
    /// `0` or `1`
    pub finished: Option<String>,
}

impl BookQuery {
    /// Fold raw query pairs. A repeated key becomes its values joined by
    /// commas, so repeated flags coerce to NaN and a repeated name is
    /// matched as the joined text.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        fn push(slot: &mut Option<String>, value: String) {
            match slot {
                Some(joined) => {
                    joined.push(',');
                    joined.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }

        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => push(&mut query.name, value),
                "reading" => push(&mut query.reading, value),
                "finished" => push(&mut query.finished, value),
                _ => {}
            }
        }
        query
    }
}

/// Compiled form of [`BookQuery`]
#[derive(Debug)]
pub struct BookFilter {
    name: Option<NameMatcher>,
    reading: Option<f64>,
    finished: Option<f64>,
}

#[derive(Debug)]
enum NameMatcher {
    Pattern(Regex),
    /// Fallback for values that are not valid patterns
    Literal(String),
}

impl NameMatcher {
    fn new(raw: &str) -> Self {
        match RegexBuilder::new(raw).case_insensitive(true).build() {
            Ok(regex) => NameMatcher::Pattern(regex),
            Err(_) => NameMatcher::Literal(raw.to_lowercase()),
        }
    }

    fn is_match(&self, name: &str) -> bool {
        match self {
            NameMatcher::Pattern(regex) => regex.is_match(name),
            NameMatcher::Literal(needle) => name.to_lowercase().contains(needle.as_str()),
        }
    }
}

impl BookFilter {
    pub fn new(query: &BookQuery) -> Self {
        Self {
            name: query
                .name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(NameMatcher::new),
            reading: query.reading.as_deref().map(to_number),
            finished: query.finished.as_deref().map(to_number),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.name.as_ref().map_or(true, |m| m.is_match(&book.name))
            && flag_matches(self.reading, book.reading)
            && flag_matches(self.finished, book.finished)
    }
}

fn flag_matches(wanted: Option<f64>, stored: bool) -> bool {
    // NaN compares unequal to everything
    wanted.map_or(true, |wanted| f64::from(u8::from(stored)) == wanted)
}

/// Numeric coercion of a query string, following dynamic-language `Number()`
/// semantics: empty means zero, unparseable means NaN.
pub fn to_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |v| v as f64);
        }
    }

    let (negative, unsigned) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    if unsigned == "Infinity" {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    // Rust also accepts "inf" and "nan"; require a digit or dot up front
    match unsigned.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '.' => s.parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
