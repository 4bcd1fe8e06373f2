//! Combines the raw scraped strings and the resolvers into one [`BookRecord`].

use crate::error::AssembleError;
use crate::parser::{resolve_date, resolve_edition, resolve_page_count, split_title};
use crate::publisher::canonicalize_publisher_name;
use crate::publisher_block::{PublisherBlock, resolve_publisher_block};
use crate::record::BookRecord;
use crate::scraped::*;
use log::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.amazon.com/dp/";

// Tried in this order; the first non-empty value is used.
const PAGE_COUNT_KEYS: [&str; 5] = [
    PAGES_KEY,
    PAPERBACK_KEY,
    HARDCOVER_KEY,
    PRINT_LENGTH_KEY,
    PRINTED_ACCESS_CODE_KEY,
];

pub struct MetadataAssembler {
    base_url: String,
}

impl Default for MetadataAssembler {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl MetadataAssembler {
    /// Base URL of the product detail page. Anything that is not an http(s)
    /// or file URL falls back to [`DEFAULT_BASE_URL`].
    pub fn new(base_url: &str) -> Self {
        if base_url.starts_with("http") || base_url.starts_with("file") {
            Self {
                base_url: base_url.to_string(),
            }
        } else {
            Self::default()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn assemble(&self, raw: &RawScrapedFields) -> Result<BookRecord, AssembleError> {
        let (title, subtitle) = split_title(raw.title.trim());
        if title.trim().is_empty() {
            return Err(AssembleError::EmptyTitle);
        }

        let block = match resolve_publisher_block(raw.detail(PUBLISHER_KEY)) {
            Ok(block) => block,
            Err(err) => {
                warn!("{}", err);
                err.into_partial().unwrap_or_default()
            }
        };

        let mut record = BookRecord {
            title,
            subtitle,
            description: raw.description.clone(),
            isbn10: isbn10(raw),
            isbn13: isbn13(raw),
            asin: raw.detail(ASIN_KEY).to_string(),
            pages: page_count(raw),
            language: raw.detail(LANGUAGE_KEY).to_string(),
            publisher: canonicalize_publisher_name(&block.publisher),
            edition: edition(&raw.title, &raw.subtitle, &block),
            pub_date: block.pub_date,
            authors: raw.authors.clone(),
            categories: raw.categories.clone(),
            cover_url: raw.cover_url.clone(),
            ..Default::default()
        };

        fill_from_carousel(&mut record, raw);

        record.publisher_url = self.publisher_url(&record);
        record.cover_file_name = record.cover_file_name();
        record.book_file_name = record.archive_file_name();
        debug!(
            "Assembled {:?}: archive {:?}, cover {:?}",
            record.title, record.book_file_name, record.cover_file_name
        );

        Ok(record)
    }

    fn publisher_url(&self, record: &BookRecord) -> String {
        if !record.isbn10.is_empty() {
            return format!("{}{}", self.base_url, record.isbn10);
        }
        if !record.asin.is_empty() {
            return format!("{}{}", self.base_url, record.asin);
        }
        String::new()
    }
}

/// Assembles a record with the default product base URL.
pub fn assemble_metadata(raw: &RawScrapedFields) -> Result<BookRecord, AssembleError> {
    MetadataAssembler::default().assemble(raw)
}

/// The title string wins over the subtitle string, which wins over the
/// publisher block.
fn edition(raw_title: &str, raw_subtitle: &str, block: &PublisherBlock) -> u8 {
    [raw_title, raw_subtitle]
        .into_iter()
        .filter_map(|s| resolve_edition(s).ok())
        .find(|&edition| edition > 0)
        .unwrap_or(block.edition)
}

fn fill_from_carousel(record: &mut BookRecord, raw: &RawScrapedFields) {
    if raw.carousel.is_empty() {
        return;
    }

    if record.publisher.is_empty() {
        record.publisher = canonicalize_publisher_name(raw.carousel_value(PUBLISHER_KEY));
    }

    if record.edition == 0 {
        let value = format!("{} Edition", raw.carousel_value(EDITION_KEY));
        record.edition = match resolve_edition(&value) {
            Ok(edition) if edition > 0 => edition,
            _ => 1,
        };
    }

    if record.pub_date.is_none() {
        let value = raw.carousel_value(PUB_DATE_KEY);
        match resolve_date(value) {
            Ok(date) => record.pub_date = Some(date),
            Err(err) => warn!("Carousel publication date: {}", err),
        }
    }
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("")
}

fn isbn10(raw: &RawScrapedFields) -> String {
    // The source ISBN detail often holds an ASIN instead.
    let candidates: [(&str, fn(&str) -> bool); 3] = [
        (raw.isbn10.as_str(), is_isbn10_shaped),
        (raw.detail(ISBN10_KEY), is_isbn10_shaped),
        (raw.detail(SOURCE_ISBN_KEY), is_asin_shaped),
    ];
    let Some((candidate, accepts)) = candidates
        .into_iter()
        .find(|(value, _)| !value.trim().is_empty())
    else {
        return String::new();
    };

    let cleaned = candidate.trim().replace('-', "");
    if accepts(&cleaned) {
        cleaned
    } else {
        warn!("Ignoring malformed ISBN-10 {:?}", candidate);
        String::new()
    }
}

// Ten digits, or nine digits and an X check digit.
fn is_isbn10_shaped(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[..9].iter().all(u8::is_ascii_digit)
        && (bytes[9].is_ascii_digit() || bytes[9] == b'X' || bytes[9] == b'x')
}

fn is_asin_shaped(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn isbn13(raw: &RawScrapedFields) -> u64 {
    let candidate = first_non_empty(&[raw.isbn13.as_str(), raw.detail(ISBN13_KEY)]);
    let cleaned = candidate.trim().replace('-', "");
    if cleaned.len() == 13 && cleaned.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(value) = cleaned.parse() {
            return value;
        }
    }
    if !cleaned.is_empty() {
        warn!("Ignoring malformed ISBN-13 {:?}", candidate);
    }
    0
}

fn page_count(raw: &RawScrapedFields) -> u16 {
    PAGE_COUNT_KEYS
        .iter()
        .map(|key| raw.detail(key))
        .find(|value| !value.is_empty())
        .map(resolve_page_count)
        .unwrap_or(0)
}
