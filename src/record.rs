use crate::ordinal::short_ordinal;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s]|[:] |[,] | ?[()] ?| ?[\[\]] ?|[/]|[|]").unwrap());
static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^#\-().,\p{L}\p{N}\p{Z}\p{Sm}\p{Sc}\p{Sk}\p{Pi}\p{Pf}\p{Pc}\p{Mc}]").unwrap()
});
static STRAY_APOSTROPHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[´’]").unwrap());
static MULTI_DOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());

const ARCHIVE_EXTENSION: &str = ".zip";

/// The normalized metadata of one book, ready for operator review and storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookRecord {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub isbn10: String,
    /// 0 when unknown.
    pub isbn13: u64,
    pub asin: String,
    pub pages: u16,
    pub language: String,
    pub publisher: String,
    pub publisher_url: String,
    /// 0 when unknown.
    pub edition: u8,
    pub pub_date: Option<NaiveDate>,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub formats: Vec<String>,
    pub book_file_name: String,
    pub book_file_size: u64,
    pub cover_file_name: String,
    pub cover_url: String,
}

impl BookRecord {
    /// ISBN-10, then ASIN, then ISBN-13.
    pub fn primary_id(&self) -> Option<String> {
        if !self.isbn10.is_empty() {
            return Some(self.isbn10.clone());
        }
        if !self.asin.is_empty() {
            return Some(self.asin.clone());
        }
        if self.isbn13 != 0 {
            return Some(self.isbn13.to_string());
        }
        None
    }

    /// Deterministic archive name, e.g. `NSP.Awesome.Book.1234567890.Feb.2020.zip`.
    /// It doubles as the object-store key suffix, so it must stay byte-stable.
    pub fn archive_file_name(&self) -> String {
        let mut parts: Vec<String> = vec![self.publisher.clone(), self.title.clone()];
        if self.edition > 1 {
            parts.push(short_ordinal(u32::from(self.edition)));
            parts.push("Edition".to_string());
        }
        if let Some(id) = self.primary_id() {
            parts.push(id);
        }
        if let Some(date) = self.pub_date {
            parts.push(date.format("%b %Y").to_string());
        }

        let name = format!("{}{}", parts.join(" "), ARCHIVE_EXTENSION);
        let name = name.replace('&', "and");
        let name = SEPARATORS.replace_all(&name, ".");
        let name = DISALLOWED_CHARS.replace_all(&name, "");
        let name = STRAY_APOSTROPHES.replace_all(&name, "");
        MULTI_DOT.replace_all(&name, ".").into_owned()
    }

    /// The stored archive name without its extension.
    pub fn archive_stem(&self) -> &str {
        match self.book_file_name.rfind('.') {
            Some(idx) => &self.book_file_name[..idx],
            None => &self.book_file_name,
        }
    }

    /// Primary id plus the cover URL's extension, e.g. `1593279280.jpg`.
    pub fn cover_file_name(&self) -> String {
        match self.primary_id() {
            Some(id) => format!("{}{}", id, cover_extension(&self.cover_url)),
            None => String::new(),
        }
    }

    /// Copies values from a previously stored record into fields that are
    /// still empty. Publisher, language and the relation lists are left alone.
    pub fn fill_missing_from(&mut self, existing: &BookRecord) {
        fill_str(&mut self.title, &existing.title);
        fill_str(&mut self.subtitle, &existing.subtitle);
        fill_str(&mut self.description, &existing.description);
        fill_str(&mut self.isbn10, &existing.isbn10);
        fill_str(&mut self.asin, &existing.asin);
        fill_str(&mut self.publisher_url, &existing.publisher_url);
        fill_str(&mut self.book_file_name, &existing.book_file_name);
        fill_str(&mut self.cover_file_name, &existing.cover_file_name);
        if self.isbn13 == 0 {
            self.isbn13 = existing.isbn13;
        }
        if self.pages == 0 {
            self.pages = existing.pages;
        }
        if self.edition == 0 {
            self.edition = existing.edition;
        }
        if self.pub_date.is_none() {
            self.pub_date = existing.pub_date;
        }
        if self.book_file_size == 0 {
            self.book_file_size = existing.book_file_size;
        }
    }

    pub fn dedup_lists(&mut self) {
        dedup_keep_order(&mut self.authors);
        dedup_keep_order(&mut self.categories);
        dedup_keep_order(&mut self.tags);
        dedup_keep_order(&mut self.formats);
    }

    /// Fields an operator has to fill in before the record can be stored.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_empty() {
            missing.push("title");
        }
        if self.publisher.is_empty() {
            missing.push("publisher");
        }
        if self.pub_date.is_none() {
            missing.push("pub_date");
        }
        if self.primary_id().is_none() {
            missing.push("identifier");
        }
        missing
    }
}

fn fill_str(target: &mut String, source: &str) {
    if target.is_empty() {
        *target = source.to_string();
    }
}

fn dedup_keep_order(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}

fn cover_extension(cover_url: &str) -> &str {
    let last_segment = cover_url.rsplit('/').next().unwrap_or(cover_url);
    match last_segment.rfind('.') {
        Some(idx) => &last_segment[idx..],
        None => "",
    }
}

fn elide(text: &str, keep: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= keep * 2 {
        return text.to_string();
    }
    let head: String = chars[..keep].iter().collect();
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{}...{}", head, tail)
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .pub_date
            .map(|d| d.format("%e %b %Y").to_string())
            .unwrap_or_default();

        writeln!(f, "BookRecord: {{")?;
        writeln!(f, "\tTitle: {:?}", self.title)?;
        writeln!(f, "\tSubtitle: {:?}", self.subtitle)?;
        writeln!(f, "\tDescription: {:?}", elide(&self.description, 40))?;
        writeln!(f, "\tISBN10: {:?}", self.isbn10)?;
        writeln!(f, "\tISBN13: {}", self.isbn13)?;
        writeln!(f, "\tASIN: {:?}", self.asin)?;
        writeln!(f, "\tPages: {}", self.pages)?;
        writeln!(f, "\tLanguage: {:?}", self.language)?;
        writeln!(f, "\tPublisher: {:?}", self.publisher)?;
        writeln!(f, "\tPublisherURL: {:?}", self.publisher_url)?;
        writeln!(f, "\tEdition: {}", self.edition)?;
        writeln!(f, "\tPubDate: {:?}", date)?;
        writeln!(f, "\tAuthors: {:?}", self.authors.join(","))?;
        writeln!(f, "\tCategories: {:?}", self.categories.join(","))?;
        writeln!(f, "\tTags: {:?}", self.tags.join(","))?;
        writeln!(f, "\tFormats: {:?}", self.formats.join(","))?;
        writeln!(f, "\tBookFileName: {:?}", self.book_file_name)?;
        writeln!(f, "\tBookFileSize: {}", self.book_file_size)?;
        writeln!(f, "\tCoverFileName: {:?}", self.cover_file_name)?;
        writeln!(f, "\tCoverURL: {:?}", self.cover_url)?;
        writeln!(f, "}}")
    }
}
