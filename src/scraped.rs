use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PUBLISHER_KEY: &str = "Publisher";
pub const EDITION_KEY: &str = "Edition";
pub const PUB_DATE_KEY: &str = "Publication date";
pub const PAGES_KEY: &str = "Print pages";
pub const PAPERBACK_KEY: &str = "Paperback";
pub const HARDCOVER_KEY: &str = "Hardcover";
pub const PRINT_LENGTH_KEY: &str = "Print length";
pub const PRINTED_ACCESS_CODE_KEY: &str = "Printed Access Code";
pub const SOURCE_ISBN_KEY: &str = "Page numbers source ISBN";
pub const ISBN10_KEY: &str = "ISBN-10";
pub const ISBN13_KEY: &str = "ISBN-13";
pub const ASIN_KEY: &str = "ASIN";
pub const LANGUAGE_KEY: &str = "Language";

// Breadcrumb roots that are not real categories.
const STORE_ROOT_CATEGORIES: [&str; 4] = [
    "Books",
    "Kindle Store",
    "Kindle eBooks",
    "New, Used & Rental Textbooks",
];

/// Raw strings captured from one product page, exactly as scraped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawScrapedFields {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub details: BTreeMap<String, String>,
    pub carousel: BTreeMap<String, String>,
    pub isbn10: String,
    pub isbn13: String,
    pub cover_url: String,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
}

impl RawScrapedFields {
    pub fn detail(&self, key: &str) -> &str {
        self.details.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn carousel_value(&self, key: &str) -> &str {
        self.carousel.get(key).map(String::as_str).unwrap_or("")
    }

    /// Records a "Key : Value" line from the product details list.
    pub fn push_detail_line(&mut self, line: &str) {
        let Some((key, value)) = line.split_once(':') else {
            return;
        };
        let key = clean_text(key);
        if key.is_empty() {
            return;
        }
        self.details.insert(key, clean_text(value));
    }

    pub fn push_carousel_entry(&mut self, key: &str, value: &str) {
        let key = clean_text(key);
        if key.is_empty() {
            return;
        }
        self.carousel.insert(key, clean_text(value));
    }

    pub fn push_category(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() || STORE_ROOT_CATEGORIES.contains(&text) {
            return;
        }
        self.categories.push(text.to_string());
    }

    pub fn push_author(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.authors.push(text.to_string());
        }
    }
}

/// Drops bidi marks, zero-width and control characters and non-ASCII spaces,
/// then trims.
pub fn clean_text(s: &str) -> String {
    s.chars()
        .filter(|&c| c == ' ' || !(c.is_whitespace() || c.is_control() || is_format_char(c)))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_detail_line() {
        let mut raw = RawScrapedFields::default();
        raw.push_detail_line("Publisher \u{200f}:\u{200e} No Starch Press (November 5, 2020)");
        raw.push_detail_line("ISBN-13\u{00a0}: 978-1718500921");
        raw.push_detail_line("Best Sellers Rank");
        raw.push_detail_line(" : orphan value");

        assert_eq!(raw.detail(PUBLISHER_KEY), "No Starch Press (November 5, 2020)");
        assert_eq!(raw.detail(ISBN13_KEY), "978-1718500921");
        assert_eq!(raw.details.len(), 2);
        assert_eq!(raw.detail(ASIN_KEY), "");
    }

    #[test]
    fn test_push_carousel_entry() {
        let mut raw = RawScrapedFields::default();
        raw.push_carousel_entry("Edition\u{200e}", " 2nd ");
        raw.push_carousel_entry("", "ignored");

        assert_eq!(raw.carousel_value(EDITION_KEY), "2nd");
        assert_eq!(raw.carousel.len(), 1);
    }

    #[test]
    fn test_push_category_skips_store_roots() {
        let mut raw = RawScrapedFields::default();
        for text in ["Books", " Computers & Technology ", "Kindle Store", "Programming", ""] {
            raw.push_category(text);
        }
        assert_eq!(raw.categories, vec!["Computers & Technology", "Programming"]);
    }

    #[test]
    fn test_push_author() {
        let mut raw = RawScrapedFields::default();
        raw.push_author(" Al Sweigart ");
        raw.push_author("   ");
        assert_eq!(raw.authors, vec!["Al Sweigart"]);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let raw: RawScrapedFields = serde_json::from_str(
            r#"{"title": "Real-World Python", "details": {"Language": "English"}}"#,
        )
        .unwrap();
        assert_eq!(raw.title, "Real-World Python");
        assert_eq!(raw.detail(LANGUAGE_KEY), "English");
        assert!(raw.carousel.is_empty());
    }
}
