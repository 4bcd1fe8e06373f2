//! Resolvers for the loosely formatted strings found on a product page:
//! book titles, edition markers, publication dates and page counts.

use crate::error::ParseError;
use crate::ordinal::ordinal_to_number;
use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// "3rd Edition", ", 5th Edition", "(2nd Edition)"
static EDITION_CARDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),? ?\(?(\d+)(st|nd|rd|th) (Edition)\)?").unwrap());
/// "Second Edition", ", Fifth Edition"
static EDITION_ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),? ?\(?([a-zA-Z]{3,}) (Edition)\)?").unwrap());
/// "522 pages"
static PAGE_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+) pages").unwrap());

/// Layouts tried in order: "October 16, 2017", "2 Jun. 2022", "17 May 2021".
const DATE_LAYOUTS: [&str; 3] = ["%B %d, %Y", "%d %b. %Y", "%d %B %Y"];

/// Splits a raw title into title and subtitle, dropping any edition marker.
pub fn split_title(raw: &str) -> (String, String) {
    let mut title = raw.to_string();

    if let Some(m) = EDITION_CARDINAL.find(&title) {
        let marker = m.as_str().to_string();
        title = title.replace(&marker, "");
    }

    if let Some(caps) = EDITION_ORDINAL.captures(&title) {
        let marker = caps[0].to_string();
        if ordinal_to_number(&caps[1]).is_ok_and(|value| value > 0) {
            title = title.replace(&marker, "");
        }
    }

    if let Some(idx) = title.rfind(": ") {
        return (title[..idx].to_string(), title[idx + 2..].to_string());
    }

    // "Some Title (Something Else)" keeps the parenthesized tail as subtitle.
    if let Some(start) = title.find('(') {
        if title.ends_with(')') {
            let head = &title[..start];
            let head = head.strip_suffix(' ').unwrap_or(head);
            return (head.to_string(), title[start..].to_string());
        }
    }

    (title, String::new())
}

/// Finds an edition number in arbitrary text. Returns 0 when no marker exists.
pub fn resolve_edition(s: &str) -> Result<u8, ParseError> {
    let s = s.replace(" ed.", "");

    if let Some(caps) = EDITION_CARDINAL.captures(&s) {
        return caps[1]
            .parse::<u8>()
            .map_err(|_| ParseError::EditionOutOfRange(caps[1].to_string()));
    }

    if let Some(caps) = EDITION_ORDINAL.captures(&s) {
        let value = ordinal_to_number(&caps[1])?;
        return u8::try_from(value)
            .map_err(|_| ParseError::EditionOutOfRange(value.to_string()));
    }

    Ok(0)
}

/// Parses a publication date in any of the layouts seen on product pages.
pub fn resolve_date(s: &str) -> Result<NaiveDate, ParseError> {
    let normalized = normalize_dotted_month(s.trim());

    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, layout) {
            return Ok(date);
        }
    }

    debug!("No date layout matched {:?}", s);
    Err(ParseError::UnrecognizedDate(s.to_string()))
}

// "15 Sept. 2021" -> "15 Sep. 2021"
fn normalize_dotted_month(s: &str) -> String {
    let tokens: Vec<&str> = s.split(' ').collect();
    if tokens.len() == 3 && tokens[1].chars().count() > 4 && tokens[1].ends_with('.') {
        let month: String = tokens[1].chars().take(3).collect();
        return format!("{} {}. {}", tokens[0], month, tokens[2]);
    }
    s.to_string()
}

/// Reads the page count from a "544 pages" string. Anything else is 0.
pub fn resolve_page_count(s: &str) -> u16 {
    PAGE_COUNT
        .captures(s)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}
