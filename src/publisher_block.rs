//! Decomposes the composite "Publisher; Nth edition (Date)" detail string.
//!
//! The string comes in many shapes, so it is matched against an ordered list
//! of pattern families. Every family is self-contained: it either captures a
//! [`BlockMatch`] or nothing. The matches are folded in order and a later
//! match overwrites whichever fields it captured, so US layouts are tried
//! before EU layouts and numeric editions before spelled ones.

use crate::error::ParseError;
use crate::ordinal::ordinal_to_number;
use crate::parser::resolve_date;
use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Publisher, edition and date recovered from the publisher detail string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherBlock {
    pub publisher: String,
    pub edition: u8,
    pub pub_date: Option<NaiveDate>,
}

/// How a family speaks about the edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditionHint<'a> {
    /// The family has no edition clause; the edition is left untouched.
    Unspecified,
    /// A dated block without an explicit number: first edition.
    Default,
    Numeral(u8),
    /// Spelled ordinal, only applied when the word resolves.
    Word(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMatch<'a> {
    pub publisher: &'a str,
    pub edition: EditionHint<'a>,
    pub date: Option<&'a str>,
}

pub struct PatternFamily {
    pub name: &'static str,
    dated: bool,
    regex: Regex,
}

impl PatternFamily {
    fn new(name: &'static str, dated: bool, pattern: &str) -> Self {
        Self {
            name,
            dated,
            regex: Regex::new(pattern).unwrap(),
        }
    }

    pub fn capture<'a>(&self, s: &'a str) -> Option<BlockMatch<'a>> {
        let caps = self.regex.captures(s)?;
        let publisher = caps.name("publisher")?.as_str();

        let edition = match (caps.name("numeral"), caps.name("word")) {
            (Some(numeral), _) => match numeral.as_str().parse::<u8>() {
                Ok(n) => EditionHint::Numeral(n),
                Err(_) => {
                    debug!("Edition {:?} out of range in {:?}", numeral.as_str(), s);
                    EditionHint::Unspecified
                }
            },
            (None, Some(word)) => EditionHint::Word(word.as_str()),
            (None, None) if self.dated => EditionHint::Default,
            (None, None) => EditionHint::Unspecified,
        };

        Some(BlockMatch {
            publisher,
            edition,
            date: caps.name("date").map(|m| m.as_str()),
        })
    }
}

const US_DATE: &str = r"(?P<date>\w+ \d+, \d+)";
const EU_DATE: &str = r"(?P<date>\d+ \w+\.? \d+)";

pub static PATTERN_FAMILIES: Lazy<Vec<PatternFamily>> = Lazy::new(|| {
    let numbered = |date: &str| {
        format!(r"^(?P<publisher>[A-Z][^;]+); (?:(?P<numeral>\d+)(?:st|nd|rd|th))?[^(]+\({date}\)")
    };
    let plain = |date: &str| format!(r"^(?P<publisher>[A-Z][^(;]+) \({date}\)");
    let spelled = |date: &str| {
        format!(
            r"(?i)^(?P<publisher>[A-Z][^(;]+); (?P<word>[a-z-]+(?:st|nd|rd|th))(?: [a-z]+)? edition \({date}\)"
        )
    };

    vec![
        // Wiley; 1st edition (October 16, 2017)
        PatternFamily::new("us-numbered", true, &numbered(US_DATE)),
        // No Starch Press (November 5, 2020)
        PatternFamily::new("us-plain", true, &plain(US_DATE)),
        // Esri Press; Fourth Bilingual edition (December 28, 2021)
        PatternFamily::new("us-spelled", true, &spelled(US_DATE)),
        // Packt Publishing; 3rd edition (17 May 2021)
        PatternFamily::new("eu-numbered", true, &numbered(EU_DATE)),
        // No Starch Press (1 Oct. 2020)
        PatternFamily::new("eu-plain", true, &plain(EU_DATE)),
        // Esri Press; Fourth edition (10 Feb. 2022)
        PatternFamily::new("eu-spelled", true, &spelled(EU_DATE)),
        // Springer; 1st ed. 2020 edition
        PatternFamily::new(
            "edition-only",
            false,
            r"^(?P<publisher>[A-Z][^(;]+); (?:(?P<numeral>\d+)(?:st|nd|rd|th) )?ed\. \d{4} edition$",
        ),
        // Packt Publishing
        PatternFamily::new("bare-name", false, r"^(?P<publisher>[A-Z][^(;)]*)$"),
    ]
});

/// Resolves a publisher detail string into a [`PublisherBlock`].
///
/// A string with no recognizable publisher is a hard failure. A recognized
/// publisher without a usable date yields
/// [`ParseError::PartialPublisherBlock`], which still carries the publisher
/// and edition.
pub fn resolve_publisher_block(s: &str) -> Result<PublisherBlock, ParseError> {
    let mut block = PublisherBlock::default();
    let mut date_text: Option<&str> = None;

    for family in PATTERN_FAMILIES.iter() {
        let Some(found) = family.capture(s) else {
            continue;
        };
        debug!("Publisher string {:?} matched family {}", s, family.name);

        block.publisher = found.publisher.trim().to_string();
        match found.edition {
            EditionHint::Unspecified => {}
            EditionHint::Default => block.edition = 1,
            EditionHint::Numeral(n) => block.edition = n,
            EditionHint::Word(word) => {
                if let Some(n) = ordinal_to_number(word)
                    .ok()
                    .and_then(|n| u8::try_from(n).ok())
                {
                    block.edition = n;
                }
            }
        }
        if found.date.is_some() {
            date_text = found.date;
        }
    }

    if block.publisher.is_empty() {
        return Err(ParseError::UnrecognizedPublisherBlock(s.to_string()));
    }

    let date_result = match date_text {
        Some(text) => resolve_date(text),
        None => Err(ParseError::MissingDate(s.to_string())),
    };

    match date_result {
        Ok(date) => {
            block.pub_date = Some(date);
            Ok(block)
        }
        Err(err) => Err(ParseError::PartialPublisherBlock {
            partial: block,
            source: Box::new(err),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(name: &str) -> &'static PatternFamily {
        PATTERN_FAMILIES.iter().find(|f| f.name == name).unwrap()
    }

    fn block(publisher: &str, edition: u8, date: (i32, u32, u32)) -> PublisherBlock {
        PublisherBlock {
            publisher: publisher.to_string(),
            edition,
            pub_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        }
    }

    #[test]
    fn test_resolve_publisher_block() {
        let cases = vec![
            ("Wiley; 1st edition (October 16, 2017)", block("Wiley", 1, (2017, 10, 16))),
            (
                "No Starch Press; 2nd edition (May 3, 2019)",
                block("No Starch Press", 2, (2019, 5, 3)),
            ),
            (
                "No Starch Press (November 5, 2020)",
                block("No Starch Press", 1, (2020, 11, 5)),
            ),
            (
                "Apress; 1st ed. edition (November 1, 2020)",
                block("Apress", 1, (2020, 11, 1)),
            ),
            (
                "Packt Publishing; 3rd edition (17 May 2021)",
                block("Packt Publishing", 3, (2021, 5, 17)),
            ),
            ("Pearson; 3rd edition (2 Jun. 2022)", block("Pearson", 3, (2022, 6, 2))),
            ("No Starch Press (25 May 2019)", block("No Starch Press", 1, (2019, 5, 25))),
            ("No Starch Press (1 Oct. 2020)", block("No Starch Press", 1, (2020, 10, 1))),
            (
                "Esri Press; Fourth edition (December 28, 2021)",
                block("Esri Press", 4, (2021, 12, 28)),
            ),
            (
                "Esri Press; Fourth Bilingual edition (December 28, 2021)",
                block("Esri Press", 4, (2021, 12, 28)),
            ),
            ("Esri Press; Fourth edition (10 Feb. 2022)", block("Esri Press", 4, (2022, 2, 10))),
            ("Manning; Illustrated edition (15 Sept. 2021)", block("Manning", 1, (2021, 9, 15))),
        ];

        for (input, expected) in cases {
            assert_eq!(resolve_publisher_block(input), Ok(expected), "input: {}", input);
        }
    }

    #[test]
    fn test_bare_name_is_partial() {
        let err = resolve_publisher_block("Packt Publishing").unwrap_err();
        assert!(matches!(
            err,
            ParseError::PartialPublisherBlock { ref source, .. }
                if matches!(**source, ParseError::MissingDate(_))
        ));
        assert_eq!(
            err.into_partial(),
            Some(PublisherBlock {
                publisher: "Packt Publishing".to_string(),
                edition: 0,
                pub_date: None,
            })
        );
    }

    #[test]
    fn test_edition_only_is_partial() {
        let partial = resolve_publisher_block("Springer; 2nd ed. 2019 edition")
            .unwrap_err()
            .into_partial();
        assert_eq!(
            partial,
            Some(PublisherBlock {
                publisher: "Springer".to_string(),
                edition: 2,
                pub_date: None,
            })
        );
    }

    #[test]
    fn test_undateable_block_is_partial() {
        let err = resolve_publisher_block("Unknown; 2nd edition (Unknown 15, 2021)").unwrap_err();
        assert!(matches!(
            err,
            ParseError::PartialPublisherBlock { ref source, .. }
                if **source == ParseError::UnrecognizedDate("Unknown 15, 2021".to_string())
        ));
        assert_eq!(
            err.into_partial().map(|b| (b.publisher, b.edition)),
            Some(("Unknown".to_string(), 2))
        );
    }

    #[test]
    fn test_oversized_numeral_leaves_edition_unset() {
        assert_eq!(
            resolve_publisher_block("Addison-Wesley Professional; 300th edition (May 3, 2019)"),
            Ok(block("Addison-Wesley Professional", 0, (2019, 5, 3)))
        );

        let found = family("us-numbered")
            .capture("Addison-Wesley Professional; 300th edition (May 3, 2019)")
            .unwrap();
        assert_eq!(found.edition, EditionHint::Unspecified);
    }

    #[test]
    fn test_unrecognized_block() {
        for input in ["2nd edition: Unknown (15 June 2021)", "", "wiley (2020)"] {
            assert_eq!(
                resolve_publisher_block(input),
                Err(ParseError::UnrecognizedPublisherBlock(input.to_string()))
            );
        }
    }

    #[test]
    fn test_family_captures() {
        let found = family("us-numbered")
            .capture("Wiley; 1st edition (October 16, 2017)")
            .unwrap();
        assert_eq!(found.publisher, "Wiley");
        assert_eq!(found.edition, EditionHint::Numeral(1));
        assert_eq!(found.date, Some("October 16, 2017"));

        let found = family("us-spelled")
            .capture("Esri Press; Fourth edition (December 28, 2021)")
            .unwrap();
        assert_eq!(found.edition, EditionHint::Word("Fourth"));

        let found = family("eu-plain").capture("No Starch Press (1 Oct. 2020)").unwrap();
        assert_eq!(found.edition, EditionHint::Default);
        assert_eq!(found.date, Some("1 Oct. 2020"));

        let found = family("bare-name").capture("Packt Publishing").unwrap();
        assert_eq!(found.edition, EditionHint::Unspecified);
        assert_eq!(found.date, None);

        assert!(
            family("us-plain")
                .capture("Packt Publishing; 3rd edition (17 May 2021)")
                .is_none()
        );
        assert!(
            family("eu-numbered")
                .capture("Wiley; 1st edition (October 16, 2017)")
                .is_none()
        );
    }
}
