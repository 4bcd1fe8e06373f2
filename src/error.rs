use crate::publisher_block::PublisherBlock;
use thiserror::Error;

/// Failures of the text resolvers. All of them are recoverable: callers log
/// and fall back to an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown ordinal word {0:?}")]
    UnknownOrdinal(String),

    #[error("edition number {0} is out of range")]
    EditionOutOfRange(String),

    #[error("date string {0:?} does not match any known layout")]
    UnrecognizedDate(String),

    #[error("publisher string {0:?} carries no publication date")]
    MissingDate(String),

    #[error("the publisher string {0:?} can not be parsed")]
    UnrecognizedPublisherBlock(String),

    /// The publisher was recognized but the date was not. The partial block
    /// is still valid and must be used by the caller.
    #[error("can not get publication date: {source}")]
    PartialPublisherBlock {
        partial: PublisherBlock,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Returns the recovered publisher block, if this error carries one.
    pub fn into_partial(self) -> Option<PublisherBlock> {
        match self {
            ParseError::PartialPublisherBlock { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    #[error("the scraped page has no book title")]
    EmptyTitle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_into_partial_keeps_block() {
        let partial = PublisherBlock {
            publisher: "Packt Publishing".to_string(),
            edition: 0,
            pub_date: None,
        };
        let err = ParseError::PartialPublisherBlock {
            partial: partial.clone(),
            source: Box::new(ParseError::MissingDate("Packt Publishing".to_string())),
        };
        assert_eq!(err.into_partial(), Some(partial));
    }

    #[test]
    fn test_into_partial_on_hard_failure() {
        let err = ParseError::UnrecognizedPublisherBlock("2nd edition".to_string());
        assert_eq!(err.into_partial(), None);
    }

    #[test]
    fn test_partial_message_includes_cause() {
        let err = ParseError::PartialPublisherBlock {
            partial: PublisherBlock {
                publisher: "Unknown".to_string(),
                edition: 2,
                pub_date: NaiveDate::from_ymd_opt(2021, 1, 1),
            },
            source: Box::new(ParseError::UnrecognizedDate("Unknown 15, 2021".to_string())),
        };
        assert!(err.to_string().contains("Unknown 15, 2021"));
    }
}
