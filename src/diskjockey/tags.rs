//! Tag validation for medium records.
//!
//! Valid tags:
//! - Are not empty
//! - Contain no whitespace or control characters
//! - Contain no commas (commas separate tags on the command line)
//!
//! Tags are case-sensitive: `Music` and `music` are different tags.

use crate::error::{DjError, Result};
use std::collections::BTreeSet;

/// Validates a single tag.
///
/// # Examples
/// ```
/// use diskjockey::tags::validate_tag;
///
/// assert!(validate_tag("music").is_ok());
/// assert!(validate_tag("2019").is_ok());
/// assert!(validate_tag("sci-fi").is_ok());
///
/// assert!(validate_tag("").is_err());
/// assert!(validate_tag("two words").is_err());
/// assert!(validate_tag("a,b").is_err());
/// ```
pub fn validate_tag(tag: &str) -> std::result::Result<(), TagValidationError> {
    if tag.is_empty() {
        return Err(TagValidationError::Empty);
    }
    for ch in tag.chars() {
        if ch.is_whitespace() {
            return Err(TagValidationError::Whitespace);
        }
        if ch.is_control() || ch == ',' {
            return Err(TagValidationError::InvalidCharacter(ch));
        }
    }
    Ok(())
}

/// Validates every tag and collects them into a set.
///
/// Duplicates collapse silently; the first invalid tag fails the whole batch.
pub fn tag_set<I, T>(tags: I) -> Result<BTreeSet<String>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut set = BTreeSet::new();
    for tag in tags {
        let tag = tag.as_ref();
        validate_tag(tag).map_err(|e| DjError::InvalidTag {
            tag: tag.to_string(),
            reason: e.to_string(),
        })?;
        set.insert(tag.to_string());
    }
    Ok(set)
}

/// Error type for tag validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    Empty,
    Whitespace,
    InvalidCharacter(char),
}

impl std::fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagValidationError::Empty => write!(f, "tag cannot be empty"),
            TagValidationError::Whitespace => write!(f, "tag cannot contain whitespace"),
            TagValidationError::InvalidCharacter(ch) => {
                write!(f, "tag contains invalid character {:?}", ch)
            }
        }
    }
}

impl std::error::Error for TagValidationError {}
