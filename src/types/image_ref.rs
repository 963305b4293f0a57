// ABOUTME: Container image reference parsing and validation.
// ABOUTME: Handles formats like nginx and nginx:tag, defaulting the tag.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseImageRefError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: {0}")]
    InvalidChar(char),

    #[error("image reference has an empty tag: {0}")]
    EmptyTag(String),
}

/// Validated image reference of the form `name[:tag]`.
///
/// The name may include registry and path components; the tag defaults
/// to `latest` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    name: String,
    tag: String,
}

impl ImageRef {
    pub fn parse(input: &str) -> Result<Self, ParseImageRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageRefError::Empty);
        }

        for c in input.chars() {
            if !c.is_ascii_alphanumeric() && !matches!(c, '/' | ':' | '.' | '-' | '_') {
                return Err(ParseImageRefError::InvalidChar(c));
            }
        }

        // A colon after the last slash separates the tag; a colon before
        // it belongs to a registry port.
        let (name, tag) = match input.rsplit_once(':') {
            Some((name, tag)) if !tag.contains('/') => {
                if tag.is_empty() {
                    return Err(ParseImageRefError::EmptyTag(input.to_string()));
                }
                (name.to_string(), tag.to_string())
            }
            _ => (input.to_string(), "latest".to_string()),
        };

        Ok(Self { name, tag })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

impl FromStr for ImageRef {
    type Err = ParseImageRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
