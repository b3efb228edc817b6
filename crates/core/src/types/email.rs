//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input is empty after trimming.
    #[error("email cannot be empty")]
    Empty,
    /// The input is longer than [`Email::MAX_LENGTH`].
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace inside the address.
    #[error("email cannot contain whitespace")]
    Whitespace,
    /// The input does not contain exactly one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    AtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain has no dot or an empty label.
    #[error("email domain is not valid")]
    InvalidDomain,
}

/// A syntactically valid email address.
///
/// Only used when request validation is enabled; the store itself does not
/// constrain the `email` column beyond `NOT NULL`.
///
/// ```
/// use customer_rest_core::Email;
///
/// assert!(Email::parse("ada@example.com").is_ok());
/// assert!(Email::parse("ada.lovelace+math@analytical.engine.org").is_ok());
///
/// assert!(Email::parse("ada").is_err());
/// assert!(Email::parse("ada@localhost").is_err());
/// assert!(Email::parse("a da@example.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] describing the first rule the input breaks.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::AtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::AtSymbol);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let email = Email::parse("  ada@example.com\n").unwrap();
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(Email::parse(&long), Err(EmailError::TooLong { .. })));
    }

    #[test]
    fn test_parse_at_symbol_rules() {
        assert_eq!(Email::parse("ada.example.com"), Err(EmailError::AtSymbol));
        assert_eq!(Email::parse("ada@b@example.com"), Err(EmailError::AtSymbol));
        assert_eq!(Email::parse("@example.com"), Err(EmailError::EmptyLocalPart));
    }

    #[test]
    fn test_parse_domain_rules() {
        assert_eq!(Email::parse("ada@"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("ada@example"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("ada@example..com"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("ada@.com"), Err(EmailError::InvalidDomain));
    }

    #[test]
    fn test_parse_whitespace_inside() {
        assert_eq!(Email::parse("ada love@example.com"), Err(EmailError::Whitespace));
    }

    #[test]
    fn test_deserialize_is_transparent() {
        let email: Email = serde_json::from_str("\"ada@example.com\"").unwrap();
        assert_eq!(email.to_string(), "ada@example.com");
    }
}
