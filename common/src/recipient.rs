//! # Recipient Model
//!
//! One validated row of the roster file: who gets a message and in
//! which language. Parsing is the only way to construct these types,
//! so a `Recipient` that exists is a `Recipient` that is sendable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipientError {
    #[error("recipient name is empty")]
    EmptyName,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("unsupported language '{0}'")]
    UnknownLanguage(String),
    #[error("expected 3 or 4 columns, found {0}")]
    ColumnCount(usize),
}

/// A syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: &str) -> Result<Self, RecipientError> {
        let s = s.trim();
        if s.validate_email() {
            Ok(Self(s.to_string()))
        } else {
            Err(RecipientError::InvalidEmail(s.to_string()))
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Template language a recipient receives their message in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
}

impl Language {
    /// The code used in roster rows and `language.json` keys.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }
}

impl FromStr for Language {
    type Err = RecipientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            other => Err(RecipientError::UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A validated roster entry. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub id: Option<String>,
    pub name: String,
    pub email: EmailAddress,
    pub language: Language,
}

impl Recipient {
    /// Validates the raw field values of one roster row.
    pub fn parse(
        id: Option<&str>,
        name: &str,
        email: &str,
        language: &str,
    ) -> Result<Self, RecipientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecipientError::EmptyName);
        }

        Ok(Self {
            id: id.map(str::trim).filter(|s| !s.is_empty()).map(String::from),
            name: name.to_string(),
            email: EmailAddress::parse(email)?,
            language: language.parse()?,
        })
    }
}
