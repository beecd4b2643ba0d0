//! Exchange ticker symbols.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Market suffix identifying B3 listings.
pub const EXCHANGE_SUFFIX: &str = ".SA";

/// A normalized exchange ticker, e.g. `PETR4.SA`.
///
/// Input is trimmed and uppercased; the exchange suffix is appended when
/// absent, so `" petr4 "` and `"PETR4.SA"` name the same symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Normalizes free-form input into an exchange symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank or contains whitespace.
    pub fn parse(input: &str) -> Result<Self, SymbolError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SymbolError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(SymbolError::Whitespace(trimmed.to_string()));
        }

        let mut symbol = trimmed.to_uppercase();
        if !symbol.ends_with(EXCHANGE_SUFFIX) {
            symbol.push_str(EXCHANGE_SUFFIX);
        }
        Ok(Self(symbol))
    }

    /// Returns the full symbol including the exchange suffix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the ticker without the exchange suffix (e.g. `PETR4`).
    #[must_use]
    pub fn base(&self) -> &str {
        self.0.strip_suffix(EXCHANGE_SUFFIX).unwrap_or(&self.0)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = SymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error returned when input cannot be turned into a symbol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// Input was empty or only whitespace.
    #[error("ticker symbol is empty")]
    Empty,

    /// Input contained inner whitespace.
    #[error("ticker symbol '{0}' contains whitespace")]
    Whitespace(String),
}
