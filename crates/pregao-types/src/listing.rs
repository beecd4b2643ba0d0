//! Ticker directory entries.

use serde::{Deserialize, Serialize};

use crate::Symbol;

/// A listed company in the ticker directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Exchange symbol (e.g., "PETR4.SA").
    symbol: Symbol,
    /// Display name (e.g., "Petrobras PN").
    name: String,
}

impl Listing {
    /// Creates a new listing.
    #[must_use]
    pub fn new(symbol: Symbol, name: impl Into<String>) -> Self {
        Self {
            symbol,
            name: name.into(),
        }
    }

    /// Returns the exchange symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the lowercase `needle` occurs in the symbol or name.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.symbol.as_str().to_lowercase().contains(needle)
            || self.name.to_lowercase().contains(needle)
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.symbol, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_creation() {
        let listing = Listing::new(Symbol::parse("PETR4").unwrap(), "Petrobras PN");

        assert_eq!(listing.symbol().as_str(), "PETR4.SA");
        assert_eq!(listing.name(), "Petrobras PN");
        assert_eq!(listing.to_string(), "PETR4.SA - Petrobras PN");
    }

    #[test]
    fn test_matches_symbol_or_name() {
        let listing = Listing::new(Symbol::parse("VALE3").unwrap(), "Vale ON");

        assert!(listing.matches("vale3"));
        assert!(listing.matches("on"));
        assert!(!listing.matches("petr"));
    }
}
