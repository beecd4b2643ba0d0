//! Static B3 ticker directory for pregao.
//!
//! This crate provides the list of B3 listings the toolkit accepts, with
//! membership checks and fuzzy search over symbol and company name.
//!
//! # Example
//!
//! ```
//! use pregao_tickers::TickerDirectory;
//!
//! let directory = TickerDirectory::global();
//!
//! // Bare tickers are normalized before lookup
//! assert!(directory.is_known("petr4"));
//!
//! for listing in directory.search("banco", 5) {
//!     println!("{}: {}", listing.symbol(), listing.name());
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use pregao_types::{Listing, Symbol};

/// The listing JSON embedded at compile time.
const TICKERS_JSON: &str = include_str!("../data/b3_tickers.json");

/// Global directory instance.
static DIRECTORY: OnceLock<TickerDirectory> = OnceLock::new();

/// Directory of known B3 listings, in reference order.
#[derive(Debug)]
pub struct TickerDirectory {
    listings: Vec<Listing>,
    index: HashMap<Symbol, usize>,
}

impl TickerDirectory {
    /// Returns the global ticker directory.
    ///
    /// The directory is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        DIRECTORY.get_or_init(Self::load)
    }

    /// Loads listings from the embedded JSON data.
    fn load() -> Self {
        let listings: Vec<Listing> =
            serde_json::from_str(TICKERS_JSON).expect("Invalid b3_tickers.json");
        Self::from_listings(listings)
    }

    /// Builds a directory from listings, keeping the first entry per symbol.
    #[must_use]
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let mut unique = Vec::with_capacity(listings.len());
        let mut index = HashMap::with_capacity(listings.len());
        for listing in listings {
            if !index.contains_key(listing.symbol()) {
                index.insert(listing.symbol().clone(), unique.len());
                unique.push(listing);
            }
        }
        Self {
            listings: unique,
            index,
        }
    }

    /// Looks up a listing by ticker, normalizing the input first.
    #[must_use]
    pub fn get(&self, input: &str) -> Option<&Listing> {
        let symbol = Symbol::parse(input).ok()?;
        self.index.get(&symbol).map(|&i| &self.listings[i])
    }

    /// Returns true if the ticker names a known listing.
    #[must_use]
    pub fn is_known(&self, input: &str) -> bool {
        self.get(input).is_some()
    }

    /// Returns true if the normalized symbol is listed.
    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.index.contains_key(symbol)
    }

    /// Returns all listings in directory order.
    pub fn all(&self) -> impl Iterator<Item = &Listing> {
        self.listings.iter()
    }

    /// Returns the total number of listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Returns true if the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Searches listings by symbol or name substring (case-insensitive).
    ///
    /// A blank query returns the first `limit` listings. Results keep
    /// directory order.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Listing> {
        let needle = query.trim().to_lowercase();
        self.listings
            .iter()
            .filter(|listing| needle.is_empty() || listing.matches(&needle))
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(symbol: &str, name: &str) -> Listing {
        Listing::new(Symbol::parse(symbol).unwrap(), name)
    }

    #[test]
    fn test_directory_loads() {
        let directory = TickerDirectory::global();
        assert!(!directory.is_empty());
    }

    #[test]
    fn test_is_known_normalizes_input() {
        let directory = TickerDirectory::global();
        assert!(directory.is_known("PETR4.SA"));
        assert!(directory.is_known(" petr4 "));
        assert!(!directory.is_known("AAPL"));
        assert!(!directory.is_known(""));
    }

    #[test]
    fn test_get() {
        let directory = TickerDirectory::global();
        let vale = directory.get("vale3").expect("VALE3 should exist");
        assert_eq!(vale.symbol().as_str(), "VALE3.SA");
    }

    #[test]
    fn test_search_matches_name_and_symbol() {
        let directory = TickerDirectory::from_listings(vec![
            listing("PETR4", "Petrobras PN"),
            listing("BBAS3", "Banco do Brasil ON"),
            listing("PETR3", "Petrobras ON"),
        ]);

        let by_symbol: Vec<_> = directory
            .search("petr", 10)
            .into_iter()
            .map(|l| l.symbol().as_str())
            .collect();
        assert_eq!(by_symbol, vec!["PETR4.SA", "PETR3.SA"]);

        let by_name = directory.search("BRASIL", 10);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].symbol().as_str(), "BBAS3.SA");
    }

    #[test]
    fn test_search_limit_and_blank_query() {
        let directory = TickerDirectory::global();
        assert_eq!(directory.search("", 3).len(), 3);
        assert_eq!(directory.search("   ", 0).len(), 0);
        assert_eq!(
            directory.search("", 1)[0].symbol(),
            directory.all().next().unwrap().symbol()
        );
    }

    #[test]
    fn test_duplicate_listings_keep_first() {
        let directory = TickerDirectory::from_listings(vec![
            listing("VALE3", "Vale ON"),
            listing("vale3.sa", "Vale duplicate"),
        ]);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get("VALE3").unwrap().name(), "Vale ON");
    }
}
