//! Info command implementation.

use anyhow::{Context, Result};
use pregao_lib::prelude::*;

/// Show the directory entry for a ticker.
pub(crate) fn show_info(input: &str) -> Result<()> {
    let symbol = Symbol::parse(input)?;
    let listing = TickerDirectory::global()
        .get(symbol.as_str())
        .with_context(|| format!("Unknown symbol: {symbol}"))?;

    println!("Symbol:   {}", listing.symbol());
    println!("Ticker:   {}", listing.symbol().base());
    println!("Name:     {}", listing.name());
    println!("Exchange: B3");
    println!("Currency: BRL");

    Ok(())
}
