//! Search command implementation.

use anyhow::Result;
use pregao_lib::prelude::*;

/// Print directory listings whose symbol or name contains `query`.
pub(crate) fn search(query: Option<&str>, limit: usize) -> Result<()> {
    let directory = TickerDirectory::global();
    let matches = directory.search(query.unwrap_or_default(), limit);

    if matches.is_empty() {
        println!("No listings match '{}'.", query.unwrap_or_default());
        return Ok(());
    }

    println!("{:<12} NAME", "SYMBOL");
    println!("{}", "-".repeat(60));
    for listing in &matches {
        println!("{:<12} {}", listing.symbol(), listing.name());
    }

    println!(
        "\nShowing {} of {} listings",
        matches.len(),
        directory.len()
    );
    Ok(())
}
