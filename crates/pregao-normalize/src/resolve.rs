//! Column label resolution.

use std::collections::HashSet;

use pregao_types::DataShapeError;

use crate::{ColumnLabel, RawColumn};

/// Canonical OHLCV field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    Close,
    /// Traded volume.
    Volume,
}

impl Field {
    /// Returns the canonical column name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
            Self::Volume => "Volume",
        }
    }

    /// Returns all canonical fields in table order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Open, Self::High, Self::Low, Self::Close, Self::Volume]
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How raw column labels were mapped to field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnResolution {
    /// Single-level labels used as-is.
    Flat,
    /// Two-level labels; the outer level holds the field names.
    Outer,
    /// Two-level labels; the inner level holds the field names.
    Inner,
    /// Two-level labels joined as `outer_inner`; canonical names may be absent.
    Joined,
}

impl ColumnResolution {
    /// Returns true when the canonical field names were not found on either level.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Joined)
    }

    /// Returns the mode as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Outer => "outer",
            Self::Inner => "inner",
            Self::Joined => "joined",
        }
    }
}

impl std::fmt::Display for ColumnResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves every column label to a single name.
///
/// Returns the mode used and one name per column, in declared order. Names
/// may repeat; duplicates are collapsed by the normalizer.
pub(crate) fn resolve_labels(
    columns: &[RawColumn],
) -> Result<(ColumnResolution, Vec<String>), DataShapeError> {
    let nested = columns.iter().filter(|c| c.label.is_nested()).count();

    if nested == 0 {
        let names = columns
            .iter()
            .filter_map(|c| match &c.label {
                ColumnLabel::Flat(name) => Some(name.clone()),
                ColumnLabel::Nested(..) => None,
            })
            .collect();
        return Ok((ColumnResolution::Flat, names));
    }
    if nested != columns.len() {
        return Err(DataShapeError::MixedLevels);
    }

    let pairs: Vec<(&str, &str)> = columns
        .iter()
        .filter_map(|c| match &c.label {
            ColumnLabel::Nested(outer, inner) => Some((outer.as_str(), inner.as_str())),
            ColumnLabel::Flat(_) => None,
        })
        .collect();

    let outer: HashSet<&str> = pairs.iter().map(|(o, _)| *o).collect();
    let inner: HashSet<&str> = pairs.iter().map(|(_, i)| *i).collect();

    let resolved = if holds_all_fields(&outer) {
        (
            ColumnResolution::Outer,
            pairs.iter().map(|(o, _)| (*o).to_string()).collect(),
        )
    } else if holds_all_fields(&inner) {
        (
            ColumnResolution::Inner,
            pairs.iter().map(|(_, i)| (*i).to_string()).collect(),
        )
    } else {
        (
            ColumnResolution::Joined,
            pairs.iter().map(|(o, i)| joined_name(o, i)).collect(),
        )
    };
    Ok(resolved)
}

fn holds_all_fields(level: &HashSet<&str>) -> bool {
    Field::all().iter().all(|f| level.contains(f.as_str()))
}

/// Joins both levels as `outer_inner`, skipping empty parts.
fn joined_name(outer: &str, inner: &str) -> String {
    [outer, inner]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
        .trim_matches('_')
        .to_string()
}
