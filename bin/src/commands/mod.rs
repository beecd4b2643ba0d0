//! CLI command implementations.

pub(crate) mod analyze;
pub(crate) mod info;
pub(crate) mod search;
