//! Compile-once regex storage for the fixed patterns used by the classifiers.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Compile `pattern` on first use and keep it in `cell`. Returns `None` only if the
/// pattern itself is invalid, which the unit tests of each caller rule out.
pub(crate) fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

/// Compile every pattern of a rule table once, keyed by its source text.
pub(crate) fn compile_table<I>(patterns: I) -> HashMap<&'static str, Regex>
where
    I: IntoIterator<Item = &'static str>,
{
    patterns
        .into_iter()
        .filter_map(|p| Regex::new(p).ok().map(|re| (p, re)))
        .collect()
}
