//! Collection of natives that already have hand-written implementations.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static QUALIFIED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][A-Z_0-9]*::[A-Za-z_0-9]+)").expect("valid regex"));

/// Qualified `NAMESPACE::FunctionName` identifiers to exclude from generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    names: BTreeSet<String>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every qualified native name mentioned in `source`.
    pub fn extend_from_source(&mut self, source: &str) {
        self.names.extend(
            QUALIFIED
                .captures_iter(source)
                .map(|caps| caps[1].to_string()),
        );
    }

    pub fn contains(&self, qualified: &str) -> bool {
        self.names.contains(qualified)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for OverrideSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
