//! Result of storing a URL mapping.

/// Identifier and alias of a freshly stored URL mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedUrl {
    pub id: i64,
    pub alias: String,
}

impl SavedUrl {
    pub fn new(id: i64, alias: impl Into<String>) -> Self {
        Self {
            id,
            alias: alias.into(),
        }
    }
}
