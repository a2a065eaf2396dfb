//! Ordering of food listings.

use core::fmt;

/// Direction in which food listings are ordered by `price`.
///
/// The query parameter is read leniently: only the exact value `desc` selects
/// descending order, anything else (including absence) falls back to
/// ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Resolve a `sort` query parameter.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// Direction as used in document store sort specifications.
    #[must_use]
    pub const fn direction(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
