//! Catalogs of values a participant can pick from.
//!
//! Catalogs are static data. A room points at one of them and participants
//! submit a zero-based index into its values.

use serde::Serialize;
use thiserror::Error;

/// Errors raised when reading from a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("no value at index {index} in catalog '{catalog}'")]
    ValueNotFound { catalog: &'static str, index: usize },
}

/// A named, ordered set of selectable values.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Catalog {
    name: &'static str,
    values: &'static [&'static str],
}

/// The standard agile scale, used whenever a requested catalog is unknown.
pub static MODIFIED_FIBONACCI: Catalog = Catalog {
    name: "Modified Fibonacci",
    values: &["0", "1", "2", "3", "5", "8", "13", "20", "40", "100", "?", "☕"],
};

pub static FIBONACCI: Catalog = Catalog {
    name: "Fibonacci",
    values: &["0", "1", "2", "3", "5", "8", "13", "21", "34", "55", "89", "?", "☕"],
};

pub static T_SHIRT_SIZES: Catalog = Catalog {
    name: "T-Shirt Sizes",
    values: &["XS", "S", "M", "L", "XL", "?", "☕"],
};

pub static HOURS: Catalog = Catalog {
    name: "Hours",
    values: &["0", ".5", "1", "2", "4", "8", "12", "16", "20", "24", "?", "☕"],
};

// sorted by name
static ALL: [&Catalog; 4] = [&FIBONACCI, &HOURS, &MODIFIED_FIBONACCI, &T_SHIRT_SIZES];

impl Catalog {
    /// The catalog used when none, or an unknown one, is requested.
    pub fn default_catalog() -> &'static Catalog {
        &MODIFIED_FIBONACCI
    }

    /// Every built-in catalog, ordered by name.
    pub fn all() -> &'static [&'static Catalog] {
        &ALL
    }

    /// Looks a catalog up by its exact name.
    pub fn find(name: &str) -> Option<&'static Catalog> {
        ALL.iter().copied().find(|c| c.name == name)
    }

    /// Looks a catalog up by name, falling back to the default.
    pub fn resolve(name: &str) -> &'static Catalog {
        Self::find(name).unwrap_or_else(Self::default_catalog)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn values(&self) -> &'static [&'static str] {
        self.values
    }

    /// Returns the value label at `index`.
    pub fn value(&self, index: usize) -> Result<&'static str, CatalogError> {
        self.values
            .get(index)
            .copied()
            .ok_or(CatalogError::ValueNotFound {
                catalog: self.name,
                index,
            })
    }

    /// Whether `index` points at a value of this catalog.
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.values.len()
    }
}
