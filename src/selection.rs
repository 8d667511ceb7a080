use serde::Serialize;

use crate::category::Category;

/// The (origin, year, category) triple chosen by the user.
///
/// Built fresh for every interaction and never mutated. Use
/// [`Dataset::select`](crate::Dataset::select) to get one validated against
/// the loaded data; `Selection::new` accepts any triple and simply matches
/// nothing when the values are unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Selection {
    origin: String,
    year: i64,
    category: Category,
}

impl Selection {
    pub fn new(origin: impl Into<String>, year: i64, category: Category) -> Self {
        Self {
            origin: origin.into(),
            year,
            category,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn category(&self) -> Category {
        self.category
    }
}
