use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlowError;
use crate::schema::category;

/// Measurement kind selected by the user.
///
/// Each variant maps to exactly one numeric column of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Refugees,
    RefugeesAssisted,
    RefugeeLike,
    RefugeeLikeAssisted,
}

impl Category {
    /// Selector order, as offered to the user.
    pub const ALL: [Category; 4] = [
        Category::Refugees,
        Category::RefugeesAssisted,
        Category::RefugeeLike,
        Category::RefugeeLikeAssisted,
    ];

    /// Name of the dataset column holding this category's values.
    pub fn column(self) -> &'static str {
        match self {
            Category::Refugees => category::REFUGEES,
            Category::RefugeesAssisted => category::REFUGEES_ASSISTED,
            Category::RefugeeLike => category::REFUGEE_LIKE,
            Category::RefugeeLikeAssisted => category::REFUGEE_LIKE_ASSISTED,
        }
    }

    /// Short snake_case key.
    pub fn key(self) -> &'static str {
        match self {
            Category::Refugees => "refugees",
            Category::RefugeesAssisted => "refugees_assisted",
            Category::RefugeeLike => "refugee_like",
            Category::RefugeeLikeAssisted => "refugee_like_assisted",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Category {
    type Err = FlowError;

    /// Accepts either the column name or the short key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.column() == s || c.key() == s)
            .ok_or_else(|| FlowError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_column_names_and_keys() {
        assert_eq!("Refugees*".parse::<Category>().unwrap(), Category::Refugees);
        assert_eq!(
            "refugee_like_assisted".parse::<Category>().unwrap(),
            Category::RefugeeLikeAssisted
        );
        assert_eq!(
            " Refugees assisted by UNHCR ".parse::<Category>().unwrap(),
            Category::RefugeesAssisted
        );
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "Migrants".parse::<Category>().unwrap_err();
        assert!(matches!(err, FlowError::UnknownCategory(name) if name == "Migrants"));
    }

    #[test]
    fn columns_follow_schema_order() {
        let columns: Vec<&str> = Category::ALL.iter().map(|c| c.column()).collect();
        assert_eq!(columns, category::ALL);
    }
}
