//! Core types for categories.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Alias for the type used for category IDs
pub type CategoryId = i64;

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// Leading and trailing whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// This function will return an error if `name` is empty after trimming.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because
    /// if the non-empty invariant is violated it will cause incorrect
    /// behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        CategoryName::new(name)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A group that expenses are tallied under, e.g. 'Food & Drinks', 'Study'.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,

    /// The name of the category.
    pub name: CategoryName,

    /// The spending limit in whole currency units. Zero means no limit is set.
    pub spending_limit: i64,
}

impl Category {
    /// The spending limit, or `None` when no limit is set.
    pub fn limit(&self) -> Option<i64> {
        if self.spending_limit > 0 {
            Some(self.spending_limit)
        } else {
            None
        }
    }
}

/// The data for the new category form.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    /// The name of the category to create.
    pub name: String,
}

/// The data for the limit forms on the budget page.
#[derive(Debug, Serialize, Deserialize)]
pub struct LimitFormData {
    /// The new spending limit. Zero clears the limit.
    pub limit: i64,
}


#[cfg(test)]
mod category_limit_tests {
    use crate::category::{Category, CategoryName};

    #[test]
    fn zero_limit_means_no_limit() {
        let category = Category {
            id: 1,
            name: CategoryName::new_unchecked("Shopping"),
            spending_limit: 0,
        };

        assert_eq!(category.limit(), None);
    }

    #[test]
    fn positive_limit_is_some() {
        let category = Category {
            id: 1,
            name: CategoryName::new_unchecked("Food & Drinks"),
            spending_limit: 120_000,
        };

        assert_eq!(category.limit(), Some(120_000));
    }
}
