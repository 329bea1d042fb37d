//! Shopping list item model
//!
//! This module defines the value stored for every list entry, the partial
//! update applied by PUT requests and the count validation rules.

use thiserror::Error;

/// Largest integer exactly representable by an IEEE-754 double (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// A single shopping list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub count: i64,
}

impl ShoppingListItem {
    /// Create a new item
    pub fn new(name: impl Into<String>, count: i64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Fields supplied by a partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub count: Option<i64>,
}

impl ItemPatch {
    /// Check the supplied fields before they touch the store
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.count {
            Some(count) => validate_count(count),
            None => Ok(()),
        }
    }

    /// Merge the patch over a copy of `item`
    pub fn apply(&self, item: &ShoppingListItem) -> ShoppingListItem {
        let mut merged = item.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(count) = self.count {
            merged.count = count;
        }
        merged
    }
}

/// A count is valid when it lies in `(0, MAX_SAFE_INTEGER]`.
pub fn validate_count(count: i64) -> Result<(), ValidationError> {
    if count <= 0 || count > MAX_SAFE_INTEGER {
        return Err(ValidationError::CountOutOfRange);
    }
    Ok(())
}

/// Input rejected before any state changes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request body is not a ShoppingListItem")]
    NotAnItem,

    #[error("Request body is not a partial ShoppingListItem")]
    NotAPartialItem,

    #[error("Count must be a valid positive number")]
    CountOutOfRange,
}
