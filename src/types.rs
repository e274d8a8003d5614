// Validated Types
// Strongly-typed configuration values. An order below the minimum cannot be
// constructed, so the engine never has to re-check it.

use crate::error::{Result, TreeError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Smallest order for which splitting and merging are well defined.
pub const MIN_ORDER: usize = 3;

/// Order used when none is configured.
pub const DEFAULT_ORDER: usize = 5;

/// Maximum number of children per node, guaranteed to be at least [`MIN_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ValidatedOrder {
    inner: usize,
}

impl ValidatedOrder {
    /// Create a new validated order
    ///
    /// # Invariants
    /// - `order >= MIN_ORDER`
    pub fn new(order: usize) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(TreeError::InvalidConfig {
                order,
                min: MIN_ORDER,
            });
        }
        Ok(Self { inner: order })
    }

    pub fn get(&self) -> usize {
        self.inner
    }

    pub fn is_even(&self) -> bool {
        self.inner % 2 == 0
    }
}

impl Default for ValidatedOrder {
    fn default() -> Self {
        Self {
            inner: DEFAULT_ORDER,
        }
    }
}

impl TryFrom<usize> for ValidatedOrder {
    type Error = TreeError;

    fn try_from(order: usize) -> Result<Self> {
        Self::new(order)
    }
}

impl fmt::Display for ValidatedOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Direction in which stored elements are kept sorted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending under `Ord`
    #[default]
    Natural,
    /// Descending under `Ord`
    Inverse,
}

impl SortDirection {
    /// +1 for natural order, -1 for inverse order.
    pub fn multiplier(&self) -> i32 {
        match self {
            SortDirection::Natural => 1,
            SortDirection::Inverse => -1,
        }
    }

    /// Apply the direction to a raw comparison result. This is the only place
    /// the direction influences ordering.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Natural => ordering,
            SortDirection::Inverse => ordering.reverse(),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            SortDirection::Natural => "natural sorting order",
            SortDirection::Inverse => "inverse sorting order",
        }
    }
}

/// Which half receives the extra key when an even-order node splits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvenOrderBias {
    /// The left node keeps the larger half
    Left,
    /// The right sibling receives the larger half
    #[default]
    Right,
}

impl EvenOrderBias {
    pub fn describe(&self) -> &'static str {
        match self {
            EvenOrderBias::Left => "left biased",
            EvenOrderBias::Right => "right biased",
        }
    }
}
