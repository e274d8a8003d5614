// Builder Patterns
// Fluent construction of tree configurations with sensible defaults, plus
// loading the same configuration from TOML.

use crate::btree::BTree;
use crate::error::{Result, TreeError};
use crate::types::{EvenOrderBias, SortDirection, ValidatedOrder, DEFAULT_ORDER};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Tree configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeConfig {
    pub order: ValidatedOrder,
    pub sort_direction: SortDirection,
    pub even_order_bias: EvenOrderBias,
}

impl TreeConfig {
    /// Maximum keys a node may hold (`order - 1`).
    pub fn max_keys(&self) -> usize {
        self.order.get() - 1
    }

    /// Minimum keys a non-root node may hold (`ceil(order / 2) - 1`).
    pub fn min_keys(&self) -> usize {
        self.order.get().div_ceil(2) - 1
    }

    /// Position of the promoted key inside the `order`-long overflow sequence.
    /// The bias only matters for even orders.
    pub fn split_middle(&self) -> usize {
        let middle = self.order.get() / 2;
        if self.is_biased() && self.even_order_bias == EvenOrderBias::Right {
            middle - 1
        } else {
            middle
        }
    }

    /// Whether the bias setting has any effect for this order.
    pub fn is_biased(&self) -> bool {
        self.order.is_even()
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    ///
    /// ```toml
    /// order = 4
    /// sort_direction = "inverse"
    /// even_order_bias = "left"
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: TreeConfigFile = toml::from_str(source).map_err(|e| TreeError::ConfigParse {
            message: e.to_string(),
        })?;

        TreeConfigBuilder::new()
            .order(file.order)
            .sort_direction(file.sort_direction)
            .even_order_bias(file.even_order_bias)
            .build()
    }
}

/// On-disk shape of a configuration. The order is validated after parsing so
/// that an out-of-range order is reported as `InvalidConfig`.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TreeConfigFile {
    order: usize,
    sort_direction: SortDirection,
    even_order_bias: EvenOrderBias,
}

impl Default for TreeConfigFile {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            sort_direction: SortDirection::default(),
            even_order_bias: EvenOrderBias::default(),
        }
    }
}

/// Fluent builder for tree configurations
pub struct TreeConfigBuilder {
    order: usize,
    sort_direction: SortDirection,
    even_order_bias: EvenOrderBias,
}

impl TreeConfigBuilder {
    /// Create a new builder with order 5, natural sorting and right bias
    pub fn new() -> Self {
        Self {
            order: DEFAULT_ORDER,
            sort_direction: SortDirection::Natural,
            even_order_bias: EvenOrderBias::Right,
        }
    }

    /// Set the order (maximum children per node). Validated on `build`.
    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = direction;
        self
    }

    /// Shorthand for `sort_direction(SortDirection::Inverse)`
    pub fn inverse(self) -> Self {
        self.sort_direction(SortDirection::Inverse)
    }

    pub fn even_order_bias(mut self, bias: EvenOrderBias) -> Self {
        self.even_order_bias = bias;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<TreeConfig> {
        Ok(TreeConfig {
            order: ValidatedOrder::new(self.order)?,
            sort_direction: self.sort_direction,
            even_order_bias: self.even_order_bias,
        })
    }

    /// Build the configuration and an empty tree using it
    pub fn build_tree<T: Ord + Debug>(self) -> Result<BTree<T>> {
        Ok(BTree::with_config(self.build()?))
    }
}

impl Default for TreeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
