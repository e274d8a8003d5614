// mwaytree - An order-M multiway search tree
// Root library module

pub mod btree;
pub mod builders;
pub mod error;
pub mod observability;
pub mod pure;
pub mod types;
pub mod validation;

// Re-export the tree engine
pub use btree::{BTree, Location, NodeId, NodeSnapshot, TreeStats};

// Re-export builders
pub use builders::{TreeConfig, TreeConfigBuilder};

// Re-export errors
pub use error::{Result, TreeError};

// Re-export validated types
pub use types::{EvenOrderBias, SortDirection, ValidatedOrder, DEFAULT_ORDER, MIN_ORDER};

// Re-export observability
pub use observability::{init_logging, init_logging_with_level, log_operation, TreeOperation};

// Re-export invariant checking
pub use validation::{validate_tree, ValidationError};
