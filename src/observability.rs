// Observability
// Structured logging for the tree engine. The library only emits `tracing`
// events; applications opt into output by installing a subscriber.

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter: warnings and errors from this crate, errors elsewhere
pub const DEFAULT_FILTER: &str = "mwaytree=warn,error";
/// Verbose filter: debug output from this crate, info elsewhere
pub const VERBOSE_FILTER: &str = "mwaytree=debug,info";
/// Quiet filter: errors only
pub const QUIET_FILTER: &str = "error";

/// Initialize the logging and tracing infrastructure
/// This should be called once at application startup
pub fn init_logging() -> Result<()> {
    init_logging_with_level(false, false)
}

/// Initialize logging with configurable verbosity
pub fn init_logging_with_level(verbose: bool, quiet: bool) -> Result<()> {
    // Quiet always wins, even over RUST_LOG
    let env_filter = if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        let fallback = if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(!quiet)
        .with_line_number(!quiet)
        .with_file(!quiet);

    match tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
    {
        Ok(()) => {
            if !quiet {
                info!("mwaytree observability initialized");
            }
            Ok(())
        }
        // Already initialized, which is fine in test environments
        Err(_) => Ok(()),
    }
}

/// Public tree mutations, for structured logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum TreeOperation {
    Add { size: usize },
    Remove { size: usize, found: bool },
    Clear { removed: usize },
}

impl fmt::Display for TreeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeOperation::Add { .. } => f.write_str("add"),
            TreeOperation::Remove { .. } => f.write_str("remove"),
            TreeOperation::Clear { .. } => f.write_str("clear"),
        }
    }
}

/// Log the outcome of a tree operation. Rejected inputs are reported at debug
/// level: they are caller errors, not faults of the tree.
pub fn log_operation(op: &TreeOperation, result: &crate::error::Result<()>) {
    match result {
        Ok(()) => trace!(operation = %op, details = ?op, "tree operation completed"),
        Err(e) => debug!(operation = %op, details = ?op, error = %e, "tree operation rejected"),
    }
}
