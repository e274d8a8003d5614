// Pure Functions Module
// Storage-agnostic primitives used by the tree engine. Nothing in here knows
// about nodes, parents or ordering; it only moves slots around.

pub mod slots;

pub use slots::{shift_left_delete, shift_right_insert};
