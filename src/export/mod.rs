//! Export rendering
//!
//! This module turns a filtered result set into a text block, either as a
//! list of links or as the pasted text rebuilt around the valid ones.

pub mod formatter;
pub mod reconstruct;

// Re-export commonly used items
pub use formatter::{ExportSource, render};
pub use reconstruct::reconstruct;
