//! Link discovery in pasted text
//!
//! This module handles reading the pasted input, finding link candidates
//! in it and removing repeated links before verification.

pub mod dedup;
pub mod finder;
pub mod input;

// Re-export commonly used items
pub use dedup::{Deduplicated, dedup};
pub use finder::{Finder, UrlFinder, extract_matches, extract_urls};
pub use input::read_input;
