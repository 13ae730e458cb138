//! # telecheck
//!
//! Extract links from pasted text, check them against a remote verification
//! service, and export the results as lists or as the original text with
//! only the valid links left in.
//!
//! The crate is organized into modules:
//! - `core`: Core types, constants, and error handling
//! - `config`: Configuration management
//! - `discovery`: Input reading, link extraction and deduplication
//! - `validation`: Service client, response normalization and check sessions
//! - `export`: Export rendering and text reconstruction
//! - `reporting`: Logging
//! - `ui`: User interface components

// Module declarations
pub mod config;
pub mod core;
pub mod discovery;
pub mod export;
pub mod reporting;
pub mod ui;
pub mod validation;

// Re-export core types for public API
pub use crate::core::{
    CheckMode, ExportMode, LinkResult, LinkStatus, Result, ResultFilter, ResultSet, StatsData,
    TeleCheckError, UrlMatch,
};

pub use config::Config;
pub use discovery::{Finder, UrlFinder, dedup, extract_matches, extract_urls};
pub use export::{ExportSource, reconstruct, render};
pub use validation::{CheckReport, CheckSession, RemoteVerifier, VerifyLinks};

pub use crate::core::constants;
