//! Link verification
//!
//! This module talks to the remote verification service, normalizes its
//! responses into verdicts and keeps the result set of the latest check.

pub mod client;
pub mod normalizer;
pub mod session;

// Re-export commonly used items
pub use client::{RemoteVerifier, VerifyLinks, check_each};
pub use normalizer::{ServiceResponse, normalize_bulk, normalize_single, transport_failure};
pub use session::{CheckReport, CheckSession};
