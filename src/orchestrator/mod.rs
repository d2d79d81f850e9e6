//! Lookup orchestration: concurrent fan-out, risk scoring, summary.
//!
//! This module fans out probes to every applicable provider concurrently,
//! degrades per-provider failures and timeouts in place, reduces the
//! settled sequence to a risk score, and derives the type-specific
//! summary.

pub mod fanout;
pub mod scoring;
pub mod summary;
