//! Shared utilities for nexus-upload.
//!
//! This crate provides cross-cutting concerns used by all other crates:
//! the error taxonomy, path helpers, process spawning, and terminal
//! status output.

pub mod errors;
pub mod fs;
pub mod process;
pub mod progress;
