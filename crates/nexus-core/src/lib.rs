//! Core data types for nexus-upload.
//!
//! This crate defines what gets published and from where: artifact and
//! module descriptions, project layout detection, the MTA descriptor
//! reader, configuration loading, and the pipeline environment store.
//!
//! This crate is intentionally free of network I/O and subprocesses.

pub mod artifact;
pub mod config;
pub mod descriptor;
pub mod module;
pub mod pipeline_env;
pub mod properties;
pub mod structure;
