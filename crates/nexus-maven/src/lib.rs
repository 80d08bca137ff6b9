//! Maven side of nexus-upload: property evaluation through the build tool,
//! artifact set building, Nexus URL layout, authentication, and the batch
//! upload client.

pub mod artifacts;
pub mod auth;
pub mod client;
pub mod evaluate;
pub mod repository;
