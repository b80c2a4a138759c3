#![forbid(unsafe_code)]
//! slngraph-core library.
//!
//! A pure in-memory dependency graph over already-parsed .NET project
//! records. Callers build a [`graph::DependencyGraph`] once per solution load
//! and query it for cycles, a dependency-first build order, and batches of
//! projects that can be built concurrently.
//!
//! # Conventions
//!
//! - **Errors**: [`error::GraphError`] for graph operations, `anyhow::Result`
//!   for loading config files.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod model;

pub use error::{ErrorCode, GraphError};
pub use graph::DependencyGraph;
pub use model::{PackageReference, ProjectRecord, ProjectType};
