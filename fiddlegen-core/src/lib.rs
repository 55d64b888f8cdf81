//! fiddlegen core: generator of indicator wrapper code from catalog metadata.
//!
//! This crate walks a technical-analysis catalog once and emits Rust bindings:
//! - Catalog access through the `Catalog` trait, with a TOML dump implementation
//! - Eligibility classification (direct vs time-period functions)
//! - Per-function wrapper emission with per-kind fiddle-value normalization
//! - Registry and statistics emission derived from the same walk
//! - Atomic artifact sinks and a fingerprinted generation report

pub mod catalog;
pub mod classify;
pub mod config;
pub mod descriptor;
pub mod emit;
pub mod fingerprint;
pub mod generate;
pub mod names;
pub mod sink;
pub mod walk;

#[cfg(test)]
mod test_support;

pub use catalog::{Catalog, CatalogDump, CatalogError, MetadataAccessor};
pub use classify::ClassifiedFunction;
pub use config::{ConfigError, GeneratorConfig};
pub use descriptor::FunctionDescriptor;
pub use emit::stats::CatalogStats;
pub use emit::Artifact;
pub use fingerprint::CatalogFingerprint;
pub use generate::{generate, GenerateError, GenerationReport, Plan};
pub use walk::{walk_catalog, CatalogWalk};
