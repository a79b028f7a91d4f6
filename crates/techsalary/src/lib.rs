//! Core library for the TechSalary compensation market service.
//!
//! The `market` module carries the domain: entities and their invariants, the
//! company tier policy, the synthetic record generator, and the query and
//! aggregation paths. `config`, `telemetry`, and `error` provide the runtime
//! scaffolding shared by every binary that embeds the library.

pub mod config;
pub mod error;
pub mod market;
pub mod telemetry;
