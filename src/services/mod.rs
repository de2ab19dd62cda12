//! Service layer containing the enrichment pipeline and its side-effect helpers.
//!
//! ## Service map
//! - `hash_source.rs`: hash extraction from the `.xlsx` hash list.
//! - `verdict_client.rs`: VirusTotal file lookups, normalized into `VerdictRecord`.
//! - `renderer.rs`: template loading and report rendering.
//! - `artifacts.rs`: raw/rendered artifact persistence.
//! - `pipeline.rs`: batch orchestration with per-hash failure isolation.
//! - `hashlist.rs`: hash list generation from a folder of samples.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod artifacts;
pub mod hash_source;
pub mod hashlist;
pub mod output;
pub mod pipeline;
pub mod renderer;
pub mod verdict_client;
