//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep the verdict record, outcome and report structs in one place.
//! - Avoid cyclic imports between services and command handlers.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: verdict record, artifact kinds, batch outcome structs.
//! - `errors.rs`: the enrichment error taxonomy.
//! - `constants.rs`: default file locations and service endpoint.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `VerdictRecord` is what lands in `responses/<hash>.json`, and `BatchSummary`
//! is the `--json` output of `run`. Changes here are visible to downstream tooling.

pub mod constants;
pub mod errors;
pub mod models;
