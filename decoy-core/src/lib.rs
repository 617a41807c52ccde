//! Target/decoy protein database generation.
//!
//! This crate produces synthetic "decoy" proteins from real ("target") ones,
//! for false-discovery-rate estimation in database search:
//! - Composition counting and weighted range sampling
//! - Context-substitution ("de Bruijn") decoys preserving cleavage sites
//! - Random-substitution and reversed decoys
//! - Round-trip verification of context-substitution decoys
//! - FASTA, concatenated database and CSV report I/O

/// Decoy strategies and the tables they are built from.
///
/// Exposes the strategy family (`DecoyGenerator`) together with the
/// composition, range, context and assignment tables for reporting.
pub mod model;

/// FASTA reading and writing, CSV reports and path helpers.
pub mod io;

/// Error taxonomy (input contract violations vs. internal inconsistencies).
pub mod error;

pub use error::{DecoyError, InputError, InternalError, Result};
