//! Top-level module for decoy generation.
//!
//! Components, leaves first:
//! - Composition counting (`Composition`)
//! - Weighted range layout (`RangeTable`) and sampling (`WeightedSampler`)
//! - Context windows and their pooled counts (`ContextTable`)
//! - Context → symbol assignment (`AssignmentTable`) and its verifier
//! - The strategy family (`DecoyGenerator`)
//! - Tryptic digestion of targets and decoys (`Digest`)

/// Shared parameters: alphabet, cleavage symbols, sentinel.
pub mod config;

/// Target collection: identifier → sequence and identifier → header.
pub mod database;

/// Per-symbol occurrence counts.
pub mod composition;

/// Partition of `[1, total]` into one interval per observed symbol.
pub mod range_table;

/// Weighted random symbol selection by binary search over a range table.
pub mod sampler;

/// Fixed-width context windows over sentinel-padded sequences.
pub mod context;

/// Context → replacement symbol table.
///
/// Built once per run, immutable afterwards, persisted with postcard.
pub mod assignment;

/// Round-trip check of decoys against an assignment table.
pub mod verifier;

/// Strategy trait, strategy selection and the closed strategy enum.
pub mod generator;

pub mod random_decoy;

/// Context-substitution decoys.
pub mod de_bruijn_decoy;

pub mod reverse_decoy;

/// Cleavage into peptides, peptide length and mass counts.
pub mod digest;
