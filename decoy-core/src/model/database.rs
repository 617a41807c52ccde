use std::collections::BTreeMap;

use crate::error::{InputError, Result};

/// Identifier → sequence (or header) table, ordered by identifier.
pub type SequenceMap = BTreeMap<String, String>;

/// A protein collection as read from a FASTA file.
///
/// # Invariants
/// - `sequences` and `headers` have identical key sets
/// - Every sequence is non-empty
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProteinDatabase {
	sequences: SequenceMap,
	headers: SequenceMap,
}

impl ProteinDatabase {
	/// Builds a database from its two tables.
	///
	/// # Errors
	/// Returns an error if the key sets differ or a sequence is empty.
	pub fn new(sequences: SequenceMap, headers: SequenceMap) -> Result<Self> {
		if !same_ids(&sequences, &headers) {
			return Err(InputError::IdMismatch { left: "sequences", right: "headers" }.into());
		}
		if let Some(id) = sequences.iter().find(|(_, seq)| seq.is_empty()).map(|(id, _)| id) {
			return Err(InputError::EmptySequence(id.clone()).into());
		}
		Ok(Self { sequences, headers })
	}

	pub fn sequences(&self) -> &SequenceMap {
		&self.sequences
	}

	pub fn headers(&self) -> &SequenceMap {
		&self.headers
	}

	pub fn len(&self) -> usize {
		self.sequences.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sequences.is_empty()
	}

	/// Looks up the sequence of `id`.
	///
	/// # Errors
	/// Returns an error if the identifier is unknown.
	pub fn sequence(&self, id: &str) -> Result<&str> {
		self.sequences
			.get(id)
			.map(String::as_str)
			.ok_or_else(|| InputError::UnknownId(id.to_owned()).into())
	}

	/// Total number of residues across all sequences.
	pub fn total_residues(&self) -> usize {
		self.sequences.values().map(|s| s.chars().count()).sum()
	}

	/// Builds decoy headers: `>` + `prefix` + target header without its `>`.
	///
	/// Example: `>sp|P1|X` with prefix `XXX_` → `>XXX_sp|P1|X`
	pub fn decoy_headers(&self, prefix: &str) -> SequenceMap {
		self.headers
			.iter()
			.map(|(id, header)| {
				let body = header.strip_prefix('>').unwrap_or(header);
				(id.clone(), format!(">{}{}", prefix, body))
			})
			.collect()
	}
}

/// True if both tables hold exactly the same identifiers.
pub fn same_ids(left: &SequenceMap, right: &SequenceMap) -> bool {
	left.len() == right.len() && left.keys().zip(right.keys()).all(|(a, b)| a == b)
}
