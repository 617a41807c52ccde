use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::database::SequenceMap;

/// Number of symbols in a context window.
pub const CONTEXT_WIDTH: usize = 3;

/// Fixed-width window of symbols taken from a sentinel-padded sequence.
///
/// The last symbol is the residue the window stands for; the symbols before
/// it are its left neighbours (or sentinels at the start of a sequence).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Context([char; CONTEXT_WIDTH]);

impl Context {
	pub fn new(symbols: [char; CONTEXT_WIDTH]) -> Self {
		Self(symbols)
	}

	pub fn symbols(&self) -> &[char; CONTEXT_WIDTH] {
		&self.0
	}

	/// The residue this context stands for.
	pub fn trailing(&self) -> char {
		self.0[CONTEXT_WIDTH - 1]
	}
}

impl fmt::Display for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for c in &self.0 {
			write!(f, "{}", c)?;
		}
		Ok(())
	}
}

/// Prepends `CONTEXT_WIDTH - 1` sentinels to `sequence`.
///
/// Example: `MKP` → `__MKP`
pub fn pad(sequence: &str, sentinel: char) -> String {
	std::iter::repeat_n(sentinel, CONTEXT_WIDTH - 1).chain(sequence.chars()).collect()
}

/// All windows of the padded sequence, in order.
///
/// There is exactly one window per residue of `sequence`, the window ending
/// on that residue.
pub fn contexts(sequence: &str, sentinel: char) -> Vec<Context> {
	let padded: Vec<char> = pad(sequence, sentinel).chars().collect();
	padded
		.windows(CONTEXT_WIDTH)
		.map(|w| Context(std::array::from_fn(|i| w[i])))
		.collect()
}

/// Occurrence counts of every context, pooled over a whole collection.
///
/// # Invariants
/// - Each count is strictly positive
/// - `total` equals the number of residues added
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ContextTable {
	counts: HashMap<Context, usize>,
}

impl ContextTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Counts the contexts of every sequence into one table.
	pub fn count(sequences: &SequenceMap, sentinel: char) -> Self {
		let mut table = Self::new();
		for sequence in sequences.values() {
			table.add_sequence(sequence, sentinel);
		}
		debug!("Counted {} distinct contexts over {} sequences", table.len(), sequences.len());
		table
	}

	/// Records every context of one sequence.
	pub fn add_sequence(&mut self, sequence: &str, sentinel: char) {
		for context in contexts(sequence, sentinel) {
			*self.counts.entry(context).or_insert(0) += 1;
		}
	}

	pub fn get(&self, context: &Context) -> usize {
		self.counts.get(context).copied().unwrap_or(0)
	}

	/// Distinct contexts, in no particular order.
	pub fn contexts(&self) -> impl Iterator<Item = &Context> {
		self.counts.keys()
	}

	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// `(context, count)` pairs sorted by context, for reporting.
	pub fn sorted(&self) -> Vec<(Context, usize)> {
		let mut entries: Vec<(Context, usize)> = self.counts.iter().map(|(c, n)| (*c, *n)).collect();
		entries.sort_unstable();
		entries
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ctx(s: &str) -> Context {
		let chars: Vec<char> = s.chars().collect();
		Context::new([chars[0], chars[1], chars[2]])
	}

	#[test]
	fn test_pad() {
		assert_eq!(pad("MKPEPTIDEK", '_'), "__MKPEPTIDEK");
		assert_eq!(pad("", '_'), "__");
	}

	#[test]
	fn test_contexts_one_per_residue() {
		let windows = contexts("MKPEPTIDEK", '_');
		assert_eq!(windows.len(), 10);
		assert_eq!(windows[0], ctx("__M"));
		assert_eq!(windows[1], ctx("_MK"));
		assert_eq!(windows[2], ctx("MKP"));
		assert_eq!(windows[9], ctx("DEK"));
		assert_eq!(windows[1].trailing(), 'K');
		assert_eq!(format!("{}", windows[2]), "MKP");
		assert!(contexts("", '_').is_empty());
		assert_eq!(contexts("A", '_'), vec![ctx("__A")]);
	}

	#[test]
	fn test_counts_are_pooled() {
		let sequences: SequenceMap =
			[("P1", "AAA"), ("P2", "AAAA")].iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		let table = ContextTable::count(&sequences, '_');
		assert_eq!(table.len(), 3);
		assert_eq!(table.get(&ctx("__A")), 2);
		assert_eq!(table.get(&ctx("_AA")), 2);
		assert_eq!(table.get(&ctx("AAA")), 3);
		assert_eq!(table.get(&ctx("KKK")), 0);
		assert_eq!(table.total(), 7);
		assert_eq!(table.sorted()[0], (ctx("AAA"), 3));
	}
}
