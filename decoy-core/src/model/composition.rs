use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::database::SequenceMap;
use crate::error::{InputError, Result};

/// Per-symbol occurrence counts over a sequence collection.
///
/// The table is dense over the alphabet it was counted with: every symbol is
/// present, unobserved ones with a count of 0. Iteration follows symbol order.
///
/// ## Invariants
/// - Keys are exactly the alphabet (or a subset of it after `zero_removed`)
/// - `total` equals the sum of all counts
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Composition {
	counts: BTreeMap<char, usize>,
}

/// Rounded per-symbol fractions of a composition.
#[derive(Clone, Debug, PartialEq)]
pub struct Proportions {
	pub values: BTreeMap<char, f64>,
	/// Sum of the rounded values, close to (but not always exactly) 1.0.
	pub total: f64,
}

impl Composition {
	/// Zero-initialized table over `alphabet`.
	pub fn empty(alphabet: &[char]) -> Self {
		Self { counts: alphabet.iter().map(|c| (*c, 0)).collect() }
	}

	/// Builds a table from explicit counts.
	pub fn from_counts(counts: impl IntoIterator<Item = (char, usize)>) -> Self {
		Self { counts: counts.into_iter().collect() }
	}

	/// Counts every residue of every sequence.
	///
	/// # Errors
	/// Returns an error on a residue outside `alphabet`.
	pub fn count(sequences: &SequenceMap, alphabet: &[char]) -> Result<Self> {
		let mut composition = Self::empty(alphabet);
		for (id, sequence) in sequences {
			for (position, symbol) in sequence.chars().enumerate() {
				match composition.counts.get_mut(&symbol) {
					Some(count) => *count += 1,
					None => {
						return Err(InputError::UnknownSymbol { id: id.clone(), symbol, position }.into());
					}
				}
			}
		}
		Ok(composition)
	}

	/// Same table without the symbols that were never observed.
	pub fn zero_removed(&self) -> Self {
		Self {
			counts: self.counts.iter().filter(|(_, count)| **count > 0).map(|(c, n)| (*c, *n)).collect(),
		}
	}

	pub fn get(&self, symbol: char) -> Option<usize> {
		self.counts.get(&symbol).copied()
	}

	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates `(symbol, count)` in symbol order.
	pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
		self.counts.iter().map(|(c, n)| (*c, *n))
	}

	/// Fraction of the total held by each symbol, rounded half-up to
	/// `decimals` places.
	///
	/// An empty collection yields all-zero proportions.
	///
	/// # Errors
	/// Returns an error if `decimals` is 0.
	pub fn proportions(&self, decimals: u32) -> Result<Proportions> {
		if decimals == 0 {
			return Err(InputError::Config("the number of decimal places must be greater than 0".to_owned()).into());
		}

		let total = self.total();
		let scale = 10f64.powi(decimals as i32);
		let mut values = BTreeMap::new();
		let mut sum = 0.0;
		for (symbol, count) in self.iter() {
			let fraction = if total == 0 { 0.0 } else { count as f64 / total as f64 };
			let rounded = (fraction * scale).round() / scale;
			values.insert(symbol, rounded);
			sum += rounded;
		}
		Ok(Proportions { values, total: sum })
	}
}
