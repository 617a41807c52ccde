use log::debug;
use serde::{Deserialize, Serialize};

use super::composition::Composition;
use super::sampler::WeightedSampler;
use crate::error::{InputError, InternalError, Result};

/// Half-open interval `[start, end)` owned by one symbol.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolRange {
	pub symbol: char,
	pub start: usize,
	pub end: usize,
}

impl SymbolRange {
	pub fn contains(&self, num: usize) -> bool {
		self.start <= num && num < self.end
	}

	pub fn width(&self) -> usize {
		self.end - self.start
	}
}

/// Partition of `[1, total + 1)` proportional to a composition.
///
/// Example: `{A: 30, B: 40, C: 10, D: 20}` gives
/// `A: [1, 31)`, `B: [31, 71)`, `C: [71, 81)`, `D: [81, 101)`.
///
/// The ranges are stored in the order they were laid out, which is also the
/// order the sampler searches. Both come from the same pass, so the interval
/// bounds are strictly increasing along the list.
///
/// ## Invariants
/// - Only symbols with a positive count own a range
/// - Ranges are contiguous, start at 1 and end at `total + 1`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RangeTable {
	ranges: Vec<SymbolRange>,
	total: usize,
}

impl RangeTable {
	/// Lays out one range per observed symbol, in symbol order.
	///
	/// Zero-count symbols are dropped first.
	///
	/// # Errors
	/// Returns an error if no symbol has a positive count.
	pub fn new(composition: &Composition) -> Result<Self> {
		let observed = composition.zero_removed();
		if observed.is_empty() {
			return Err(InputError::EmptyComposition.into());
		}

		let mut ranges = Vec::with_capacity(observed.len());
		let mut offset = 1;
		for (symbol, count) in observed.iter() {
			ranges.push(SymbolRange { symbol, start: offset, end: offset + count });
			offset += count;
		}

		let total = observed.total();
		if offset != total + 1 {
			return Err(InternalError::RangeTotal { end: offset, expected: total + 1 }.into());
		}

		debug!("Range table over {} symbols, total {}", ranges.len(), total);
		Ok(Self { ranges, total })
	}

	/// Ranges in layout (and search) order.
	pub fn ranges(&self) -> &[SymbolRange] {
		&self.ranges
	}

	/// Symbols in layout (and search) order.
	pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
		self.ranges.iter().map(|r| r.symbol)
	}

	pub fn get(&self, symbol: char) -> Option<&SymbolRange> {
		self.ranges.iter().find(|r| r.symbol == symbol)
	}

	/// Sum of all counts; samples are drawn from `[1, total]`.
	pub fn total(&self) -> usize {
		self.total
	}

	pub fn len(&self) -> usize {
		self.ranges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ranges.is_empty()
	}

	pub fn sampler(&self) -> WeightedSampler<'_> {
		WeightedSampler::new(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::DecoyError;
	use rand::rngs::StdRng;
	use rand::{Rng, SeedableRng};

	fn abcd() -> Composition {
		Composition::from_counts([('A', 30), ('B', 40), ('C', 10), ('D', 20)])
	}

	#[test]
	fn test_reference_layout() {
		let table = RangeTable::new(&abcd()).unwrap();
		assert_eq!(table.total(), 100);
		assert_eq!(
			table.ranges(),
			&[
				SymbolRange { symbol: 'A', start: 1, end: 31 },
				SymbolRange { symbol: 'B', start: 31, end: 71 },
				SymbolRange { symbol: 'C', start: 71, end: 81 },
				SymbolRange { symbol: 'D', start: 81, end: 101 },
			]
		);
	}

	#[test]
	fn test_zero_counts_get_no_range() {
		let table = RangeTable::new(&Composition::from_counts([('A', 2), ('B', 0), ('C', 1)])).unwrap();
		assert_eq!(table.symbols().collect::<String>(), "AC");
		assert!(table.get('B').is_none());
		assert_eq!(table.get('C'), Some(&SymbolRange { symbol: 'C', start: 3, end: 4 }));
	}

	#[test]
	fn test_empty_composition() {
		let res = RangeTable::new(&Composition::from_counts([('A', 0), ('B', 0)]));
		assert!(matches!(res, Err(DecoyError::Input(InputError::EmptyComposition))));
		let res = RangeTable::new(&Composition::from_counts([]));
		assert!(matches!(res, Err(DecoyError::Input(InputError::EmptyComposition))));
	}

	#[test]
	fn test_random_compositions_partition_total() {
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..200 {
			let counts: Vec<(char, usize)> = ('A'..='Z').map(|c| (c, rng.random_range(0..50))).collect();
			let composition = Composition::from_counts(counts);
			let Ok(table) = RangeTable::new(&composition) else {
				assert_eq!(composition.total(), 0);
				continue;
			};

			assert_eq!(table.len(), composition.zero_removed().len());
			assert_eq!(table.ranges()[0].start, 1);
			assert_eq!(table.ranges().last().unwrap().end, composition.total() + 1);
			for pair in table.ranges().windows(2) {
				assert_eq!(pair[0].end, pair[1].start);
				assert!(pair[0].symbol < pair[1].symbol);
			}
			let widths: usize = table.ranges().iter().map(SymbolRange::width).sum();
			assert_eq!(widths, composition.total());
			for r in table.ranges() {
				assert_eq!(Some(r.width()), composition.get(r.symbol));
			}
		}
	}
}
