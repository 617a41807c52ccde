use rand::Rng;

use super::range_table::RangeTable;
use crate::error::{InputError, InternalError, Result};

/// Weighted random symbol selection over a `RangeTable`.
///
/// The probability of drawing a symbol is proportional to its count.
/// A draw is a uniform integer in `[1, total]` resolved by binary search over
/// the table's own range list.
#[derive(Clone, Copy, Debug)]
pub struct WeightedSampler<'a> {
	table: &'a RangeTable,
}

impl<'a> WeightedSampler<'a> {
	pub fn new(table: &'a RangeTable) -> Self {
		Self { table }
	}

	/// Returns the symbol whose range contains `num`.
	///
	/// This performs an O(log n) binary search: inspect the middle range,
	/// return it if it holds `num`, otherwise continue in the half that can.
	///
	/// # Errors
	/// - Input error if `num` is outside `[1, total]`
	/// - Internal error if the search runs out of candidates, which means the
	///   ranges are not in increasing order
	pub fn resolve(&self, num: usize) -> Result<char> {
		let total = self.table.total();
		if num == 0 || num > total {
			return Err(InputError::SampleOutOfRange { num, total }.into());
		}

		let ranges = self.table.ranges();
		let (mut low, mut high) = (0, ranges.len());
		while low < high {
			let mid = low + (high - low) / 2;
			let range = &ranges[mid];
			if range.contains(num) {
				return Ok(range.symbol);
			} else if num < range.start {
				high = mid;
			} else {
				low = mid + 1;
			}
		}

		Err(InternalError::SearchExhausted(num).into())
	}

	/// Draws one symbol.
	pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<char> {
		let num = rng.random_range(1..=self.table.total());
		self.resolve(num)
	}

	/// True if at least one symbol with a positive count is not excluded.
	pub fn can_draw_excluding(&self, excluded: impl Fn(char) -> bool) -> bool {
		self.table.symbols().any(|c| !excluded(c))
	}

	/// Draws from the full distribution and re-draws while the result is
	/// excluded.
	///
	/// Returns `Ok(None)` once `max_draws` draws were all rejected.
	/// Callers check `can_draw_excluding` first.
	pub fn draw_excluding<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		excluded: impl Fn(char) -> bool,
		max_draws: usize,
	) -> Result<Option<char>> {
		for _ in 0..max_draws {
			let symbol = self.draw(rng)?;
			if !excluded(symbol) {
				return Ok(Some(symbol));
			}
		}
		Ok(None)
	}
}
