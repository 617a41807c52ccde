use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::DecoyConfig;
use super::context::{contexts, Context};
use super::range_table::RangeTable;
use crate::error::{InputError, InternalError, Result};

/// Maps every observed context to the single symbol that replaces it.
///
/// Built once per run and never modified afterwards.
///
/// ## Invariants
/// - A context ending on a cleavage symbol maps to that same symbol
/// - Any other context maps to a symbol outside the cleavage set
/// - Every context of the collection it was built from has an entry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AssignmentTable {
	map: HashMap<Context, char>,
}

impl AssignmentTable {
	/// Assigns a symbol to each distinct context.
	///
	/// Contexts ending on a cleavage symbol keep it. The others draw from the
	/// whole composition (cleavage symbols included) and re-draw until a
	/// non-cleavage symbol comes out, so the result follows the composition
	/// restricted to the eligible symbols.
	///
	/// # Errors
	/// - Input error if no non-cleavage symbol has a positive count
	/// - Internal error if `config.max_draws` draws in a row were rejected
	pub fn build<'a, R: Rng + ?Sized>(
		contexts: impl IntoIterator<Item = &'a Context>,
		ranges: &RangeTable,
		config: &DecoyConfig,
		rng: &mut R,
	) -> Result<Self> {
		let sampler = ranges.sampler();
		let is_cleavage = |c: char| config.is_cleavage(c);
		if !sampler.can_draw_excluding(is_cleavage) {
			return Err(InputError::NoEligibleSymbol.into());
		}

		let mut map = HashMap::new();
		let mut kept = 0;
		for context in contexts {
			let trailing = context.trailing();
			let symbol = if is_cleavage(trailing) {
				kept += 1;
				trailing
			} else {
				sampler
					.draw_excluding(rng, is_cleavage, config.max_draws)?
					.ok_or_else(|| InternalError::RejectionBound { context: context.to_string(), draws: config.max_draws })?
			};
			map.insert(*context, symbol);
		}

		info!("Assigned {} contexts ({} kept on a cleavage symbol)", map.len(), kept);
		Ok(Self { map })
	}

	/// Checks every entry against the cleavage rule of `config`.
	///
	/// A table built under another cleavage set can map an ordinary context
	/// onto a cleavage symbol, or a cleavage context onto something else.
	///
	/// # Errors
	/// Input error naming the first offending context, in context order.
	pub fn check(&self, config: &DecoyConfig) -> Result<()> {
		let conflict = self.sorted().into_iter().find(|(context, symbol)| {
			let trailing = context.trailing();
			if config.is_cleavage(trailing) { *symbol != trailing } else { config.is_cleavage(*symbol) }
		});
		match conflict {
			Some((context, symbol)) => Err(InputError::AssignmentConflict { context: context.to_string(), symbol }.into()),
			None => Ok(()),
		}
	}

	/// Symbol assigned to `context`.
	///
	/// # Errors
	/// Internal error if the context was never assigned.
	pub fn resolve(&self, context: &Context) -> Result<char> {
		self.map
			.get(context)
			.copied()
			.ok_or_else(|| InternalError::MissingContext(context.to_string()).into())
	}

	/// Rewrites `sequence` window by window.
	///
	/// The output has one symbol per residue of `sequence`.
	pub fn translate(&self, sequence: &str, sentinel: char) -> Result<String> {
		contexts(sequence, sentinel).iter().map(|c| self.resolve(c)).collect()
	}

	pub fn get(&self, context: &Context) -> Option<char> {
		self.map.get(context).copied()
	}

	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}

	/// `(context, symbol)` pairs sorted by context, for reporting.
	pub fn sorted(&self) -> Vec<(Context, char)> {
		let mut entries: Vec<(Context, char)> = self.map.iter().map(|(c, s)| (*c, *s)).collect();
		entries.sort_unstable();
		entries
	}

	/// Writes the table in postcard binary form.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(&path, bytes)?;
		debug!("Saved {} assignments to {}", self.len(), path.as_ref().display());
		Ok(())
	}

	/// Reads a table written by `save`.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let bytes = std::fs::read(path)?;
		Ok(postcard::from_bytes(&bytes)?)
	}
}
