use std::fmt;
use std::str::FromStr;

use log::info;
use rand::Rng;

use super::config::DecoyConfig;
use super::database::{ProteinDatabase, SequenceMap};
use super::de_bruijn_decoy::DeBruijnDecoy;
use super::random_decoy::RandomDecoy;
use super::reverse_decoy::ReverseDecoy;
use crate::error::{InputError, Result};

/// Common capability of every decoy strategy.
///
/// # Responsibilities
/// - Produce the decoy of one target identifier
/// - Produce the decoys of the whole target collection
pub trait DecoyStrategy {
	/// The collection decoys are generated from.
	fn targets(&self) -> &ProteinDatabase;

	/// Generates the decoy of one target.
	///
	/// # Errors
	/// Returns an input error if `id` is not a target identifier.
	fn generate_decoy<R: Rng + ?Sized>(&self, id: &str, rng: &mut R) -> Result<String>;

	/// Generates a decoy for every target.
	///
	/// Any failure aborts the whole collection: a partial result is never
	/// returned.
	fn generate_decoy_dict<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SequenceMap> {
		let targets = self.targets().sequences();
		let mut decoys = SequenceMap::new();
		for id in targets.keys() {
			decoys.insert(id.clone(), self.generate_decoy(id, rng)?);
		}
		info!("Generated {} decoys", decoys.len());
		Ok(decoys)
	}
}

/// Selects one of the available strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
	Random,
	DeBruijn,
	Reverse,
}

impl StrategyKind {
	/// Short name used in file names and on the command line.
	pub fn name(&self) -> &'static str {
		match self {
			StrategyKind::Random => "random",
			StrategyKind::DeBruijn => "debruijn",
			StrategyKind::Reverse => "reverse",
		}
	}
}

impl fmt::Display for StrategyKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

impl FromStr for StrategyKind {
	type Err = InputError;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"random" => Ok(StrategyKind::Random),
			"debruijn" | "de-bruijn" | "de_bruijn" => Ok(StrategyKind::DeBruijn),
			"reverse" => Ok(StrategyKind::Reverse),
			other => Err(InputError::Config(format!(
				"unknown strategy '{}', expected one of: random, debruijn, reverse",
				other
			))),
		}
	}
}

/// The closed set of decoy strategies.
#[derive(Debug)]
pub enum DecoyGenerator<'a> {
	Random(RandomDecoy<'a>),
	DeBruijn(DeBruijnDecoy<'a>),
	Reverse(ReverseDecoy<'a>),
}

impl<'a> DecoyGenerator<'a> {
	/// Prepares the strategy selected by `kind`.
	///
	/// Tables the strategy depends on are built here, so a later
	/// `generate_decoy_dict` only fails on broken invariants.
	pub fn new<R: Rng + ?Sized>(
		kind: StrategyKind,
		targets: &'a ProteinDatabase,
		config: &DecoyConfig,
		rng: &mut R,
	) -> Result<Self> {
		info!("Preparing {} decoys for {} targets", kind, targets.len());
		Ok(match kind {
			StrategyKind::Random => DecoyGenerator::Random(RandomDecoy::new(targets, config)?),
			StrategyKind::DeBruijn => DecoyGenerator::DeBruijn(DeBruijnDecoy::new(targets, config, rng)?),
			StrategyKind::Reverse => DecoyGenerator::Reverse(ReverseDecoy::new(targets)),
		})
	}

	pub fn kind(&self) -> StrategyKind {
		match self {
			DecoyGenerator::Random(_) => StrategyKind::Random,
			DecoyGenerator::DeBruijn(_) => StrategyKind::DeBruijn,
			DecoyGenerator::Reverse(_) => StrategyKind::Reverse,
		}
	}
}

impl DecoyStrategy for DecoyGenerator<'_> {
	fn targets(&self) -> &ProteinDatabase {
		match self {
			DecoyGenerator::Random(g) => g.targets(),
			DecoyGenerator::DeBruijn(g) => g.targets(),
			DecoyGenerator::Reverse(g) => g.targets(),
		}
	}

	fn generate_decoy<R: Rng + ?Sized>(&self, id: &str, rng: &mut R) -> Result<String> {
		match self {
			DecoyGenerator::Random(g) => g.generate_decoy(id, rng),
			DecoyGenerator::DeBruijn(g) => g.generate_decoy(id, rng),
			DecoyGenerator::Reverse(g) => g.generate_decoy(id, rng),
		}
	}
}
