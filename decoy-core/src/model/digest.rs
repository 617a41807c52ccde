use std::collections::BTreeMap;
use std::fmt;

use log::{debug, warn};

use super::config::DecoyConfig;
use super::database::SequenceMap;

/// Monoisotopic residue mass in units of 10^-5 Da.
///
/// Returns `None` for letters without a standard residue mass
/// (`B`, `J`, `O`, `X`, `Z`).
pub fn residue_mass(residue: char) -> Option<u64> {
	let mass = match residue {
		'A' => 7_103_711,
		'C' => 10_300_919,
		'D' => 11_502_694,
		'E' => 12_904_259,
		'F' => 14_706_841,
		'G' => 5_702_146,
		'H' => 13_705_891,
		'I' | 'L' => 11_308_406,
		'K' => 12_809_496,
		'M' => 13_104_049,
		'N' => 11_404_293,
		'P' => 9_705_276,
		'Q' => 12_805_858,
		'R' => 15_610_111,
		'S' => 8_703_203,
		'T' => 10_104_768,
		'U' => 15_095_000,
		'V' => 9_906_841,
		'W' => 18_607_931,
		'Y' => 16_306_333,
		_ => return None,
	};
	Some(mass)
}

/// Summed residue mass of a peptide, exact to 10^-5 Da.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mass(u64);

impl Mass {
	const SCALE: u64 = 100_000;

	/// Mass of `peptide`, or `None` if one of its residues has no mass.
	pub fn of(peptide: &str) -> Option<Self> {
		peptide.chars().map(residue_mass).sum::<Option<u64>>().map(Mass)
	}

	pub fn daltons(&self) -> f64 {
		self.0 as f64 / Self::SCALE as f64
	}
}

impl fmt::Display for Mass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{:05}", self.0 / Self::SCALE, self.0 % Self::SCALE)
	}
}

/// Splits `sequence` right after every cleavage symbol.
///
/// A trailing piece without cleavage symbol is kept; concatenating the
/// pieces gives back `sequence`.
///
/// Example (cleavage `{K, R}`): `MKPEPTIDEKAA` → `MK`, `PEPTIDEK`, `AA`
pub fn cleave<'s>(sequence: &'s str, config: &DecoyConfig) -> Vec<&'s str> {
	sequence.split_inclusive(|c: char| config.is_cleavage(c)).collect()
}

/// Peptide-mass histogram.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MassCounts {
	pub counts: BTreeMap<Mass, usize>,

	/// Peptides left out because a residue has no mass.
	pub skipped: usize,
}

/// In-silico digestion of a protein collection.
///
/// ## Responsibilities
/// - Cleave every protein after the cleavage symbols of the config
/// - Count peptides per length and per monoisotopic mass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Digest {
	peptides: BTreeMap<String, Vec<String>>,
}

impl Digest {
	pub fn new(sequences: &SequenceMap, config: &DecoyConfig) -> Self {
		let peptides: BTreeMap<String, Vec<String>> = sequences
			.iter()
			.map(|(id, seq)| (id.clone(), cleave(seq, config).into_iter().map(str::to_owned).collect()))
			.collect();
		let digest = Self { peptides };
		debug!("Digested {} proteins into {} peptides", digest.peptides.len(), digest.len());
		digest
	}

	/// Peptides per protein identifier, in sequence order.
	pub fn peptides(&self) -> &BTreeMap<String, Vec<String>> {
		&self.peptides
	}

	/// `(protein id, peptide)` pairs, for reporting.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.peptides
			.iter()
			.flat_map(|(id, peptides)| peptides.iter().map(move |p| (id.as_str(), p.as_str())))
	}

	/// Total number of peptides.
	pub fn len(&self) -> usize {
		self.peptides.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Number of peptides per length (in residues).
	pub fn length_counts(&self) -> BTreeMap<usize, usize> {
		let mut counts = BTreeMap::new();
		for (_, peptide) in self.iter() {
			*counts.entry(peptide.chars().count()).or_insert(0) += 1;
		}
		counts
	}

	/// Number of peptides per monoisotopic mass.
	pub fn mass_counts(&self) -> MassCounts {
		let mut masses = MassCounts::default();
		for (_, peptide) in self.iter() {
			match Mass::of(peptide) {
				Some(mass) => *masses.counts.entry(mass).or_insert(0) += 1,
				None => masses.skipped += 1,
			}
		}
		if masses.skipped > 0 {
			warn!("{} peptides without a residue mass left out of the mass counts", masses.skipped);
		}
		masses
	}
}
