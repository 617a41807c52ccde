use log::debug;
use rand::Rng;

use super::composition::Composition;
use super::config::DecoyConfig;
use super::database::ProteinDatabase;
use super::generator::DecoyStrategy;
use super::range_table::RangeTable;
use crate::error::Result;

/// Residue-by-residue substitution following the target composition.
///
/// Each residue is replaced by an independent weighted draw. Nothing is
/// memoized, so the same target gives a different decoy on every call.
#[derive(Debug)]
pub struct RandomDecoy<'a> {
	targets: &'a ProteinDatabase,
	composition: Composition,
	ranges: RangeTable,
}

impl<'a> RandomDecoy<'a> {
	/// Counts the target composition and lays out its range table.
	///
	/// # Errors
	/// Returns an error on a residue outside the alphabet or an empty
	/// composition.
	pub fn new(targets: &'a ProteinDatabase, config: &DecoyConfig) -> Result<Self> {
		let composition = Composition::count(targets.sequences(), config.alphabet())?;
		let ranges = RangeTable::new(&composition)?;
		Ok(Self { targets, composition, ranges })
	}

	pub fn composition(&self) -> &Composition {
		&self.composition
	}

	pub fn ranges(&self) -> &RangeTable {
		&self.ranges
	}
}

impl DecoyStrategy for RandomDecoy<'_> {
	fn targets(&self) -> &ProteinDatabase {
		self.targets
	}

	fn generate_decoy<R: Rng + ?Sized>(&self, id: &str, rng: &mut R) -> Result<String> {
		let length = self.targets.sequence(id)?.chars().count();
		let sampler = self.ranges.sampler();
		let decoy = (0..length).map(|_| sampler.draw(rng)).collect::<Result<String>>()?;
		debug!("Random decoy for {} ({} residues)", id, length);
		Ok(decoy)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{DecoyError, InputError};
	use crate::model::database::SequenceMap;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn database(entries: &[(&str, &str)]) -> ProteinDatabase {
		let sequences: SequenceMap = entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		let headers = sequences.keys().map(|k| (k.clone(), format!(">sp|{}|TEST", k))).collect();
		ProteinDatabase::new(sequences, headers).unwrap()
	}

	#[test]
	fn test_length_and_symbols() {
		let db = database(&[("P1", "MKPEPTIDEK"), ("P2", "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAW")]);
		let decoy = RandomDecoy::new(&db, &DecoyConfig::default()).unwrap();
		let mut rng = StdRng::seed_from_u64(1);
		for (id, target) in db.sequences() {
			let generated = decoy.generate_decoy(id, &mut rng).unwrap();
			assert_eq!(generated.len(), target.len());
			assert!(generated.chars().all(|c| decoy.composition().get(c).unwrap_or(0) > 0));
		}
	}

	#[test]
	fn test_single_symbol_composition() {
		let db = database(&[("P1", "GGGG"), ("P2", "G")]);
		let decoy = RandomDecoy::new(&db, &DecoyConfig::default()).unwrap();
		let decoys = decoy.generate_decoy_dict(&mut StdRng::seed_from_u64(4)).unwrap();
		assert_eq!(decoys["P1"], "GGGG");
		assert_eq!(decoys["P2"], "G");
	}

	#[test]
	fn test_unknown_id() {
		let db = database(&[("P1", "MK")]);
		let decoy = RandomDecoy::new(&db, &DecoyConfig::default()).unwrap();
		let res = decoy.generate_decoy("nope", &mut StdRng::seed_from_u64(0));
		assert!(matches!(res, Err(DecoyError::Input(InputError::UnknownId(_)))));
	}
}
