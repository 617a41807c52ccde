use log::{debug, info};
use rand::Rng;

use super::assignment::AssignmentTable;
use super::composition::Composition;
use super::config::DecoyConfig;
use super::context::ContextTable;
use super::database::{ProteinDatabase, SequenceMap};
use super::generator::DecoyStrategy;
use super::range_table::RangeTable;
use super::verifier;
use crate::error::{InternalError, Result};

/// Context-substitution decoys ("de Bruijn" approach,
/// J. Proteome Res. 2020, 19, 3, 1029–1036).
///
/// Every 3-residue window of the padded targets is mapped once to a
/// replacement residue; a decoy is the concatenation of the replacements of
/// its target's windows. Windows ending on a cleavage residue keep it, so
/// digesting a decoy cuts at the same positions as its target.
///
/// ## Responsibilities
/// - Count the target composition and contexts
/// - Build (or adopt) the assignment table
/// - Translate targets and verify decoys against the table
#[derive(Debug)]
pub struct DeBruijnDecoy<'a> {
	targets: &'a ProteinDatabase,
	sentinel: char,
	composition: Composition,
	ranges: RangeTable,
	context_table: ContextTable,
	assignment: AssignmentTable,
}

impl<'a> DeBruijnDecoy<'a> {
	/// Builds every table from the targets and draws the assignment.
	///
	/// # Errors
	/// - Input error on a residue outside the alphabet, an empty composition
	///   or a composition without any non-cleavage residue
	/// - Internal error if assignment exceeds `config.max_draws`
	pub fn new<R: Rng + ?Sized>(targets: &'a ProteinDatabase, config: &DecoyConfig, rng: &mut R) -> Result<Self> {
		let composition = Composition::count(targets.sequences(), config.alphabet())?;
		let ranges = RangeTable::new(&composition)?;
		let context_table = ContextTable::count(targets.sequences(), config.sentinel());
		let assignment = AssignmentTable::build(context_table.contexts(), &ranges, config, rng)?;
		Ok(Self { targets, sentinel: config.sentinel(), composition, ranges, context_table, assignment })
	}

	/// Uses a previously built assignment table instead of drawing one.
	///
	/// The table must cover every context of `targets`; a missing context
	/// surfaces as an internal error during generation.
	///
	/// # Errors
	/// Input error if an entry breaks the cleavage rule of `config`, which
	/// happens when the table was built under another cleavage set.
	pub fn with_assignment(targets: &'a ProteinDatabase, config: &DecoyConfig, assignment: AssignmentTable) -> Result<Self> {
		assignment.check(config)?;
		let composition = Composition::count(targets.sequences(), config.alphabet())?;
		let ranges = RangeTable::new(&composition)?;
		let context_table = ContextTable::count(targets.sequences(), config.sentinel());
		info!("Reusing an assignment table of {} contexts", assignment.len());
		Ok(Self { targets, sentinel: config.sentinel(), composition, ranges, context_table, assignment })
	}

	pub fn composition(&self) -> &Composition {
		&self.composition
	}

	pub fn ranges(&self) -> &RangeTable {
		&self.ranges
	}

	pub fn context_table(&self) -> &ContextTable {
		&self.context_table
	}

	pub fn assignment(&self) -> &AssignmentTable {
		&self.assignment
	}

	/// Checks decoys against the assignment table.
	///
	/// # Errors
	/// Input error if `decoys` does not hold exactly the target identifiers.
	pub fn verify(&self, decoys: &SequenceMap) -> Result<bool> {
		verifier::verify_all(&self.assignment, self.targets.sequences(), decoys, self.sentinel)
	}
}

impl DecoyStrategy for DeBruijnDecoy<'_> {
	fn targets(&self) -> &ProteinDatabase {
		self.targets
	}

	fn generate_decoy<R: Rng + ?Sized>(&self, id: &str, _rng: &mut R) -> Result<String> {
		let target = self.targets.sequence(id)?;
		let decoy = self.assignment.translate(target, self.sentinel)?;

		let (target_len, decoy_len) = (target.chars().count(), decoy.chars().count());
		if target_len != decoy_len {
			return Err(InternalError::LengthMismatch { id: id.to_owned(), target: target_len, decoy: decoy_len }.into());
		}
		debug!("de Bruijn decoy for {} ({} residues)", id, decoy_len);
		Ok(decoy)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{DecoyError, InputError};
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn database(entries: &[(&str, &str)]) -> ProteinDatabase {
		let sequences: SequenceMap = entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		let headers = sequences.keys().map(|k| (k.clone(), format!(">sp|{}|TEST", k))).collect();
		ProteinDatabase::new(sequences, headers).unwrap()
	}

	fn targets() -> ProteinDatabase {
		database(&[
			("P1", "MKPEPTIDEK"),
			("P2", "MSTNPKPQRKTKRNTNRRPQDVKFPGG"),
			("P3", "GLSDGEWQQVLNVWGKVEADIAGHGQEVLIRLFTGHPETLEKFDKFKHLK"),
		])
	}

	#[test]
	fn test_decoys_keep_length_and_cleavage_sites() {
		let db = targets();
		let config = DecoyConfig::default();
		let mut rng = StdRng::seed_from_u64(8);
		let decoy = DeBruijnDecoy::new(&db, &config, &mut rng).unwrap();
		let decoys = decoy.generate_decoy_dict(&mut rng).unwrap();

		for (id, target) in db.sequences() {
			let generated = &decoys[id];
			assert_eq!(generated.len(), target.len());
			for (t, d) in target.chars().zip(generated.chars()) {
				assert_eq!(config.is_cleavage(t), config.is_cleavage(d));
				if config.is_cleavage(t) {
					assert_eq!(t, d);
				}
			}
		}
	}

	#[test]
	fn test_decoys_verify() {
		let db = targets();
		let mut rng = StdRng::seed_from_u64(13);
		let decoy = DeBruijnDecoy::new(&db, &DecoyConfig::default(), &mut rng).unwrap();
		let decoys = decoy.generate_decoy_dict(&mut rng).unwrap();
		assert!(decoy.verify(&decoys).unwrap());
		assert!(decoy.verify(&decoys).unwrap());
	}

	#[test]
	fn test_same_context_same_symbol() {
		let db = database(&[("P1", "AAAAAA"), ("P2", "CAAAG")]);
		let mut rng = StdRng::seed_from_u64(21);
		let decoy = DeBruijnDecoy::new(&db, &DecoyConfig::default(), &mut rng).unwrap();
		let p1 = decoy.generate_decoy("P1", &mut rng).unwrap();
		let p1: Vec<char> = p1.chars().collect();
		assert!(p1[2..].iter().all(|c| *c == p1[2]));
		// __A _AA AAA __C _CA CAA AAG
		assert_eq!(decoy.context_table().len(), 7);
	}

	#[test]
	fn test_reuse_assignment() {
		let db = targets();
		let config = DecoyConfig::default();
		let mut rng = StdRng::seed_from_u64(5);
		let first = DeBruijnDecoy::new(&db, &config, &mut rng).unwrap();
		let expected = first.generate_decoy_dict(&mut rng).unwrap();

		let second = DeBruijnDecoy::with_assignment(&db, &config, first.assignment().clone()).unwrap();
		assert_eq!(second.generate_decoy_dict(&mut rng).unwrap(), expected);
	}

	#[test]
	fn test_reused_assignment_missing_context() {
		let config = DecoyConfig::default();
		let small = database(&[("P1", "AAK")]);
		let first = DeBruijnDecoy::new(&small, &config, &mut StdRng::seed_from_u64(0)).unwrap();

		let other = database(&[("P1", "WWK")]);
		let second = DeBruijnDecoy::with_assignment(&other, &config, first.assignment().clone()).unwrap();
		let res = second.generate_decoy_dict(&mut rand::rng());
		assert!(res.as_ref().is_err_and(DecoyError::is_internal));
	}

	#[test]
	fn test_reused_assignment_from_other_cleavage_set() {
		let db = database(&[("P1", "AKAKAKAKAKAK")]);
		let default = DecoyConfig::default();
		let mut only_r = DecoyConfig::default();
		only_r.set_cleavage(['R']).unwrap();

		let mut rejected = 0;
		for seed in 0..32 {
			let built = DeBruijnDecoy::new(&db, &only_r, &mut StdRng::seed_from_u64(seed)).unwrap();
			match DeBruijnDecoy::with_assignment(&db, &default, built.assignment().clone()) {
				Err(DecoyError::Input(InputError::AssignmentConflict { .. })) => rejected += 1,
				Err(e) => panic!("unexpected error {}", e),
				// __A and AKA landed on A, _AK and KAK on K
				Ok(reused) => assert_eq!(reused.generate_decoy("P1", &mut rand::rng()).unwrap(), "AKAKAKAKAKAK"),
			}
		}
		assert!(rejected > 0);
	}

	#[test]
	fn test_unknown_id() {
		let db = targets();
		let decoy = DeBruijnDecoy::new(&db, &DecoyConfig::default(), &mut rand::rng()).unwrap();
		assert!(matches!(
			decoy.generate_decoy("P9", &mut rand::rng()),
			Err(DecoyError::Input(InputError::UnknownId(_)))
		));
	}
}
