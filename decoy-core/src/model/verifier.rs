use log::warn;

use super::assignment::AssignmentTable;
use super::context::contexts;
use super::database::{same_ids, SequenceMap};
use crate::error::{InputError, Result};

/// Checks that `decoy` is what `table` produces for `target`.
///
/// Each window of the padded target is resolved through the table and
/// compared with the decoy symbol at the same position.
///
/// Example: with `__A → J`, `_AB → K`, `ABC → L`, target `ABC` verifies
/// against decoy `JKL` only.
///
/// # Errors
/// Internal error if a target context is missing from the table.
pub fn verify_sequence(table: &AssignmentTable, target: &str, decoy: &str, sentinel: char) -> Result<bool> {
	let windows = contexts(target, sentinel);
	if windows.len() != decoy.chars().count() {
		return Ok(false);
	}
	for (context, symbol) in windows.iter().zip(decoy.chars()) {
		if table.resolve(context)? != symbol {
			return Ok(false);
		}
	}
	Ok(true)
}

/// Checks every decoy of a collection.
///
/// # Errors
/// - Input error if `targets` and `decoys` do not hold the same identifiers
/// - Internal error if a target context is missing from the table
pub fn verify_all(table: &AssignmentTable, targets: &SequenceMap, decoys: &SequenceMap, sentinel: char) -> Result<bool> {
	if !same_ids(targets, decoys) {
		return Err(InputError::IdMismatch { left: "target sequences", right: "decoy sequences" }.into());
	}
	for (id, target) in targets {
		if !verify_sequence(table, target, &decoys[id], sentinel)? {
			warn!("Decoy for {} does not match the assignment table", id);
			return Ok(false);
		}
	}
	Ok(true)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::DecoyError;
	use crate::model::composition::Composition;
	use crate::model::config::DecoyConfig;
	use crate::model::context::ContextTable;
	use crate::model::range_table::RangeTable;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn sequences(entries: &[(&str, &str)]) -> SequenceMap {
		entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
	}

	fn assignment(seqs: &SequenceMap) -> AssignmentTable {
		let config = DecoyConfig::default();
		let ranges = RangeTable::new(&Composition::count(seqs, config.alphabet()).unwrap()).unwrap();
		let contexts = ContextTable::count(seqs, '_');
		AssignmentTable::build(contexts.contexts(), &ranges, &config, &mut StdRng::seed_from_u64(2)).unwrap()
	}

	#[test]
	fn test_translated_decoys_verify() {
		let targets = sequences(&[("P1", "MKPEPTIDEK"), ("P2", "ACDEFGHIKLMNPQRSTVWY")]);
		let table = assignment(&targets);
		let decoys: SequenceMap = targets
			.iter()
			.map(|(id, seq)| (id.clone(), table.translate(seq, '_').unwrap()))
			.collect();
		for _ in 0..3 {
			assert!(verify_all(&table, &targets, &decoys, '_').unwrap());
		}
	}

	#[test]
	fn test_tampered_decoy_fails() {
		let targets = sequences(&[("P1", "MKPEPTIDEK")]);
		let table = assignment(&targets);
		let decoy = table.translate("MKPEPTIDEK", '_').unwrap();

		let mut tampered: Vec<char> = decoy.chars().collect();
		tampered[1] = if tampered[1] == 'R' { 'K' } else { 'R' };
		let tampered: String = tampered.into_iter().collect();
		assert!(!verify_sequence(&table, "MKPEPTIDEK", &tampered, '_').unwrap());
		assert!(!verify_sequence(&table, "MKPEPTIDEK", &decoy[..9], '_').unwrap());
	}

	#[test]
	fn test_id_mismatch() {
		let targets = sequences(&[("P1", "MKPEPTIDEK")]);
		let table = assignment(&targets);
		let decoys = sequences(&[("P2", "MKPEPTIDEK")]);
		assert!(matches!(
			verify_all(&table, &targets, &decoys, '_'),
			Err(DecoyError::Input(InputError::IdMismatch { .. }))
		));
	}
}
