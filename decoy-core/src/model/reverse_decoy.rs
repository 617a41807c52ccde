use rand::Rng;

use super::database::ProteinDatabase;
use super::generator::DecoyStrategy;
use crate::error::Result;

/// Decoys made by reading each target backwards.
#[derive(Debug)]
pub struct ReverseDecoy<'a> {
	targets: &'a ProteinDatabase,
}

impl<'a> ReverseDecoy<'a> {
	pub fn new(targets: &'a ProteinDatabase) -> Self {
		Self { targets }
	}
}

impl DecoyStrategy for ReverseDecoy<'_> {
	fn targets(&self) -> &ProteinDatabase {
		self.targets
	}

	fn generate_decoy<R: Rng + ?Sized>(&self, id: &str, _rng: &mut R) -> Result<String> {
		Ok(self.targets.sequence(id)?.chars().rev().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_reverse() {
		let sequences = [("P1".to_owned(), "MKPEPTIDEK".to_owned())].into_iter().collect();
		let headers = [("P1".to_owned(), ">sp|P1|X".to_owned())].into_iter().collect();
		let db = ProteinDatabase::new(sequences, headers).unwrap();
		let decoys = ReverseDecoy::new(&db).generate_decoy_dict(&mut rand::rng()).unwrap();
		assert_eq!(decoys["P1"], "KEDITPEPKM");
	}
}
