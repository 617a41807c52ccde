use crate::error::{InputError, Result};

/// Default symbol set: the 26 upper-case letters.
pub const DEFAULT_ALPHABET: std::ops::RangeInclusive<char> = 'A'..='Z';

/// Trypsin cleaves after these residues.
pub const DEFAULT_CLEAVAGE: [char; 2] = ['K', 'R'];

/// Symbol prepended to sequences so boundary residues get full contexts.
pub const DEFAULT_SENTINEL: char = '_';

/// Prefix inserted after `>` in decoy headers.
pub const DEFAULT_DECOY_PREFIX: &str = "XXX_";

/// Upper bound on rejected draws for a single context.
pub const DEFAULT_MAX_DRAWS: usize = 1_000_000;

/// Parameters shared by every decoy strategy.
///
/// # Responsibilities
/// - Hold the alphabet used for composition and range tables
/// - Hold the cleavage-defining symbols preserved by the de Bruijn strategy
/// - Hold the sentinel used to pad sequences before windowing
///
/// # Invariants
/// - The alphabet is non-empty, sorted and free of duplicates
/// - The sentinel is not part of the alphabet
/// - Every cleavage symbol belongs to the alphabet
#[derive(Clone, Debug)]
pub struct DecoyConfig {
	alphabet: Vec<char>,
	cleavage: Vec<char>,
	sentinel: char,

	/// Maximum number of rejected draws before assignment gives up.
	pub max_draws: usize,

	/// Inserted after `>` when building decoy headers.
	pub decoy_prefix: String,
}

impl Default for DecoyConfig {
	fn default() -> Self {
		Self {
			alphabet: DEFAULT_ALPHABET.collect(),
			cleavage: DEFAULT_CLEAVAGE.to_vec(),
			sentinel: DEFAULT_SENTINEL,
			max_draws: DEFAULT_MAX_DRAWS,
			decoy_prefix: DEFAULT_DECOY_PREFIX.to_owned(),
		}
	}
}

impl DecoyConfig {
	/// Builds a configuration from its three symbol sets, validated together.
	///
	/// Alphabet and cleavage symbols are sorted and deduplicated. The decoy
	/// prefix and rejection bound take their defaults.
	///
	/// # Errors
	/// Returns an error if the alphabet is empty or contains the sentinel,
	/// or if a cleavage symbol is not in the alphabet.
	pub fn new(
		alphabet: impl IntoIterator<Item = char>,
		cleavage: impl IntoIterator<Item = char>,
		sentinel: char,
	) -> Result<Self> {
		let config = Self {
			alphabet: sorted_symbols(alphabet),
			cleavage: sorted_symbols(cleavage),
			sentinel,
			..Self::default()
		};
		config.validate()?;
		Ok(config)
	}

	pub fn alphabet(&self) -> &[char] {
		&self.alphabet
	}

	pub fn cleavage(&self) -> &[char] {
		&self.cleavage
	}

	pub fn sentinel(&self) -> char {
		self.sentinel
	}

	pub fn is_cleavage(&self, symbol: char) -> bool {
		self.cleavage.contains(&symbol)
	}

	/// Replaces the alphabet, keeping the current cleavage set.
	///
	/// # Errors
	/// Same rules as [`DecoyConfig::new`]; on error `self` is unchanged.
	pub fn set_alphabet(&mut self, alphabet: impl IntoIterator<Item = char>) -> Result<()> {
		*self = Self { alphabet: sorted_symbols(alphabet), ..self.clone() }.validated()?;
		Ok(())
	}

	/// Replaces the cleavage-defining symbols.
	///
	/// An empty set is accepted: every context is then substituted.
	pub fn set_cleavage(&mut self, cleavage: impl IntoIterator<Item = char>) -> Result<()> {
		*self = Self { cleavage: sorted_symbols(cleavage), ..self.clone() }.validated()?;
		Ok(())
	}

	pub fn set_sentinel(&mut self, sentinel: char) -> Result<()> {
		*self = Self { sentinel, ..self.clone() }.validated()?;
		Ok(())
	}

	fn validated(self) -> Result<Self> {
		self.validate()?;
		Ok(self)
	}

	fn validate(&self) -> Result<()> {
		if self.alphabet.is_empty() {
			return Err(InputError::Config("alphabet must not be empty".to_owned()).into());
		}
		if self.alphabet.contains(&self.sentinel) {
			return Err(InputError::Config(format!("sentinel '{}' must not be part of the alphabet", self.sentinel)).into());
		}
		if let Some(c) = self.cleavage.iter().find(|c| !self.alphabet.contains(c)) {
			return Err(InputError::Config(format!("cleavage symbol '{}' is not in the alphabet", c)).into());
		}
		Ok(())
	}
}

fn sorted_symbols(symbols: impl IntoIterator<Item = char>) -> Vec<char> {
	let mut symbols: Vec<char> = symbols.into_iter().collect();
	symbols.sort_unstable();
	symbols.dedup();
	symbols
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::DecoyError;

	#[test]
	fn test_default_config() {
		let config = DecoyConfig::default();
		assert_eq!(config.alphabet().len(), 26);
		assert_eq!(config.cleavage(), &['K', 'R']);
		assert_eq!(config.sentinel(), '_');
		assert!(config.is_cleavage('K'));
		assert!(!config.is_cleavage('A'));
	}

	#[test]
	fn test_set_alphabet_sorts_and_dedups() {
		let mut config = DecoyConfig::default();
		config.set_alphabet("RKAAC".chars()).unwrap();
		assert_eq!(config.alphabet(), &['A', 'C', 'K', 'R']);
	}

	#[test]
	fn test_set_alphabet_rejects_sentinel_and_missing_cleavage() {
		let mut config = DecoyConfig::default();
		assert!(matches!(config.set_alphabet("AK_R".chars()), Err(DecoyError::Input(InputError::Config(_)))));
		assert!(matches!(config.set_alphabet("ACD".chars()), Err(DecoyError::Input(InputError::Config(_)))));
		assert!(matches!(config.set_alphabet(std::iter::empty()), Err(DecoyError::Input(InputError::Config(_)))));
	}

	#[test]
	fn test_new_accepts_alphabet_without_default_cleavage() {
		let config = DecoyConfig::new("EDCA".chars(), "C".chars(), '_').unwrap();
		assert_eq!(config.alphabet(), &['A', 'C', 'D', 'E']);
		assert_eq!(config.cleavage(), &['C']);
		assert_eq!(config.max_draws, DEFAULT_MAX_DRAWS);

		assert!(matches!(DecoyConfig::new("ACDE".chars(), "K".chars(), '_'), Err(DecoyError::Input(InputError::Config(_)))));
		assert!(matches!(DecoyConfig::new("AC_".chars(), "C".chars(), '_'), Err(DecoyError::Input(InputError::Config(_)))));
	}

	#[test]
	fn test_failed_setter_leaves_config_unchanged() {
		let mut config = DecoyConfig::default();
		assert!(config.set_alphabet("ACD".chars()).is_err());
		assert_eq!(config.alphabet().len(), 26);
	}

	#[test]
	fn test_set_cleavage_and_sentinel() {
		let mut config = DecoyConfig::default();
		config.set_cleavage(['R']).unwrap();
		assert_eq!(config.cleavage(), &['R']);
		assert!(config.set_cleavage(['*']).is_err());
		assert!(config.set_sentinel('A').is_err());
		config.set_sentinel('#').unwrap();
		assert_eq!(config.sentinel(), '#');
	}
}
