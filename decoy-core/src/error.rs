use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DecoyError>;

/// Top-level error for decoy generation.
///
/// Input errors mean the caller handed over something the core cannot work
/// with. Internal errors mean a table was built inconsistently; they are never
/// expected on valid input and cannot be recovered from without fixing the
/// construction step.
#[derive(Error, Debug)]
pub enum DecoyError {
	#[error("rejected input: {0}")]
	Input(#[from] InputError),

	#[error("internal consistency failure: {0}")]
	Internal(#[from] InternalError),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	#[error("serialization error: {0}")]
	Serialization(#[from] postcard::Error),
}

impl DecoyError {
	/// True for errors that indicate a bug in table construction.
	pub fn is_internal(&self) -> bool {
		matches!(self, DecoyError::Internal(_))
	}
}

/// Violations of an input contract.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
	#[error("invalid protein id: {0}")]
	UnknownId(String),

	#[error("{left} and {right} do not contain the same protein ids")]
	IdMismatch { left: &'static str, right: &'static str },

	#[error("composition is empty, no symbol was observed")]
	EmptyComposition,

	#[error("composition has no non-cleavage symbol with a positive count")]
	NoEligibleSymbol,

	#[error("symbol '{symbol}' at position {position} of '{id}' is not in the alphabet")]
	UnknownSymbol { id: String, symbol: char, position: usize },

	#[error("sample {num} is outside [1, {total}]")]
	SampleOutOfRange { num: usize, total: usize },

	#[error("invalid configuration: {0}")]
	Config(String),

	#[error("malformed FASTA at line {line}: {reason}")]
	Fasta { line: usize, reason: String },

	#[error("path '{}' has no file name", .0.display())]
	NoFileName(std::path::PathBuf),

	#[error("protein '{0}' has an empty sequence")]
	EmptySequence(String),

	#[error("assignment table maps context '{context}' to '{symbol}', which breaks the cleavage rule")]
	AssignmentConflict { context: String, symbol: char },
}

/// Broken invariants of the range or assignment tables.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InternalError {
	#[error("binary search exhausted without resolving sample {0}")]
	SearchExhausted(usize),

	#[error("context '{0}' is missing from the assignment table")]
	MissingContext(String),

	#[error("no eligible symbol drawn for context '{context}' after {draws} draws")]
	RejectionBound { context: String, draws: usize },

	#[error("range table ends at {end}, expected {expected}")]
	RangeTotal { end: usize, expected: usize },

	#[error("decoy for '{id}' has length {decoy}, target has length {target}")]
	LengthMismatch { id: String, target: usize, decoy: usize },
}
