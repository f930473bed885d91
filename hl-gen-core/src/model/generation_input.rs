use crate::error::{Error, Result};

/// Default number of words a generated headline may contain.
pub const DEFAULT_MAX_WORDS: usize = 20;

/// Default prefix length, in words.
pub const DEFAULT_PREFIX_LEN: usize = 2;

/// Input parameters for building a chain and walking it.
///
/// # Responsibilities
/// - Track generation parameters (`max_words`, `nb_try`)
/// - Hold a validated prefix length for chain construction
///
/// # Invariants
/// - `prefix_len` is always >= 1
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	/// Maximum number of words in the output (0 yields an empty string).
	pub max_words: usize,

	/// Number of extra walks to try when the output already exists in the corpus.
	pub nb_try: usize,

	/// Number of words in every chain prefix.
	prefix_len: usize,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self { max_words: DEFAULT_MAX_WORDS, nb_try: 0, prefix_len: DEFAULT_PREFIX_LEN }
	}
}

impl GenerationInput {
	/// Creates an input with explicit values.
	///
	/// # Errors
	/// Returns `Error::InvalidConfiguration` if `prefix_len` is 0.
	pub fn new(prefix_len: usize, max_words: usize, nb_try: usize) -> Result<Self> {
		let mut input = Self { max_words, nb_try, ..Self::default() };
		input.set_prefix_len(prefix_len)?;
		Ok(input)
	}

	/// Returns the current prefix length.
	pub fn prefix_len(&self) -> usize {
		self.prefix_len
	}

	/// Sets the prefix length.
	///
	/// # Errors
	/// Returns `Error::InvalidConfiguration` if the value is 0.
	pub fn set_prefix_len(&mut self, prefix_len: usize) -> Result<()> {
		if prefix_len < 1 {
			return Err(Error::InvalidConfiguration(format!(
				"prefix length must be >= 1, got {}",
				prefix_len
			)));
		}
		self.prefix_len = prefix_len;
		Ok(())
	}
}
