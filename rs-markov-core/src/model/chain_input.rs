use crate::error::{MarkovError, Result};

/// Strategy used to select the starting window when generating a chain.
///
/// # Variants
/// - `Custom(words)`: start from the first `prefix_len` of `words`; they are
///   the first words of the output.
/// - `Boundary`: start from the all-marker window, so the chain begins
///   where the corpus begins. Markers never appear in the output.
/// - `Random`: start from a stored prefix picked uniformly at random.
#[derive(Clone, Debug, PartialEq)]
pub enum StartSeed {
	Custom(Vec<String>),
	Boundary,
	Random,
}

/// Parameters for one chain generation.
///
/// # Invariants
/// - `max_words >= 1`
#[derive(Clone, Debug)]
pub struct ChainInput {
	/// Upper bound on the number of output words.
	max_words: usize,

	/// Where the walk starts.
	pub start_seed: StartSeed,
}

impl ChainInput {
	/// Creates an input starting at the corpus boundary.
	///
	/// # Errors
	/// Returns [`MarkovError::InvalidMaxWords`] if `max_words` is zero.
	pub fn new(max_words: usize) -> Result<Self> {
		let mut input = Self { max_words: 1, start_seed: StartSeed::Boundary };
		input.set_max_words(max_words)?;
		Ok(input)
	}

	/// Same as [`ChainInput::new`] with an explicit seed.
	pub fn with_seed(max_words: usize, start_seed: StartSeed) -> Result<Self> {
		let mut input = Self::new(max_words)?;
		input.start_seed = start_seed;
		Ok(input)
	}

	pub fn max_words(&self) -> usize {
		self.max_words
	}

	/// Sets the output length bound.
	///
	/// # Errors
	/// Returns an error if `max_words` is zero; the previous value is kept.
	pub fn set_max_words(&mut self, max_words: usize) -> Result<()> {
		if max_words < 1 {
			return Err(MarkovError::InvalidMaxWords(max_words));
		}
		self.max_words = max_words;
		Ok(())
	}
}
