use thiserror::Error;

/// Errors raised while building or walking a Markov chain.
///
/// A missing prefix is never an error: lookups return `None` and the
/// generator treats it as the end of the chain.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// Every slot was probed without finding the key or an empty slot.
	#[error("Hash table is full (capacity {capacity})")]
	TableFull { capacity: usize },

	#[error("table capacity must be at least 1")]
	InvalidCapacity,

	#[error("specified prefix size is less than one (got {0})")]
	InvalidPrefixLength(usize),

	#[error("specified size of the generated text is less than one (got {0})")]
	InvalidMaxWords(usize),

	#[error("seed does not contain any word")]
	EmptySeed,

	#[error("model does not contain any prefix")]
	EmptyModel,

	#[error("IO: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
