//! Top-level module for the Markov chain system.
//!
//! - Fixed-capacity prefix table (`FixedHashTable`)
//! - Corpus indexing with start-of-text boundary markers (`indexer`)
//! - Generation parameters (`ChainInput`, `StartSeed`)
//! - Randomized chain walk (`generator`)
//! - The table bundled with its prefix length (`MarkovModel`)

/// Fixed-capacity hashtable with backward linear probing.
pub mod hash_table;

/// Builds the prefix → suffixes table from a token sequence.
pub mod indexer;

/// Generation parameters and start-seed strategy.
pub mod chain_input;

/// Randomized walk over a built table.
pub mod generator;

/// Table plus prefix length, the unit the front-ends work with.
pub mod markov_model;

pub use chain_input::{ChainInput, StartSeed};
pub use hash_table::{FixedHashTable, TableStats};
pub use indexer::BOUNDARY_MARKER;
pub use markov_model::MarkovModel;
