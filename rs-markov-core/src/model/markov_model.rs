use std::path::Path;

use rand::Rng;

use super::chain_input::ChainInput;
use super::generator::generate_chain;
use super::hash_table::{FixedHashTable, TableStats};
use super::indexer::build_table;
use crate::error::Result;
use crate::io::read_tokens;

/// A prefix table together with the prefix length it was built with.
///
/// The table is filled once by [`MarkovModel::build`] and only read
/// afterwards, so generation always uses the same prefix length as indexing.
#[derive(Clone, Debug)]
pub struct MarkovModel {
	prefix_len: usize,
	table: FixedHashTable,
}

impl MarkovModel {
	/// Indexes `tokens` into a table of `capacity` slots.
	///
	/// # Errors
	/// See [`build_table`].
	pub fn build(tokens: &[String], prefix_len: usize, capacity: usize) -> Result<Self> {
		let table = build_table(tokens, prefix_len, capacity)?;
		Ok(Self { prefix_len, table })
	}

	/// Reads and indexes a corpus file.
	///
	/// # Errors
	/// Returns an error if the file cannot be read or indexing fails.
	pub fn from_file<P: AsRef<Path>>(filepath: P, prefix_len: usize, capacity: usize) -> Result<Self> {
		let tokens = read_tokens(filepath)?;
		Self::build(&tokens, prefix_len, capacity)
	}

	pub fn prefix_len(&self) -> usize {
		self.prefix_len
	}

	/// Read-only access to the underlying table.
	pub fn table(&self) -> &FixedHashTable {
		&self.table
	}

	pub fn stats(&self) -> TableStats {
		self.table.stats()
	}

	/// Suffixes recorded for `prefix`, if any.
	pub fn suffixes(&self, prefix: &str) -> Option<&[String]> {
		self.table.get(prefix)
	}

	/// Generates a chain according to `input`, drawing choices from `rng`.
	pub fn generate<R: Rng + ?Sized>(&self, input: &ChainInput, rng: &mut R) -> Result<Vec<String>> {
		generate_chain(&self.table, input, self.prefix_len, rng)
	}
}
