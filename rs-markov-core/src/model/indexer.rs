use std::collections::VecDeque;

use log::{debug, info};

use super::hash_table::FixedHashTable;
use crate::error::{MarkovError, Result};

/// Sentinel word used to pad the prefix window before the first corpus word.
///
/// `"@ @"` (for a prefix length of 2) therefore maps to the first word of
/// the corpus, `"@ first"` to the second, and so on.
pub const BOUNDARY_MARKER: &str = "@";

/// Joins words with single spaces to form a table key.
pub(crate) fn join_key<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> String {
	let mut key = String::new();
	for (i, word) in words.into_iter().enumerate() {
		if i > 0 {
			key.push(' ');
		}
		key.push_str(word.as_ref());
	}
	key
}

/// Builds a prefix → suffixes table from a token sequence.
///
/// Runs the boundary phase (see [`index_boundary`]) then records, for
/// every window of `prefix_len` consecutive tokens, the token following it.
///
/// # Errors
/// - [`MarkovError::InvalidPrefixLength`] if `prefix_len` is zero
/// - [`MarkovError::InvalidCapacity`] if `capacity` is zero
/// - [`MarkovError::TableFull`] if the corpus has more distinct prefixes
///   than `capacity`
pub fn build_table(tokens: &[String], prefix_len: usize, capacity: usize) -> Result<FixedHashTable> {
	if prefix_len == 0 {
		return Err(MarkovError::InvalidPrefixLength(prefix_len));
	}
	let mut table = FixedHashTable::with_capacity(capacity)?;

	index_boundary(&mut table, tokens, prefix_len)?;
	debug!("boundary phase done, {} keys", table.len());

	for window in tokens.windows(prefix_len + 1) {
		table.put(&join_key(&window[..prefix_len]), window[prefix_len].clone())?;
	}

	info!("indexed {} tokens into {}/{} slots", tokens.len(), table.len(), table.capacity());
	Ok(table)
}

/// Records the windows that still overlap the start of the corpus.
///
/// The window starts as `prefix_len` markers followed by the first token.
/// Each step stores `first prefix_len words → last word`, then slides one
/// token to the right, until no marker is left in the key. A corpus
/// shorter than `prefix_len` stops early once its tokens run out.
pub fn index_boundary(table: &mut FixedHashTable, tokens: &[String], prefix_len: usize) -> Result<()> {
	let mut upcoming = tokens.iter();
	let mut window: VecDeque<&str> = std::iter::repeat_n(BOUNDARY_MARKER, prefix_len).collect();

	match upcoming.next() {
		Some(first) => window.push_back(first),
		None => return Ok(()),
	}

	for _ in 0..prefix_len {
		// Window always holds prefix_len + 1 words here
		let suffix = window[prefix_len];
		table.put(&join_key(window.range(..prefix_len)), suffix.to_owned())?;

		window.pop_front();
		match upcoming.next() {
			Some(next) => window.push_back(next),
			None => break,
		}
	}
	Ok(())
}
