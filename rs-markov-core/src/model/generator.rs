use std::collections::VecDeque;

use log::debug;
use rand::Rng;

use super::chain_input::{ChainInput, StartSeed};
use super::hash_table::FixedHashTable;
use super::indexer::{BOUNDARY_MARKER, join_key};
use crate::error::{MarkovError, Result};

/// Walks the table from `seed_tokens` and returns the generated words.
///
/// The output starts with the first `prefix_len` seed words (fewer if the
/// seed is shorter). Each step looks up the last `prefix_len` output words
/// and appends one of the stored suffixes: the only one if there is a
/// single candidate, otherwise one drawn uniformly from `rng`.
///
/// The walk stops, without error, when the current prefix is absent or
/// `max_words` words have been produced. A seed longer than `max_words`
/// is not truncated below `prefix_len`.
pub fn generate<S, R>(
	table: &FixedHashTable,
	seed_tokens: &[S],
	prefix_len: usize,
	max_words: usize,
	rng: &mut R,
) -> Vec<String>
where
	S: AsRef<str>,
	R: Rng + ?Sized,
{
	let window: VecDeque<String> = seed_tokens
		.iter()
		.take(prefix_len)
		.map(|word| word.as_ref().to_owned())
		.collect();
	let output = window.iter().cloned().collect();
	walk(table, window, output, prefix_len, max_words, rng)
}

/// Generates a chain according to `input`.
///
/// A random start key longer than `max_words` is cut to the bound; a custom
/// seed always keeps its first `prefix_len` words.
///
/// # Errors
/// - [`MarkovError::EmptySeed`] if a custom seed has no word
/// - [`MarkovError::EmptyModel`] if a random seed is requested from an empty table
pub fn generate_chain<R: Rng + ?Sized>(
	table: &FixedHashTable,
	input: &ChainInput,
	prefix_len: usize,
	rng: &mut R,
) -> Result<Vec<String>> {
	match &input.start_seed {
		StartSeed::Custom(seed) => {
			if seed.is_empty() {
				return Err(MarkovError::EmptySeed);
			}
			Ok(generate(table, seed, prefix_len, input.max_words(), rng))
		}
		StartSeed::Boundary => {
			let window = std::iter::repeat_n(BOUNDARY_MARKER.to_owned(), prefix_len).collect();
			Ok(walk(table, window, Vec::new(), prefix_len, input.max_words(), rng))
		}
		StartSeed::Random => {
			let key = table.random_key(rng).ok_or(MarkovError::EmptyModel)?;
			let window: VecDeque<String> = key.split(' ').map(str::to_owned).collect();
			let mut output: Vec<String> = window.iter().filter(|word| *word != BOUNDARY_MARKER).cloned().collect();
			output.truncate(input.max_words());
			Ok(walk(table, window, output, prefix_len, input.max_words(), rng))
		}
	}
}

/// Extends `output` until the window's key is unknown or the bound is hit.
///
/// `window` holds the last `prefix_len` words looked up, markers included.
fn walk<R: Rng + ?Sized>(
	table: &FixedHashTable,
	mut window: VecDeque<String>,
	mut output: Vec<String>,
	prefix_len: usize,
	max_words: usize,
	rng: &mut R,
) -> Vec<String> {
	while output.len() < max_words {
		let key = join_key(&window);
		let Some(candidates) = table.get(&key) else {
			debug!("chain ended after {} words, no suffix for {:?}", output.len(), key);
			return output;
		};

		let word = if candidates.len() == 1 {
			candidates[0].clone()
		} else {
			candidates[rng.random_range(0..candidates.len())].clone()
		};

		output.push(word.clone());
		window.push_back(word);
		while window.len() > prefix_len {
			window.pop_front();
		}
	}

	debug!("chain reached the bound of {} words", max_words);
	output
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::indexer::build_table;
	use crate::text::tokenize;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	/// Builds a table from `(key, space separated suffixes)` pairs.
	fn table_of(entries: &[(&str, &str)]) -> FixedHashTable {
		let mut table = FixedHashTable::with_capacity(101).unwrap();
		for (key, values) in entries {
			for value in tokenize(values) {
				table.put(key, value).unwrap();
			}
		}
		table
	}

	#[test]
	fn stops_at_missing_prefix() {
		let table = table_of(&[("the cat", "sat")]);
		let chain = generate(&table, &["the", "cat"], 2, 5, &mut StdRng::seed_from_u64(8));
		assert_eq!(chain, vec!["the", "cat", "sat"]);
	}

	#[test]
	fn stops_at_length_bound() {
		let table = table_of(&[("x", "x y"), ("y", "x")]);
		let chain = generate(&table, &["x"], 1, 20, &mut StdRng::seed_from_u64(3));

		assert_eq!(chain.len(), 20);
		assert!(chain.iter().all(|word| word == "x" || word == "y"));
	}

	#[test]
	fn short_seed_is_not_padded() {
		let table = table_of(&[("a", "b"), ("a b", "c")]);
		let chain = generate(&table, &["a"], 2, 10, &mut StdRng::seed_from_u64(0));
		// "a" is looked up as is, then the window grows to "a b"
		assert_eq!(chain, vec!["a", "b", "c"]);
	}

	#[test]
	fn seed_longer_than_prefix_is_cut() {
		let table = table_of(&[("one two", "three")]);
		let chain = generate(&table, &["one", "two", "nine"], 2, 10, &mut StdRng::seed_from_u64(0));
		assert_eq!(chain, vec!["one", "two", "three"]);
	}

	#[test]
	fn boundary_seed_replays_corpus_start() {
		let tokens = tokenize("the cat sat on the mat");
		let table = build_table(&tokens, 2, 101).unwrap();
		let input = ChainInput::new(100).unwrap();

		let chain = generate_chain(&table, &input, 2, &mut StdRng::seed_from_u64(8)).unwrap();
		assert_eq!(chain, tokens);
	}

	#[test]
	fn random_seed_never_emits_markers() {
		let tokens = tokenize("a b c a b d");
		let table = build_table(&tokens, 2, 101).unwrap();
		let input = ChainInput::with_seed(10, StartSeed::Random).unwrap();

		let mut rng = StdRng::seed_from_u64(11);
		for _ in 0..20 {
			let chain = generate_chain(&table, &input, 2, &mut rng).unwrap();
			assert!(!chain.is_empty());
			assert!(chain.iter().all(|word| word != BOUNDARY_MARKER));
		}
	}

	#[test]
	fn random_seed_respects_length_bound() {
		let tokens = tokenize("a b c d e f");
		let table = build_table(&tokens, 3, 101).unwrap();

		let mut rng = StdRng::seed_from_u64(2);
		for max_words in 1..=3 {
			let input = ChainInput::with_seed(max_words, StartSeed::Random).unwrap();
			for _ in 0..50 {
				let chain = generate_chain(&table, &input, 3, &mut rng).unwrap();
				assert!(!chain.is_empty());
				assert!(chain.len() <= max_words);
			}
		}
	}

	#[test]
	fn empty_custom_seed_is_an_error() {
		let table = table_of(&[("a", "b")]);
		let input = ChainInput::with_seed(5, StartSeed::Custom(Vec::new())).unwrap();
		assert!(matches!(
			generate_chain(&table, &input, 1, &mut StdRng::seed_from_u64(0)),
			Err(MarkovError::EmptySeed)
		));
	}

	#[test]
	fn random_seed_on_empty_table_is_an_error() {
		let table = FixedHashTable::with_capacity(5).unwrap();
		let input = ChainInput::with_seed(5, StartSeed::Random).unwrap();
		assert!(matches!(
			generate_chain(&table, &input, 1, &mut StdRng::seed_from_u64(0)),
			Err(MarkovError::EmptyModel)
		));
	}
}
