//! Word-level Markov chain text generation.
//!
//! This crate provides:
//! - A fixed-capacity, linearly probed hashtable mapping prefixes to suffixes
//! - Corpus indexing with boundary markers at the start of the text
//! - Randomized chain generation over an injectable random source
//! - Small text utilities (tokenizing, line formatting) and corpus I/O
//!
//! The table never grows: callers pick the capacity up front and get
//! [`MarkovError::TableFull`] back when it is too small.

/// Prefix table, indexing and generation.
pub mod model;

/// Error taxonomy shared by the whole crate.
pub mod error;

/// Corpus file reading.
pub mod io;

/// Tokenizing and output formatting.
pub mod text;

pub use error::{MarkovError, Result};
