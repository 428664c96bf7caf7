/// Number of words printed per output line.
pub const WORDS_PER_LINE: usize = 10;

/// Splits text on any whitespace, dropping empty pieces.
pub fn tokenize(text: &str) -> Vec<String> {
	text.split_whitespace().map(str::to_owned).collect()
}

/// Joins words with single spaces, `per_line` words per line.
///
/// The last line holds the remainder. An empty chain gives no lines.
/// `per_line` of zero is treated as one.
pub fn format_lines<S: AsRef<str>>(words: &[S], per_line: usize) -> Vec<String> {
	words
		.chunks(per_line.max(1))
		.map(|chunk| chunk.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" "))
		.collect()
}
