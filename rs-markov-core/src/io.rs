use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use crate::text::tokenize;

/// Reads a text file and returns every whitespace-delimited word in order.
///
/// - Reads the entire file into memory
/// - Line breaks are ordinary whitespace, so words never span lines
pub fn read_tokens<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(tokenize(&contents))
}

/// Re-opens the file and returns the first `prefix_len` words of its first line.
///
/// This is the second read pass over the corpus used to seed generation.
/// Fewer words are returned when the first line is shorter; an empty file
/// yields an empty vector.
pub fn read_seed_line<P: AsRef<Path>>(filename: P, prefix_len: usize) -> io::Result<Vec<String>> {
	let mut line = String::new();
	BufReader::new(File::open(filename)?).read_line(&mut line)?;
	Ok(tokenize(&line).into_iter().take(prefix_len).collect())
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	#[test]
	fn tokens_span_every_line() {
		let tmp = tempdir().expect("tempdir");
		let path = tmp.path().join("tokens.txt");
		fs::write(&path, "the cat\n  sat on\tthe mat\n").unwrap();

		assert_eq!(read_tokens(&path).unwrap(), vec!["the", "cat", "sat", "on", "the", "mat"]);
	}

	#[test]
	fn seed_comes_from_first_line_only() {
		let tmp = tempdir().expect("tempdir");
		let path = tmp.path().join("seed.txt");
		fs::write(&path, "one\ntwo three four\n").unwrap();

		assert_eq!(read_seed_line(&path, 2).unwrap(), vec!["one"]);
		assert_eq!(read_seed_line(&path, 0).unwrap(), Vec::<String>::new());
	}

	#[test]
	fn blank_first_line_gives_no_seed() {
		let tmp = tempdir().expect("tempdir");
		let path = tmp.path().join("blank.txt");
		fs::write(&path, "\nthe cat sat\n").unwrap();

		assert!(read_seed_line(&path, 2).unwrap().is_empty());
	}

	#[test]
	fn list_files_filters_by_extension() {
		let tmp = tempdir().expect("tempdir");
		fs::write(tmp.path().join("b.txt"), "b").unwrap();
		fs::write(tmp.path().join("a.txt"), "a").unwrap();
		fs::write(tmp.path().join("notes.md"), "n").unwrap();
		fs::create_dir(tmp.path().join("dir.txt")).unwrap();

		assert_eq!(list_files(tmp.path(), "txt").unwrap(), vec!["a.txt", "b.txt"]);
	}
}
