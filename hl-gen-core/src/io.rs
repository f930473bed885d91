use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Blank lines are skipped, they would only train the placeholder prefix
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents
		.lines()
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect())
}
