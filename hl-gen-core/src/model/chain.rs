use std::collections::HashMap;

use log::debug;

use super::prefix::Prefix;
use crate::error::{Error, Result};

/// Represents a word-level Markov chain.
///
/// The `Chain` maps every observed prefix (the `prefix_len` preceding words)
/// to the list of words that followed it in the corpus.
///
/// # Responsibilities
/// - Build the chain from corpus lines, one line at a time
/// - Accumulate successors across lines into the same mapping
/// - Expose read-only successor lists to the `Generator`
///
/// # Invariants
/// - `prefix_len` is always >= 1 and never changes
/// - Every key in `chain` has exactly `prefix_len` words
/// - Successor lists keep insertion order and duplicates; a word observed
///   twice after a prefix appears twice, which is what weights sampling
#[derive(Clone, Debug)]
pub struct Chain {
	/// Number of words in every prefix
	prefix_len: usize, // must be >= 1

	/// Mapping from a prefix to the words observed after it
	chain: HashMap<Prefix, Vec<String>>,
}

impl Chain {
	/// Creates a new empty chain with prefixes of `prefix_len` words.
	///
	/// # Errors
	/// Returns `Error::InvalidConfiguration` if `prefix_len < 1`.
	pub fn new(prefix_len: usize) -> Result<Self> {
		if prefix_len < 1 {
			return Err(Error::InvalidConfiguration("prefix length must be >= 1".to_owned()));
		}
		Ok(Self { prefix_len, chain: HashMap::new() })
	}

	/// Adds a line to the chain.
	///
	/// The line is split on single spaces. Consecutive spaces produce
	/// empty-string words, which are recorded like any other word.
	///
	/// # Notes
	/// - Each walk starts from `Prefix::empty`, so the first word of every
	///   line becomes a successor of the all-placeholder prefix.
	/// - The last word of a line is never used as a key on its own, which is
	///   what makes a generated walk stop at a line ending.
	pub fn train(&mut self, line: &str) {
		let mut prefix = Prefix::empty(self.prefix_len);

		for word in line.split(' ') {
			let next = prefix.shift(word);
			self.chain.entry(prefix).or_default().push(word.to_owned());
			prefix = next;
		}
	}

	/// Trains on every line of `lines`, in iteration order.
	pub fn train_all<I, S>(&mut self, lines: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut count = 0usize;
		for line in lines {
			self.train(line.as_ref());
			count += 1;
		}
		debug!(
			"trained on {} lines: {} prefixes, {} transitions",
			count,
			self.len(),
			self.transitions()
		);
	}

	/// Returns the words observed after `prefix`.
	///
	/// Returns an empty slice if the prefix was never seen.
	pub fn successors(&self, prefix: &Prefix) -> &[String] {
		self.chain.get(prefix).map(Vec::as_slice).unwrap_or_default()
	}

	/// Returns the prefix a walk starts from.
	pub fn start(&self) -> Prefix {
		Prefix::empty(self.prefix_len)
	}

	pub fn prefix_len(&self) -> usize {
		self.prefix_len
	}

	/// Number of distinct prefixes.
	pub fn len(&self) -> usize {
		self.chain.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chain.is_empty()
	}

	/// Total number of recorded transitions, duplicates included.
	pub fn transitions(&self) -> usize {
		self.chain.values().map(Vec::len).sum()
	}

	/// Iterates over `(prefix, successors)` pairs in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&Prefix, &[String])> {
		self.chain.iter().map(|(prefix, words)| (prefix, words.as_slice()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(words: &[&str]) -> Prefix {
		Prefix::from_words(words.iter().copied())
	}

	#[test]
	fn zero_prefix_len_is_invalid() {
		let err = Chain::new(0).unwrap_err();
		assert!(matches!(err, Error::InvalidConfiguration(_)));
	}

	#[test]
	fn single_word_prefix_records_alternation() {
		let mut chain = Chain::new(1).unwrap();
		chain.train("a b a b a");

		assert_eq!(chain.successors(&key(&[""])), ["a"]);
		assert_eq!(chain.successors(&key(&["a"])), ["b", "b"]);
		assert_eq!(chain.successors(&key(&["b"])), ["a", "a"]);
		assert_eq!(chain.len(), 3);
		assert_eq!(chain.transitions(), 5);
	}

	#[test]
	fn lines_share_prefixes() {
		let mut chain = Chain::new(2).unwrap();
		chain.train_all(["x y z", "p y z"]);

		assert_eq!(chain.successors(&key(&["x", "y"])), ["z"]);
		assert_eq!(chain.successors(&key(&["p", "y"])), ["z"]);
		assert_eq!(chain.successors(&key(&["", ""])), ["x", "p"]);
		assert_eq!(chain.successors(&key(&["", "x"])), ["y"]);
		assert_eq!(chain.successors(&key(&["", "p"])), ["y"]);
		assert!(chain.successors(&key(&["y", "z"])).is_empty());
	}

	#[test]
	fn training_twice_doubles_every_list() {
		let line = "the cat saw the cat run";
		let mut once = Chain::new(2).unwrap();
		once.train(line);
		let mut twice = Chain::new(2).unwrap();
		twice.train(line);
		twice.train(line);

		assert_eq!(once.len(), twice.len());
		for (prefix, words) in once.iter() {
			assert_eq!(twice.successors(prefix).len(), words.len() * 2);
		}
	}

	#[test]
	fn short_line_fills_partial_prefixes() {
		let mut chain = Chain::new(3).unwrap();
		chain.train("hello");

		assert_eq!(chain.successors(&key(&["", "", ""])), ["hello"]);
		assert_eq!(chain.len(), 1);
	}

	#[test]
	fn consecutive_spaces_keep_empty_words() {
		let mut chain = Chain::new(1).unwrap();
		chain.train("a  b");

		assert_eq!(chain.successors(&key(&["a"])), [""]);
		assert_eq!(chain.successors(&key(&[""])), ["a", "b"]);
	}
}
