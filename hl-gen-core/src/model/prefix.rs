use std::fmt;

/// A Markov chain prefix: the fixed-length window of preceding words.
///
/// The prefix is the lookup key of a `Chain`. Equality and hashing are
/// structural over the word sequence, so two different sequences can never
/// collide the way space-joined string keys could (`["a b", "c"]` vs
/// `["a", "b c"]`).
///
/// ## Invariants
/// - The number of words never changes after construction
/// - Shifting returns a new prefix, the original is left untouched
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prefix {
	words: Box<[String]>,
}

impl Prefix {
	/// Creates the initial prefix: `len` empty-string placeholders.
	///
	/// Both training and generation start every walk from this prefix.
	pub fn empty(len: usize) -> Self {
		Self { words: vec![String::new(); len].into_boxed_slice() }
	}

	/// Creates a prefix from explicit words.
	pub fn from_words<I, S>(words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { words: words.into_iter().map(Into::into).collect() }
	}

	/// Returns a new prefix with the first word dropped and `word` appended.
	pub fn shift(&self, word: &str) -> Self {
		let words = self
			.words
			.iter()
			.skip(1)
			.cloned()
			.chain(std::iter::once(word.to_owned()))
			.collect();
		Self { words }
	}
}

/// Canonical key rendering: words joined by a single space.
impl fmt::Display for Prefix {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.words.join(" "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_prefix_holds_placeholders() {
		let p = Prefix::empty(3);
		assert_eq!(p, Prefix::from_words(["", "", ""]));
		assert_eq!(p.to_string(), "  ");
	}

	#[test]
	fn shift_keeps_length_and_leaves_original() {
		let p = Prefix::from_words(["a", "b"]);
		let shifted = p.shift("c");

		assert_eq!(shifted, Prefix::from_words(["b", "c"]));
		assert_eq!(p, Prefix::from_words(["a", "b"]));
	}

	#[test]
	fn joined_form_collision_is_not_equality() {
		let left = Prefix::from_words(["a b", "c"]);
		let right = Prefix::from_words(["a", "b c"]);

		assert_eq!(left.to_string(), right.to_string());
		assert_ne!(left, right);
	}
}
