use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::chain::Chain;
use super::generation_input::GenerationInput;

/// High-level generator walking a trained `Chain`.
///
/// # Responsibilities
/// - Produce bounded word sequences by random walk from the start prefix
/// - Retry walks whose output the caller already knows
///
/// The generator holds no state between calls; every walk starts from the
/// all-placeholder prefix.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
	chain: &'a Chain,
}

impl<'a> Generator<'a> {
	pub fn new(chain: &'a Chain) -> Self {
		Self { chain }
	}

	/// Generates at most `max_words` words using the thread-local RNG.
	pub fn generate(&self, max_words: usize) -> String {
		self.generate_with(max_words, &mut rand::rng())
	}

	/// Generates at most `max_words` words using the given random source.
	///
	/// # Behavior
	/// - Looks up the successors of the current prefix.
	/// - Stops early when there are none (unseen prefix or end of a line).
	/// - Otherwise picks one uniformly; repeated successors weigh the draw.
	/// - Shifts the chosen word into the prefix and continues.
	///
	/// Deterministic for a fixed random source and chain.
	pub fn generate_with<R: Rng + ?Sized>(&self, max_words: usize, rng: &mut R) -> String {
		let mut prefix = self.chain.start();
		let mut words: Vec<&str> = Vec::new();

		for _ in 0..max_words {
			let next = match self.chain.successors(&prefix).choose(rng) {
				Some(word) => word,
				None => break,
			};
			words.push(next.as_str());
			prefix = prefix.shift(next);
		}

		words.join(" ")
	}

	/// Generates a sequence while avoiding outputs the caller already knows.
	///
	/// # Behavior
	/// - Walks once, then walks again up to `nb_try` times while `is_known`
	///   returns `true` for the result.
	/// - Returns the first unknown result, or the last attempt if every try
	///   was known.
	pub fn generate_unseen<R, F>(&self, max_words: usize, mut nb_try: usize, rng: &mut R, is_known: F) -> String
	where
		R: Rng + ?Sized,
		F: Fn(&str) -> bool,
	{
		let mut text = self.generate_with(max_words, rng);

		while nb_try > 0 && is_known(&text) {
			debug!("generated text already known, retrying ({} left)", nb_try);
			text = self.generate_with(max_words, rng);
			nb_try -= 1;
		}

		text
	}

	/// Generates using the parameters of a `GenerationInput`.
	///
	/// The input's prefix length is not used here, it only matters when the
	/// chain is built.
	pub fn generate_from_input<F>(&self, input: &GenerationInput, is_known: F) -> String
	where
		F: Fn(&str) -> bool,
	{
		self.generate_unseen(input.max_words, input.nb_try, &mut rand::rng(), is_known)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;
	use rand::{RngCore, SeedableRng};

	/// Random source whose every draw is zero, so `choose` always takes index 0.
	struct FirstPick;

	impl RngCore for FirstPick {
		fn next_u32(&mut self) -> u32 {
			0
		}

		fn next_u64(&mut self) -> u64 {
			0
		}

		fn fill_bytes(&mut self, dst: &mut [u8]) {
			dst.fill(0);
		}
	}

	fn trained(prefix_len: usize, lines: &[&str]) -> Chain {
		let mut chain = Chain::new(prefix_len).unwrap();
		chain.train_all(lines);
		chain
	}

	#[test]
	fn zero_words_is_empty() {
		let chain = trained(2, &["some headline here"]);
		assert_eq!(Generator::new(&chain).generate(0), "");
	}

	#[test]
	fn untrained_chain_stops_immediately() {
		let chain = Chain::new(2).unwrap();
		assert_eq!(Generator::new(&chain).generate(10), "");
	}

	#[test]
	fn alternating_walk() {
		let chain = trained(1, &["a b a b a"]);
		assert_eq!(Generator::new(&chain).generate(4), "a b a b");
	}

	#[test]
	fn first_pick_source_follows_insertion_order() {
		// "" -> [a, a, b], a -> [b, c], b -> [c, a], c -> [b]
		let chain = trained(1, &["a b c", "a c b", "b a"]);
		let generator = Generator::new(&chain);

		assert_eq!(generator.generate_with(4, &mut FirstPick), "a b c b");
		assert_eq!(generator.generate_with(7, &mut FirstPick), "a b c b c b c");
	}

	#[test]
	fn walk_is_bounded_by_max_words() {
		let chain = trained(1, &["a b a b a"]);
		let text = Generator::new(&chain).generate(100);
		assert_eq!(text.split(' ').count(), 100);
	}

	#[test]
	fn walk_stops_at_line_end() {
		let chain = trained(2, &["x y z", "p y z"]);
		let generator = Generator::new(&chain);
		for _ in 0..20 {
			let text = generator.generate(25);
			assert!(text == "x y z" || text == "p y z", "unexpected walk: {text}");
		}
	}

	#[test]
	fn single_line_is_reproduced() {
		let line = "You Won't Believe What This Dog Did Next";
		let chain = trained(2, &[line]);
		assert_eq!(Generator::new(&chain).generate(25), line);
	}

	#[test]
	fn fixed_seed_is_deterministic() {
		let chain = trained(1, &[
			"the cat sat on the mat",
			"the dog sat on the log",
			"a cat and a dog met on the road",
		]);
		let generator = Generator::new(&chain);

		let first = generator.generate_with(12, &mut StdRng::seed_from_u64(42));
		let second = generator.generate_with(12, &mut StdRng::seed_from_u64(42));
		assert_eq!(first, second);
	}

	#[test]
	fn unseen_retries_past_known_text() {
		let chain = trained(1, &["a b", "c d"]);
		let generator = Generator::new(&chain);
		let mut rng = StdRng::seed_from_u64(7);

		let text = generator.generate_unseen(10, 64, &mut rng, |t| t == "a b");
		assert_eq!(text, "c d");
	}

	#[test]
	fn unseen_gives_up_after_tries() {
		let chain = trained(2, &["only one way"]);
		let generator = Generator::new(&chain);
		let mut rng = StdRng::seed_from_u64(1);

		let text = generator.generate_unseen(10, 3, &mut rng, |_| true);
		assert_eq!(text, "only one way");
	}
}
