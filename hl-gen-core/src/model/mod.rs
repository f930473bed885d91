//! Top-level module for the Markov chain.
//!
//! - Fixed-length word prefixes (`Prefix`)
//! - The trainable prefix → successors table (`Chain`)
//! - Generation parameters (`GenerationInput`)
//! - The random-walk interface (`Generator`)

/// Random-walk generation over a trained `Chain`.
///
/// Supports explicit random sources for reproducible output and a retry
/// loop that skips outputs already present in the corpus.
pub mod generator;

/// Word-level Markov chain.
///
/// Handles line ingestion and successor accumulation.
pub mod chain;

/// Fixed-length word window used as the chain key.
pub mod prefix;

/// Generation configuration (`max_words`, `nb_try`, validated `prefix_len`).
pub mod generation_input;

pub use chain::Chain;
pub use generation_input::GenerationInput;
pub use generator::Generator;
pub use prefix::Prefix;
