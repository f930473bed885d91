//! Markov-chain headline generation library.
//!
//! This crate provides a word-level Markov chain text generator including:
//! - A trainable prefix → successors chain (`Chain`)
//! - Random-walk generation with an optional novelty retry loop (`Generator`)
//! - Corpus collaborators: the JSON title archive and the RSS feed client
//!
//! The chain is rebuilt from source text on every run, nothing about the
//! trained model is persisted.

/// Chain model, prefixes and generation logic.
pub mod model;

/// Where titles come from: the JSON archive and the RSS feed.
pub mod corpus;

/// Crate error type and `Result` alias.
pub mod error;

/// I/O utilities (plain-text corpus loading).
pub mod io;

pub use error::{Error, Result};
