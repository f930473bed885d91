use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default archive location, relative to the working directory.
pub const DEFAULT_ARCHIVE_PATH: &str = "titles.json";

/// Every title collected so far.
///
/// Stored on disk as a JSON object whose keys are the titles and whose values
/// are empty strings, so merging is a set union and lookups are exact.
///
/// Titles are kept sorted, which keeps training order (and therefore the
/// order of successor lists) stable between runs.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Archive {
	titles: BTreeMap<String, String>,
}

impl Archive {
	/// Loads an archive from disk.
	///
	/// # Errors
	/// Returns an error if the file is missing, unreadable or not a JSON
	/// object of strings.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let blob = fs::read(path.as_ref())?;
		let archive: Self = serde_json::from_slice(&blob)?;
		info!("loaded {} titles from {}", archive.len(), path.as_ref().display());
		Ok(archive)
	}

	/// Loads an archive, starting a new empty one if the file does not exist.
	///
	/// Any other failure (permissions, malformed JSON) is still an error, so
	/// a damaged archive is never silently replaced.
	pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
		if !path.as_ref().exists() {
			warn!("no archive at {}, starting a new one", path.as_ref().display());
			return Ok(Self::default());
		}
		Self::load(path)
	}

	/// Writes the archive as compact JSON, replacing any previous file.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let blob = serde_json::to_vec(self)?;
		fs::write(path.as_ref(), blob)?;
		info!("saved {} titles to {}", self.len(), path.as_ref().display());
		Ok(())
	}

	/// Adds titles to the archive.
	///
	/// Returns how many of them were not already present.
	pub fn merge<I, S>(&mut self, titles: I) -> usize
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut added = 0;
		for title in titles {
			if self.titles.insert(title.into(), String::new()).is_none() {
				added += 1;
			}
		}
		added
	}

	/// Returns `true` if `title` is an exact match for an archived title.
	pub fn contains(&self, title: &str) -> bool {
		self.titles.contains_key(title)
	}

	/// Iterates over titles in sorted order.
	pub fn titles(&self) -> impl Iterator<Item = &str> {
		self.titles.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.titles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.titles.is_empty()
	}
}
