mod error;

pub use error::{Error, Result};

use std::{fs, path::Path};

use serde_json::{Value, json};
use tempfile::TempDir;

/// A throwaway corpus root. Files disappear when the value is dropped.
pub struct TestCorpus {
	dir: TempDir,
}
impl TestCorpus {
	pub fn new() -> Result<Self> {
		let dir = tempfile::Builder::new().prefix("idealink_corpus_").tempdir()?;

		Ok(Self { dir })
	}

	pub fn root(&self) -> &Path {
		self.dir.path()
	}

	/// Writes `items` as the JSON array for one corpus file, e.g. `proverbs.json`.
	pub fn write_items(&self, file_name: &str, items: &[Value]) -> Result<()> {
		let raw = serde_json::to_string_pretty(items)?;

		self.write_raw(file_name, &raw)
	}

	/// Writes arbitrary text, for exercising malformed corpus files.
	pub fn write_raw(&self, file_name: &str, raw: &str) -> Result<()> {
		if file_name.contains(['/', '\\']) {
			return Err(Error::Message(format!("Corpus file name {file_name:?} must be a bare name.")));
		}

		fs::write(self.dir.path().join(file_name), raw)?;

		Ok(())
	}
}

/// One corpus item in the on-disk shape.
pub fn item(id: &str, kind: &str, content: &str, author: &str, keywords: &[&str]) -> Value {
	json!({
		"id": id,
		"content": content,
		"author": author,
		"keywords": keywords,
		"type": kind,
		"language": "ko",
	})
}
