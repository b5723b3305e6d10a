//! Lazily loaded, per-category cache over the on-disk knowledge library.
//!
//! Each category lives in one JSON array file under the configured corpus root. A category is read
//! on first use and kept for the lifetime of the cache. Failed loads are not cached, so the next
//! request retries the read.

use std::{
	collections::{BTreeMap, HashMap},
	fmt,
	path::{Path, PathBuf},
	sync::{Arc, OnceLock, RwLock},
};

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use idealink_domain::{CandidateSource, CandidateType};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CorpusCategory {
	FamousQuote,
	Movie,
	Book,
	Proverb,
	Academic,
	Essay,
	Poem,
	Drama,
	Animation,
	Web,
	Quotes,
	KoreanQuotes,
}
impl CorpusCategory {
	pub const ALL: [Self; 12] = [
		Self::FamousQuote,
		Self::Movie,
		Self::Book,
		Self::Proverb,
		Self::Academic,
		Self::Essay,
		Self::Poem,
		Self::Drama,
		Self::Animation,
		Self::Web,
		Self::Quotes,
		Self::KoreanQuotes,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::FamousQuote => "famous-quote",
			Self::Movie => "movie",
			Self::Book => "book",
			Self::Proverb => "proverb",
			Self::Academic => "academic",
			Self::Essay => "essay",
			Self::Poem => "poem",
			Self::Drama => "drama",
			Self::Animation => "animation",
			Self::Web => "web",
			Self::Quotes => "quotes",
			Self::KoreanQuotes => "korean-quotes",
		}
	}

	pub fn file_name(self) -> &'static str {
		match self {
			Self::FamousQuote => "famous-quotes.json",
			Self::Movie => "movie-quotes.json",
			Self::Book => "book-quotes.json",
			Self::Proverb => "proverbs.json",
			Self::Academic => "academic.json",
			Self::Essay => "essays.json",
			Self::Poem => "poems.json",
			Self::Drama => "drama-quotes.json",
			Self::Animation => "animation-quotes.json",
			Self::Web => "web-articles.json",
			Self::Quotes => "quotes.json",
			Self::KoreanQuotes => "korean-quotes.json",
		}
	}

	/// Type given to items whose own `type` is missing or unrecognized.
	pub fn default_type(self) -> CandidateType {
		match self {
			Self::FamousQuote | Self::Quotes | Self::KoreanQuotes => CandidateType::Quote,
			Self::Movie | Self::Drama | Self::Animation => CandidateType::ScreenLine,
			Self::Book => CandidateType::Book,
			Self::Proverb => CandidateType::Proverb,
			Self::Academic => CandidateType::Academic,
			Self::Essay => CandidateType::Essay,
			Self::Poem => CandidateType::Poem,
			Self::Web => CandidateType::Web,
		}
	}
}
impl fmt::Display for CorpusCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusItem {
	#[serde(default)]
	pub content: String,
	#[serde(default)]
	pub content_ko: Option<String>,
	#[serde(default)]
	pub author: Option<String>,
	#[serde(default)]
	pub author_ko: Option<String>,
	#[serde(default)]
	pub keywords: Vec<String>,
	#[serde(default)]
	pub source: Option<CorpusItemSource>,
	/// Top-level category used by the standalone quote files.
	#[serde(default)]
	pub category: Option<String>,
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	#[serde(default)]
	pub language: Option<String>,
	#[serde(skip)]
	folded: OnceLock<FoldedText>,
}
impl CorpusItem {
	/// Lowercased search text, built on first use and kept with the item.
	pub fn folded(&self) -> &FoldedText {
		self.folded.get_or_init(|| FoldedText::of(self))
	}

	/// Korean text when present, otherwise the original.
	pub fn display_content(&self) -> &str {
		non_empty(self.content_ko.as_deref()).unwrap_or(self.content.as_str())
	}

	pub fn display_author(&self) -> Option<&str> {
		non_empty(self.author_ko.as_deref()).or_else(|| non_empty(self.author.as_deref()))
	}

	pub fn candidate_type(&self, category: CorpusCategory) -> CandidateType {
		self.kind
			.as_deref()
			.and_then(|kind| kind.parse().ok())
			.unwrap_or_else(|| category.default_type())
	}

	pub fn candidate_source(&self) -> CandidateSource {
		let source = self.source.as_ref();

		CandidateSource {
			author: self.display_author().map(str::to_string),
			title: source.and_then(|s| s.title.clone()),
			year: source.and_then(|s| s.year.as_ref()).and_then(year_text),
			url: None,
			category: source
				.and_then(|s| non_empty(s.category.as_deref()))
				.or_else(|| non_empty(self.category.as_deref()))
				.map(str::to_string),
			platform: source.and_then(|s| s.platform.clone()),
		}
	}
}

/// Lowercased views of one item, so keyword scans do not re-fold text per query.
#[derive(Debug, Clone, Default)]
pub struct FoldedText {
	pub content: String,
	pub keywords: Vec<String>,
	/// Content followed by the keywords.
	pub text: String,
	/// Content, keywords and author.
	pub haystack: String,
}
impl FoldedText {
	fn of(item: &CorpusItem) -> Self {
		let content = item.content.to_lowercase();
		let keywords: Vec<String> = item.keywords.iter().map(|k| k.to_lowercase()).collect();
		let text = format!("{content} {}", keywords.join(" "));
		let haystack =
			format!("{text} {}", item.author.as_deref().unwrap_or_default().to_lowercase());

		Self { content, keywords, text, haystack }
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorpusItemSource {
	#[serde(default)]
	pub title: Option<String>,
	/// Authored as either a string or a bare number.
	#[serde(default)]
	pub year: Option<Value>,
	#[serde(default)]
	pub category: Option<String>,
	#[serde(default)]
	pub platform: Option<String>,
}

pub struct CorpusCache {
	root: PathBuf,
	slots: RwLock<HashMap<CorpusCategory, Arc<Vec<CorpusItem>>>>,
}
impl CorpusCache {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into(), slots: RwLock::new(HashMap::new()) }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Returns the cached items, reading the file on first use.
	///
	/// A failed read yields an empty list and leaves the slot unset.
	pub async fn load(&self, category: CorpusCategory) -> Arc<Vec<CorpusItem>> {
		if let Some(items) = self.cached(category) {
			return items;
		}

		let path = self.root.join(category.file_name());

		match read_category(&path).await {
			Ok(items) => {
				info!(category = %category, count = items.len(), "Corpus category loaded.");

				let items = Arc::new(items);
				let mut slots = self.slots.write().unwrap_or_else(|err| err.into_inner());

				// Concurrent first loads may race here; the last writer wins.
				slots.insert(category, items.clone());

				items
			},
			Err(err) => {
				warn!(category = %category, error = %err, "Corpus category failed to load.");

				Arc::new(Vec::new())
			},
		}
	}

	/// Loads every category in order. Returns the total number of cached items.
	pub async fn preload_all(&self) -> usize {
		let mut total = 0;

		for category in CorpusCategory::ALL {
			total += self.load(category).await.len();
		}

		info!(total, "Corpus preload finished.");

		total
	}

	/// Item counts for the categories loaded so far.
	pub fn stats(&self) -> BTreeMap<String, usize> {
		let slots = self.slots.read().unwrap_or_else(|err| err.into_inner());

		slots.iter().map(|(category, items)| (category.as_str().to_string(), items.len())).collect()
	}

	fn cached(&self, category: CorpusCategory) -> Option<Arc<Vec<CorpusItem>>> {
		let slots = self.slots.read().unwrap_or_else(|err| err.into_inner());

		slots.get(&category).cloned()
	}
}

async fn read_category(path: &Path) -> Result<Vec<CorpusItem>> {
	let raw = tokio::fs::read_to_string(path).await.map_err(|err| Error::Corpus {
		message: format!("Failed to read {}: {err}.", path.display()),
	})?;

	let items: Vec<CorpusItem> = serde_json::from_str(&raw).map_err(|err| Error::Corpus {
		message: format!("Failed to parse {}: {err}.", path.display()),
	})?;

	for item in &items {
		item.folded();
	}

	Ok(items)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}

fn year_text(value: &Value) -> Option<String> {
	match value {
		Value::String(year) => non_empty(Some(year.as_str())).map(str::to_string),
		Value::Number(year) => Some(year.to_string()),
		_ => None,
	}
}
