pub mod aggregate;
pub mod corpus;
pub mod placeholder;
pub mod search;
pub mod sources;

mod error;

pub use error::{Error, Result};
pub use search::{SearchRequest, SearchResponse};

use std::{collections::BTreeMap, future::Future, pin::Pin, sync::Arc};

use idealink_config::Config;
use idealink_domain::{Candidate, CandidateType};

use crate::{
	corpus::{CorpusCache, CorpusCategory},
	placeholder::PlaceholderScores,
	sources::{
		library::LibraryAdapter,
		local_quotes::{self, LocalQuotesAdapter},
		proverbs::{self, ProverbAdapter},
		remote::{self, GoogleBooksAdapter, QuotableAdapter, WikipediaAdapter},
	},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One knowledge source. Implementations return their own candidates in their own order.
pub trait SourceAdapter
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		keywords: &'a [String],
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<Candidate>>>;
}

/// A registered adapter with the candidate types it is routed for.
#[derive(Clone)]
pub struct SourceEntry {
	pub name: String,
	pub serves: Vec<CandidateType>,
	pub limit: usize,
	pub adapter: Arc<dyn SourceAdapter>,
}
impl SourceEntry {
	pub fn new(
		name: impl Into<String>,
		serves: &[CandidateType],
		limit: usize,
		adapter: Arc<dyn SourceAdapter>,
	) -> Self {
		Self { name: name.into(), serves: serves.to_vec(), limit, adapter }
	}

	/// An empty filter selects every source.
	pub fn serves_any(&self, filter: &[CandidateType]) -> bool {
		filter.is_empty() || filter.iter().any(|kind| self.serves.contains(kind))
	}
}

pub struct IdeaLinkService {
	pub cfg: Config,
	pub corpus: Arc<CorpusCache>,
	pub sources: Vec<SourceEntry>,
}
impl IdeaLinkService {
	/// Builds the service with every source enabled in `cfg`.
	pub fn new(cfg: Config) -> Result<Self> {
		let corpus = Arc::new(CorpusCache::new(cfg.corpus.root.clone()));
		let placeholder = PlaceholderScores::from_config(&cfg.placeholder);
		let sources = default_sources(&cfg, &corpus, placeholder)?;

		Ok(Self { cfg, corpus, sources })
	}

	pub fn with_sources(cfg: Config, corpus: Arc<CorpusCache>, sources: Vec<SourceEntry>) -> Self {
		Self { cfg, corpus, sources }
	}

	pub async fn preload_corpus(&self) -> usize {
		self.corpus.preload_all().await
	}

	pub fn corpus_stats(&self) -> BTreeMap<String, usize> {
		self.corpus.stats()
	}
}

pub fn default_sources(
	cfg: &Config,
	corpus: &Arc<CorpusCache>,
	placeholder: PlaceholderScores,
) -> Result<Vec<SourceEntry>> {
	use CandidateType::*;
	use CorpusCategory as Category;

	let library = |categories: &[CorpusCategory]| -> Arc<dyn SourceAdapter> {
		Arc::new(LibraryAdapter::new(corpus.clone(), categories))
	};
	// Registration order is the tie order of equally relevant results.
	let mut sources = Vec::new();

	if cfg.sources.library.enabled {
		sources.push(SourceEntry::new(
			"library.quotes",
			&[Quote, ScreenLine],
			20,
			library(&[
				Category::FamousQuote,
				Category::Movie,
				Category::Book,
				Category::Drama,
				Category::Animation,
			]),
		));
	}
	if cfg.sources.local_quotes.enabled {
		sources.push(SourceEntry::new(
			local_quotes::LOCAL_QUOTES_SOURCE,
			&[Quote],
			local_quotes::MAX_QUOTES,
			Arc::new(LocalQuotesAdapter::new(corpus.clone())),
		));
	}
	if cfg.sources.library.enabled {
		sources.push(SourceEntry::new(
			"library.academic",
			&[Academic, Essay, Web],
			15,
			library(&[Category::Academic, Category::Essay, Category::Web]),
		));
		sources.push(SourceEntry::new(
			"library.proverbs",
			&[Proverb, Poem],
			10,
			library(&[Category::Proverb, Category::Poem]),
		));
		sources.push(SourceEntry::new("library.books", &[Book], 10, library(&[Category::Book])));
	}
	if cfg.sources.proverbs.enabled {
		sources.push(SourceEntry::new(
			proverbs::PROVERB_SOURCE,
			&[Proverb],
			proverbs::MAX_MATCHES,
			Arc::new(ProverbAdapter::new(placeholder)),
		));
	}
	if cfg.sources.quotable.enabled {
		sources.push(SourceEntry::new(
			remote::QUOTABLE_SOURCE,
			&[Quote],
			3,
			Arc::new(QuotableAdapter::new(&cfg.sources.quotable, placeholder)?),
		));
	}
	if cfg.sources.wikipedia.enabled {
		sources.push(SourceEntry::new(
			remote::WIKIPEDIA_SOURCE,
			&[Academic, Essay, Web],
			idealink_providers::wikipedia::MAX_ENTRIES,
			Arc::new(WikipediaAdapter::new(&cfg.sources.wikipedia, placeholder)?),
		));
	}
	if cfg.sources.google_books.enabled {
		sources.push(SourceEntry::new(
			remote::GOOGLE_BOOKS_SOURCE,
			&[Book],
			idealink_providers::google_books::MAX_VOLUMES,
			Arc::new(GoogleBooksAdapter::new(&cfg.sources.google_books, placeholder)?),
		));
	}

	Ok(sources)
}
