use reqwest::Client;

use idealink_config::RemoteSourceConfig;
use idealink_domain::{Candidate, CandidateSource, CandidateType};
use idealink_providers::{
	google_books::{self, Volume},
	quotable::{self, Quote},
	wikipedia::{self, Entry},
};

use crate::{
	BoxFuture, Result, SourceAdapter,
	placeholder::{GOOGLE_BOOKS_BAND, PlaceholderScores, QUOTABLE_BAND, WIKIPEDIA_BAND},
};

pub const QUOTABLE_SOURCE: &str = "remote.quotable";
pub const WIKIPEDIA_SOURCE: &str = "remote.wikipedia";
pub const GOOGLE_BOOKS_SOURCE: &str = "remote.google_books";

const QUOTE_CATEGORY: &str = "위인 명언";
const ENCYCLOPEDIA_AUTHOR: &str = "Wikipedia";
const ENCYCLOPEDIA_CATEGORY: &str = "백과사전";
const BOOK_PLATFORM: &str = "Google Books";
const BOOK_CATEGORY: &str = "도서";
const UNKNOWN_AUTHOR: &str = "저자 미상";

/// Shared state of every remote adapter: one client and the source's base URL.
struct Remote {
	client: Client,
	api_base: String,
	placeholder: PlaceholderScores,
}
impl Remote {
	fn new(cfg: &RemoteSourceConfig, placeholder: PlaceholderScores) -> Result<Self> {
		Ok(Self { client: idealink_providers::client(cfg)?, api_base: cfg.api_base.clone(), placeholder })
	}
}

pub struct QuotableAdapter(Remote);
impl QuotableAdapter {
	pub fn new(cfg: &RemoteSourceConfig, placeholder: PlaceholderScores) -> Result<Self> {
		Ok(Self(Remote::new(cfg, placeholder)?))
	}

	async fn search_inner(&self, keywords: &[String], limit: usize) -> Result<Vec<Candidate>> {
		let quotes = quotable::random_quotes(&self.0.client, &self.0.api_base, keywords).await?;
		let joined = keywords.join(", ");
		let mut draw = self.0.placeholder.draw(QUOTABLE_SOURCE, keywords);

		Ok(quotes
			.into_iter()
			.take(limit)
			.map(|quote| quote_candidate(quote, &joined, draw.sample(QUOTABLE_BAND)))
			.collect())
	}
}
impl SourceAdapter for QuotableAdapter {
	fn search<'a>(
		&'a self,
		keywords: &'a [String],
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(self.search_inner(keywords, limit))
	}
}

pub struct WikipediaAdapter(Remote);
impl WikipediaAdapter {
	pub fn new(cfg: &RemoteSourceConfig, placeholder: PlaceholderScores) -> Result<Self> {
		Ok(Self(Remote::new(cfg, placeholder)?))
	}

	async fn search_inner(&self, keywords: &[String], limit: usize) -> Result<Vec<Candidate>> {
		if keywords.is_empty() {
			return Ok(Vec::new());
		}

		let entries = wikipedia::opensearch(&self.0.client, &self.0.api_base, keywords).await?;
		let joined = keywords.join(", ");
		let year = time::OffsetDateTime::now_utc().year().to_string();
		let mut draw = self.0.placeholder.draw(WIKIPEDIA_SOURCE, keywords);

		Ok(entries
			.into_iter()
			.take(limit)
			.map(|entry| entry_candidate(entry, &joined, &year, draw.sample(WIKIPEDIA_BAND)))
			.collect())
	}
}
impl SourceAdapter for WikipediaAdapter {
	fn search<'a>(
		&'a self,
		keywords: &'a [String],
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(self.search_inner(keywords, limit))
	}
}

pub struct GoogleBooksAdapter(Remote);
impl GoogleBooksAdapter {
	pub fn new(cfg: &RemoteSourceConfig, placeholder: PlaceholderScores) -> Result<Self> {
		Ok(Self(Remote::new(cfg, placeholder)?))
	}

	async fn search_inner(&self, keywords: &[String], limit: usize) -> Result<Vec<Candidate>> {
		if keywords.is_empty() {
			return Ok(Vec::new());
		}

		let volumes = google_books::volumes(&self.0.client, &self.0.api_base, keywords).await?;
		let joined = keywords.join(", ");
		let mut draw = self.0.placeholder.draw(GOOGLE_BOOKS_SOURCE, keywords);

		Ok(volumes
			.into_iter()
			.take(limit)
			.map(|volume| volume_candidate(volume, &joined, draw.sample(GOOGLE_BOOKS_BAND)))
			.collect())
	}
}
impl SourceAdapter for GoogleBooksAdapter {
	fn search<'a>(
		&'a self,
		keywords: &'a [String],
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(self.search_inner(keywords, limit))
	}
}

fn quote_candidate(quote: Quote, joined_keywords: &str, score: f32) -> Candidate {
	let reasoning = match quote.author.as_deref() {
		Some(author) => format!(
			"\"{joined_keywords}\"와 관련된 명언입니다. {author}의 지혜를 통해 새로운 관점을 얻을 수 있습니다."
		),
		None => format!("\"{joined_keywords}\"와 관련된 명언입니다."),
	};

	Candidate::new(CandidateType::Quote, quote.content)
		.with_source(CandidateSource {
			author: quote.author,
			category: Some(QUOTE_CATEGORY.to_string()),
			..Default::default()
		})
		.with_raw_score(score)
		.with_reasoning(reasoning)
}

fn entry_candidate(entry: Entry, joined_keywords: &str, year: &str, score: f32) -> Candidate {
	Candidate::new(CandidateType::Academic, entry.description)
		.with_source(CandidateSource {
			author: Some(ENCYCLOPEDIA_AUTHOR.to_string()),
			title: Some(entry.title),
			year: Some(year.to_string()),
			url: entry.url,
			category: Some(ENCYCLOPEDIA_CATEGORY.to_string()),
			platform: Some(ENCYCLOPEDIA_AUTHOR.to_string()),
		})
		.with_raw_score(score)
		.with_reasoning(format!(
			"\"{joined_keywords}\"와 관련된 백과사전 정보입니다. 체계적인 지식을 제공합니다."
		))
}

fn volume_candidate(volume: Volume, joined_keywords: &str, score: f32) -> Candidate {
	let author =
		if volume.authors.is_empty() { UNKNOWN_AUTHOR.to_string() } else { volume.authors.join(", ") };

	Candidate::new(CandidateType::Book, volume.excerpt)
		.with_source(CandidateSource {
			author: Some(author),
			title: volume.title,
			year: volume.year,
			url: volume.info_link,
			category: Some(volume.category.unwrap_or_else(|| BOOK_CATEGORY.to_string())),
			platform: Some(BOOK_PLATFORM.to_string()),
		})
		.with_raw_score(score)
		.with_reasoning(format!(
			"\"{joined_keywords}\"와 관련된 책입니다. 더 깊이 있는 내용을 탐구할 수 있습니다."
		))
}
