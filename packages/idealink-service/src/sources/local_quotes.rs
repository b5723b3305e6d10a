//! Standalone quote files kept beside the library: `quotes.json` (English) and
//! `korean-quotes.json`.

use std::{cmp::Ordering, sync::Arc};

use idealink_domain::{Candidate, CandidateSource, CandidateType};

use crate::{
	BoxFuture, Result, SourceAdapter,
	corpus::{CorpusCache, CorpusCategory, CorpusItem},
};

pub const LOCAL_QUOTES_SOURCE: &str = "local.quotes";
pub const MAX_QUOTES: usize = 5;
pub const PLATFORM: &str = "로컬 데이터베이스";

const BASE_SCORE: f32 = 0.6;
const PER_MATCH: f32 = 0.1;
const MAX_SCORE: f32 = 0.95;
const FILES: [CorpusCategory; 2] = [CorpusCategory::Quotes, CorpusCategory::KoreanQuotes];

pub struct LocalQuotesAdapter {
	corpus: Arc<CorpusCache>,
}
impl LocalQuotesAdapter {
	pub fn new(corpus: Arc<CorpusCache>) -> Self {
		Self { corpus }
	}

	async fn search_inner(&self, keywords: &[String], limit: usize) -> Vec<Candidate> {
		let lowered: Vec<String> = keywords.iter().map(|keyword| keyword.to_lowercase()).collect();
		let joined = keywords.join(", ");
		let mut scored: Vec<(f32, Candidate)> = Vec::new();

		for category in FILES {
			let items = self.corpus.load(category).await;

			scored.extend(items.iter().filter_map(|item| {
				let matches = exact_matches(item, &lowered);

				(matches > 0).then(|| {
					let score = score(matches);

					(score, to_candidate(item, category, score, &joined))
				})
			}));
		}

		// Stable, so English quotes stay ahead of Korean ones on equal scores.
		scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

		scored.into_iter().take(limit.min(MAX_QUOTES)).map(|(_, candidate)| candidate).collect()
	}
}
impl SourceAdapter for LocalQuotesAdapter {
	fn search<'a>(
		&'a self,
		keywords: &'a [String],
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(async move { Ok(self.search_inner(keywords, limit).await) })
	}
}

/// Query keywords found verbatim in the item's keyword list.
pub fn exact_matches(item: &CorpusItem, lowered_keywords: &[String]) -> usize {
	let own = &item.folded().keywords;

	lowered_keywords.iter().filter(|keyword| own.contains(keyword)).count()
}

pub fn score(matches: usize) -> f32 {
	f32::min(BASE_SCORE + PER_MATCH * matches as f32, MAX_SCORE)
}

fn to_candidate(
	item: &CorpusItem,
	category: CorpusCategory,
	score: f32,
	joined_keywords: &str,
) -> Candidate {
	let language = match item.language.as_deref() {
		Some("ko") => "한국어",
		_ => "영어",
	};
	let source = item.candidate_source();
	let reasoning = match source.author.as_deref() {
		Some(author) => format!(
			"\"{joined_keywords}\"와 관련된 {language} 명언입니다. {author}의 통찰을 통해 새로운 관점을 얻을 수 있습니다."
		),
		None => format!("\"{joined_keywords}\"와 관련된 {language} 명언입니다."),
	};

	Candidate::new(item.candidate_type(category), item.content.as_str())
		.with_source(CandidateSource {
			author: source.author,
			category: source.category,
			platform: Some(PLATFORM.to_string()),
			..Default::default()
		})
		.with_raw_score(score)
		.with_reasoning(reasoning)
}
