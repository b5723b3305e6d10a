use std::sync::Arc;

use idealink_domain::Candidate;

use crate::{
	BoxFuture, Result, SourceAdapter,
	corpus::{CorpusCache, CorpusCategory, CorpusItem},
};

const EXACT_KEYWORD_SCORE: u32 = 3;
const CONTENT_SCORE: u32 = 2;
const TEXT_SCORE: u32 = 1;
const RAW_SCORE_SCALE: f32 = 10.0;

/// Keyword search over a fixed group of corpus categories.
pub struct LibraryAdapter {
	corpus: Arc<CorpusCache>,
	categories: Vec<CorpusCategory>,
}
impl LibraryAdapter {
	pub fn new(corpus: Arc<CorpusCache>, categories: &[CorpusCategory]) -> Self {
		Self { corpus, categories: categories.to_vec() }
	}

	async fn search_inner(&self, keywords: &[String], limit: usize) -> Vec<Candidate> {
		if keywords.is_empty() || self.categories.is_empty() || limit == 0 {
			return Vec::new();
		}

		let lowered: Vec<String> = keywords.iter().map(|keyword| keyword.to_lowercase()).collect();
		let per_category = limit.div_ceil(self.categories.len());
		let mut picked: Vec<(u32, Candidate)> = Vec::new();

		for &category in &self.categories {
			let items = self.corpus.load(category).await;
			let mut scored: Vec<(u32, &CorpusItem)> = items
				.iter()
				.filter(|item| matches_any(item, &lowered))
				.map(|item| (score_item(item, &lowered), item))
				.collect();

			scored.sort_by(|a, b| b.0.cmp(&a.0));
			picked.extend(
				scored
					.into_iter()
					.take(per_category)
					.map(|(score, item)| (score, to_candidate(item, category, score, keywords))),
			);

			// Lets sibling sources and the aggregator timeout run between category scans.
			tokio::task::yield_now().await;
		}

		picked.sort_by(|a, b| b.0.cmp(&a.0));
		picked.truncate(limit);

		picked.into_iter().map(|(_, candidate)| candidate).collect()
	}
}
impl SourceAdapter for LibraryAdapter {
	fn search<'a>(
		&'a self,
		keywords: &'a [String],
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(async move { Ok(self.search_inner(keywords, limit).await) })
	}
}

/// `3` per exact keyword, `2` per content hit and `1` per hit anywhere in content plus keywords.
pub fn score_item(item: &CorpusItem, lowered_keywords: &[String]) -> u32 {
	let folded = item.folded();

	lowered_keywords
		.iter()
		.map(|keyword| {
			let mut score = 0;

			if folded.keywords.iter().any(|k| k == keyword) {
				score += EXACT_KEYWORD_SCORE;
			}
			if folded.content.contains(keyword.as_str()) {
				score += CONTENT_SCORE;
			}
			if folded.text.contains(keyword.as_str()) {
				score += TEXT_SCORE;
			}

			score
		})
		.sum()
}

fn matches_any(item: &CorpusItem, lowered_keywords: &[String]) -> bool {
	let haystack = &item.folded().haystack;

	lowered_keywords.iter().any(|keyword| haystack.contains(keyword.as_str()))
}

fn to_candidate(
	item: &CorpusItem,
	category: CorpusCategory,
	score: u32,
	keywords: &[String],
) -> Candidate {
	let raw_score = f32::min(score as f32 / RAW_SCORE_SCALE, 1.0);

	Candidate::new(item.candidate_type(category), item.display_content())
		.with_source(item.candidate_source())
		.with_raw_score(raw_score)
		.with_reasoning(reasoning(item, keywords))
}

fn reasoning(item: &CorpusItem, keywords: &[String]) -> String {
	let matched: Vec<&str> = keywords
		.iter()
		.filter(|keyword| {
			let keyword = keyword.to_lowercase();

			item.folded().keywords.iter().any(|k| k.contains(keyword.as_str()))
		})
		.map(String::as_str)
		.collect();

	if matched.is_empty() {
		return "내용이 유사합니다.".to_string();
	}

	format!("\"{}\" 키워드가 관련되어 있습니다.", matched.join("\", \""))
}
