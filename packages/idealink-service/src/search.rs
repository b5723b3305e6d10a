use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use idealink_domain::{
	CandidateType, Note, ScoredCandidate,
	keywords::extract_keywords,
	quality::{self, QualityInput},
	ranking, similarity,
};

use crate::{Error, IdeaLinkService, Result, aggregate};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
	pub note_text: String,
	#[serde(default)]
	pub tags: Vec<String>,
	/// Candidate type names. Empty means every source.
	#[serde(default)]
	pub type_filter: Vec<String>,
	#[serde(default)]
	pub note_id: Option<Uuid>,
	/// Can only lower the configured limit.
	#[serde(default)]
	pub limit: Option<u32>,
	/// Overrides `search.quality_filter` when present.
	#[serde(default)]
	pub quality_filter: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	pub note_id: Uuid,
	pub keywords: Vec<String>,
	/// False when nothing cleared the relevance floor.
	pub validated: bool,
	pub items: Vec<ScoredCandidate>,
}

impl IdeaLinkService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let type_filter = parse_type_filter(&req.type_filter)?;
		let limit = self.effective_limit(req.limit)?;
		let note = Note::with_id(req.note_id.unwrap_or_else(Uuid::new_v4), req.note_text, req.tags);
		let keywords = extract_keywords(&note.text, &note.tags);

		if keywords.is_empty() {
			debug!(note_id = %note.id, "No keywords extracted; skipping source lookup.");

			return Ok(SearchResponse {
				note_id: note.id,
				keywords,
				validated: false,
				items: Vec::new(),
			});
		}

		let timeout = Duration::from_millis(self.cfg.search.adapter_timeout_ms);
		let candidates = aggregate::gather(&self.sources, &type_filter, &keywords, timeout).await;
		let gathered = candidates.len();
		let candidates = ranking::dedup(candidates);
		let floor = self.cfg.search.relevance_floor;
		let weights = &self.cfg.scoring.similarity;
		let mut scored: Vec<ScoredCandidate> = candidates
			.into_iter()
			.map(|candidate| {
				let computed =
					similarity::similarity(weights, &note.text, &note.tags, &candidate.content);
				let relevance = similarity::relevance(computed, candidate.raw_score);

				ScoredCandidate::from_candidate(note.id, candidate, relevance)
			})
			.filter(|candidate| candidate.relevance >= floor)
			.collect();

		if req.quality_filter.unwrap_or(self.cfg.search.quality_filter) {
			scored = self.apply_quality_gate(&note, &keywords, scored);
		}

		let items = ranking::rank(scored, floor, limit);
		let validated = ranking::validate(&items, floor);

		debug!(
			note_id = %note.id,
			gathered,
			returned = items.len(),
			validated,
			"Search finished."
		);

		Ok(SearchResponse { note_id: note.id, keywords, validated, items })
	}

	fn effective_limit(&self, requested: Option<u32>) -> Result<usize> {
		let configured = self.cfg.search.limit;

		match requested {
			Some(0) => Err(Error::InvalidRequest {
				message: "limit must be greater than zero.".to_string(),
			}),
			Some(limit) => Ok(limit.min(configured) as usize),
			None => Ok(configured as usize),
		}
	}

	fn apply_quality_gate(
		&self,
		note: &Note,
		keywords: &[String],
		scored: Vec<ScoredCandidate>,
	) -> Vec<ScoredCandidate> {
		let policy = &self.cfg.scoring.quality;

		scored
			.into_iter()
			.filter_map(|mut candidate| {
				let evaluation = quality::evaluate(
					policy,
					QualityInput {
						note_text: &note.text,
						note_keywords: keywords,
						candidate_content: &candidate.content,
						reasoning: &candidate.reasoning,
					},
				);

				candidate.quality_scores = Some(evaluation.scores);

				evaluation.passing.then_some(candidate)
			})
			.collect()
	}
}

fn parse_type_filter(raw: &[String]) -> Result<Vec<CandidateType>> {
	let mut kinds = Vec::with_capacity(raw.len());

	for name in raw {
		let kind: CandidateType = name.parse()?;

		if !kinds.contains(&kind) {
			kinds.push(kind);
		}
	}

	Ok(kinds)
}
