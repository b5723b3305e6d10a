use std::{cmp::Ordering, collections::HashSet};

use crate::candidate::{Candidate, ScoredCandidate};

const ATTRIBUTION_SEPARATOR: &str = " - ";

/// Content with any trailing `" - <attribution>"` suffix removed, trimmed.
pub fn dedup_key(content: &str) -> &str {
	let trimmed = content.trim();

	match trimmed.rsplit_once(ATTRIBUTION_SEPARATOR) {
		Some((body, _)) if !body.trim().is_empty() => body.trim(),
		_ => trimmed,
	}
}

/// Drops blank candidates and repeated dedup keys. The first occurrence wins.
pub fn dedup(candidates: Vec<Candidate>) -> Vec<Candidate> {
	let mut seen = HashSet::new();

	candidates
		.into_iter()
		.filter(|candidate| {
			let key = dedup_key(&candidate.content);

			!key.is_empty() && seen.insert(key.to_string())
		})
		.collect()
}

/// Applies the relevance floor, sorts best first and caps to `limit`.
///
/// The sort is stable, so equal relevance keeps arrival order.
pub fn rank(mut scored: Vec<ScoredCandidate>, floor: f32, limit: usize) -> Vec<ScoredCandidate> {
	scored.retain(|candidate| candidate.relevance >= floor);
	scored.sort_by(|a, b| b.relevance.partial_cmp(&a.relevance).unwrap_or(Ordering::Equal));
	scored.truncate(limit);

	scored
}

/// Whether a ranked result counts as a match. An empty or all-below-floor list does not.
pub fn validate(ranked: &[ScoredCandidate], floor: f32) -> bool {
	ranked.iter().any(|candidate| candidate.relevance >= floor)
}

#[cfg(test)]
mod tests {
	use uuid::Uuid;

	use super::*;
	use crate::candidate::CandidateType;

	fn scored(content: &str, relevance: f32) -> ScoredCandidate {
		ScoredCandidate::from_candidate(
			Uuid::nil(),
			Candidate::new(CandidateType::Quote, content),
			relevance,
		)
	}

	fn contents(items: &[ScoredCandidate]) -> Vec<&str> {
		items.iter().map(|item| item.content.as_str()).collect()
	}

	#[test]
	fn dedup_key_strips_attribution_suffix() {
		assert_eq!(dedup_key("Stay hungry - Steve Jobs"), "Stay hungry");
		assert_eq!(dedup_key("  Stay hungry  "), "Stay hungry");
		assert_eq!(dedup_key("A - B - C"), "A - B");
		assert_eq!(dedup_key(" - orphan"), "- orphan");
	}

	#[test]
	fn dedup_keeps_first_arrival() {
		let first = Candidate::new(CandidateType::Quote, "Stay hungry - Steve Jobs")
			.with_reasoning("first");
		let second = Candidate::new(CandidateType::Quote, "Stay hungry").with_reasoning("second");
		let kept = dedup(vec![first, second]);

		assert_eq!(kept.len(), 1);
		assert_eq!(kept[0].reasoning, "first");
	}

	#[test]
	fn dedup_drops_blank_content() {
		let kept = dedup(vec![
			Candidate::new(CandidateType::Web, "   "),
			Candidate::new(CandidateType::Web, "real"),
		]);

		assert_eq!(kept.len(), 1);
	}

	#[test]
	fn rank_filters_sorts_and_caps() {
		let ranked = rank(
			vec![
				scored("low", 0.29),
				scored("b", 0.5),
				scored("a", 0.9),
				scored("c", 0.5),
				scored("d", 0.3),
			],
			0.3,
			3,
		);

		assert_eq!(contents(&ranked), vec!["a", "b", "c"]);
	}

	#[test]
	fn floor_is_inclusive() {
		let ranked = rank(vec![scored("edge", 0.3)], 0.3, 10);

		assert_eq!(ranked.len(), 1);
		assert!(validate(&ranked, 0.3));
	}

	#[test]
	fn empty_result_is_not_valid() {
		assert!(!validate(&[], 0.3));
		assert!(!validate(&[scored("weak", 0.1)], 0.3));
	}
}
