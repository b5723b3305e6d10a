use idealink_config::SimilarityWeights;

use crate::text;

/// Terms whose presence in both texts counts as keyword co-occurrence.
pub const INTEREST_TERMS: &[&str] = &["성장", "습관", "실패", "성공", "친구", "배움", "노력"];

const COOCCURRENCE_STEP: f32 = 0.1;
const TAG_STEP: f32 = 0.1;

/// Lexical relevance between a note and one candidate's content, in `[0, 1]`.
pub fn similarity(
	weights: &SimilarityWeights,
	note_text: &str,
	note_tags: &[String],
	candidate_content: &str,
) -> f32 {
	let jaccard = jaccard(note_text, candidate_content);
	let cooccurrence = keyword_cooccurrence(note_text, candidate_content);
	let tag_match = tag_match(note_tags, candidate_content);
	let score = jaccard * weights.jaccard_weight
		+ cooccurrence * weights.cooccurrence_weight
		+ tag_match * weights.tag_weight;

	if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 }
}

/// Final relevance: the computed similarity, floored by any adapter-supplied score.
pub fn relevance(computed: f32, raw_score: Option<f32>) -> f32 {
	let floor = raw_score.filter(|score| score.is_finite()).unwrap_or(0.0);

	computed.max(floor).clamp(0.0, 1.0)
}

pub fn jaccard(a: &str, b: &str) -> f32 {
	let left = text::word_set(a);
	let right = text::word_set(b);
	let union = left.union(&right).count();

	if union == 0 {
		return 0.0;
	}

	left.intersection(&right).count() as f32 / union as f32
}

/// Raw increment per shared interest term. Not renormalized, so it can exceed 1.
pub fn keyword_cooccurrence(a: &str, b: &str) -> f32 {
	let a = a.to_lowercase();
	let b = b.to_lowercase();

	INTEREST_TERMS.iter().filter(|term| a.contains(**term) && b.contains(**term)).count() as f32
		* COOCCURRENCE_STEP
}

pub fn tag_match(tags: &[String], content: &str) -> f32 {
	tags.iter().filter(|tag| !tag.is_empty() && content.contains(tag.as_str())).count() as f32
		* TAG_STEP
}
