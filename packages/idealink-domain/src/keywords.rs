//! Topic keyword extraction from note text and tags.
//!
//! Keywords come from a fixed table of concept clusters. Each cluster is named by its keyword and
//! lists the trigger words that activate it. Notes that activate no cluster fall back to plain
//! whitespace tokens.

use std::{collections::HashSet, ops::RangeInclusive};

use crate::text;

pub const MAX_CLUSTER_KEYWORDS: usize = 3;
pub const MAX_TAG_KEYWORDS: usize = 2;
pub const MAX_FALLBACK_TOKENS: usize = 3;
pub const FALLBACK_TOKEN_LEN: RangeInclusive<usize> = 2..=10;

const TRIGGER_SCORE: u32 = 2;

#[derive(Debug, Clone, Copy)]
pub struct ConceptCluster {
	pub keyword: &'static str,
	pub triggers: &'static [&'static str],
}

/// Declaration order doubles as the tie-breaker between equally scored clusters.
pub const CONCEPT_CLUSTERS: &[ConceptCluster] = &[
	ConceptCluster {
		keyword: "성장",
		triggers: &["성장", "발전", "진보", "개선", "향상", "나아가"],
	},
	ConceptCluster { keyword: "습관", triggers: &["습관", "반복", "루틴", "매일"] },
	ConceptCluster { keyword: "실패", triggers: &["실패", "좌절", "어려움", "넘어지", "실수"] },
	ConceptCluster { keyword: "성공", triggers: &["성공", "달성", "이루", "이룬", "목표"] },
	ConceptCluster { keyword: "친구", triggers: &["친구", "우정", "동료", "관계"] },
	ConceptCluster { keyword: "배움", triggers: &["배우", "학습", "공부", "지식", "배움"] },
	ConceptCluster { keyword: "노력", triggers: &["노력", "시도", "도전", "과감", "용기"] },
	ConceptCluster { keyword: "변화", triggers: &["변화", "바꾸", "달라지", "전환"] },
	ConceptCluster { keyword: "행복", triggers: &["행복", "기쁨", "즐거", "만족"] },
	ConceptCluster { keyword: "사랑", triggers: &["사랑", "애정", "정"] },
	ConceptCluster { keyword: "자유", triggers: &["자유", "해방", "독립"] },
	ConceptCluster { keyword: "창의", triggers: &["창의", "창조", "독창"] },
	ConceptCluster { keyword: "지혜", triggers: &["지혜", "현명", "슬기"] },
	ConceptCluster { keyword: "꿈", triggers: &["꿈", "희망", "바람", "소망"] },
	ConceptCluster { keyword: "용기", triggers: &["용기", "담대", "과감", "두려움"] },
];

pub fn extract_keywords(note_text: &str, tags: &[String]) -> Vec<String> {
	extract_keywords_with(CONCEPT_CLUSTERS, note_text, tags)
}

pub fn extract_keywords_with(
	clusters: &[ConceptCluster],
	note_text: &str,
	tags: &[String],
) -> Vec<String> {
	let normalized = text::normalize(note_text);
	let mut scored: Vec<(&'static str, u32)> = clusters
		.iter()
		.filter_map(|cluster| {
			let score = cluster_score(cluster, &normalized);

			(score > 0).then_some((cluster.keyword, score))
		})
		.collect();

	// Stable, so equal scores keep declaration order.
	scored.sort_by(|a, b| b.1.cmp(&a.1));

	let mut keywords: Vec<String> = scored
		.into_iter()
		.take(MAX_CLUSTER_KEYWORDS)
		.map(|(keyword, _)| keyword.to_string())
		.collect();

	if keywords.is_empty() {
		keywords = fallback_tokens(note_text);
	}

	keywords.extend(
		tags.iter()
			.map(|tag| tag.trim())
			.filter(|tag| !tag.is_empty())
			.take(MAX_TAG_KEYWORDS)
			.map(str::to_string),
	);

	dedup_preserving_order(keywords)
}

/// Scores a cluster against already-normalized text.
pub fn cluster_score(cluster: &ConceptCluster, normalized: &str) -> u32 {
	let mut seen = HashSet::new();

	cluster
		.triggers
		.iter()
		.filter(|trigger| seen.insert(**trigger) && normalized.contains(**trigger))
		.count() as u32
		* TRIGGER_SCORE
}

fn fallback_tokens(note_text: &str) -> Vec<String> {
	note_text
		.split_whitespace()
		.filter(|token| FALLBACK_TOKEN_LEN.contains(&text::grapheme_len(token)))
		.take(MAX_FALLBACK_TOKENS)
		.map(str::to_string)
		.collect()
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
	let mut seen = HashSet::new();

	items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
