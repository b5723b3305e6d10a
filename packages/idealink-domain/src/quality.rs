//! Rule-based conceptual quality of a note/candidate pairing.
//!
//! The similarity scorer rewards shared words. This evaluator instead asks whether the note and
//! the candidate share *concepts*: dialectical or paradoxical framing, the same concept clusters,
//! and insight vocabulary rather than generic advice. It is layered on top of the relevance floor
//! as an optional stricter gate.

use std::cmp::Ordering;

use idealink_config::QualityPolicy;
use serde::{Deserialize, Serialize};

use crate::{candidate::QualityScores, text};

#[derive(Debug, Clone, Copy)]
pub struct ConceptPattern {
	pub name: &'static str,
	pub keywords: &'static [&'static str],
	pub related: &'static [&'static str],
}
impl ConceptPattern {
	fn matches(&self, normalized: &str) -> bool {
		text::contains_any(normalized, self.keywords) || text::contains_any(normalized, self.related)
	}
}

pub const DIALECTICAL: ConceptPattern = ConceptPattern {
	name: "dialectical",
	keywords: &["모순", "대립", "통합", "합", "정반합", "갈등", "조화", "양면", "대비", "상반"],
	related: &["역설", "이율배반", "딜레마", "양가감정", "반대", "반전", "뒤집"],
};
pub const PARADOXICAL: ConceptPattern = ConceptPattern {
	name: "paradoxical",
	keywords: &["역설", "반대", "뒤집", "반전", "아이러니", "모순", "거꾸로", "반면"],
	related: &["예상밖", "의외", "놀라움", "전환", "오히려", "도리어"],
};
pub const EXPANSION: ConceptPattern = ConceptPattern {
	name: "expansion",
	keywords: &["확장", "성장", "발전", "넓어", "커지", "진화", "발달", "나아", "도약"],
	related: &["변화", "전환", "성숙", "깨달음", "앞으로", "높아", "자기계발"],
};
pub const UNDERSTANDING: ConceptPattern = ConceptPattern {
	name: "understanding",
	keywords: &["이해", "깨달", "통찰", "인식", "자각", "지혜", "앎", "알", "알다", "깨닫", "배우"],
	related: &["배움", "학습", "경험", "성찰", "사고", "생각", "이치", "터득"],
};
pub const DEEP_THINKING: ConceptPattern = ConceptPattern {
	name: "deep_thinking",
	keywords: &["본질", "근본", "심층", "깊이", "원리", "진리", "철학", "의미", "가치"],
	related: &["사색", "성찰", "명상", "숙고", "탐구", "본래", "참된"],
};
pub const CHANGE: ConceptPattern = ConceptPattern {
	name: "change",
	keywords: &["변화", "바뀌", "달라", "변하", "움직", "흐름", "흐르", "멈춤", "정체"],
	related: &["유동", "고정", "고착", "정지", "멈추", "계속", "지속"],
};
pub const FAILURE_SUCCESS: ConceptPattern = ConceptPattern {
	name: "failure_success",
	keywords: &["실패", "성공", "넘어", "일어", "포기", "도전", "실수", "잘못"],
	related: &["좌절", "극복", "재도전", "시행착오", "경험", "배움"],
};

/// Every cluster consulted for semantic relevance.
pub const CONCEPT_CATALOG: &[ConceptPattern] =
	&[DIALECTICAL, PARADOXICAL, EXPANSION, UNDERSTANDING, DEEP_THINKING, CHANGE, FAILURE_SUCCESS];

const PERSPECTIVE_WORDS: &[&str] = &["관점", "시각", "각도", "측면", "면", "입장"];
const CAUSAL_WORDS: &[&str] = &["때문", "결과", "원인", "이유", "영향"];
const ABSTRACT_WORDS: &[&str] = &["본질", "원리", "법칙", "진리", "의미", "가치"];
const GENERIC_PHRASES: &[&str] = &["중요하다", "필요하다", "해야 한다", "하자"];

const HIGH_QUALITY: f32 = 0.6;
const MEDIUM_QUALITY: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBracket {
	High,
	Medium,
	Low,
}
impl QualityBracket {
	pub fn from_overall(overall: f32) -> Self {
		if overall >= HIGH_QUALITY {
			Self::High
		} else if overall >= MEDIUM_QUALITY {
			Self::Medium
		} else {
			Self::Low
		}
	}

	pub fn explanation(self) -> &'static str {
		match self {
			Self::High => "높은 품질: 개념적으로 깊이 있고 의미적으로 연관성이 높습니다.",
			Self::Medium => "중간 품질: 어느 정도 연관성이 있지만 더 깊은 통찰이 필요합니다.",
			Self::Low => "낮은 품질: 단순 키워드 매칭 수준이거나 맥락이 맞지 않습니다.",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityEvaluation {
	pub scores: QualityScores,
	pub passing: bool,
	pub bracket: QualityBracket,
	pub explanation: &'static str,
}

/// Input for one evaluation. `reasoning` is the candidate's justification text.
#[derive(Debug, Clone, Copy)]
pub struct QualityInput<'a> {
	pub note_text: &'a str,
	pub note_keywords: &'a [String],
	pub candidate_content: &'a str,
	pub reasoning: &'a str,
}

pub fn evaluate(policy: &QualityPolicy, input: QualityInput<'_>) -> QualityEvaluation {
	let note = text::normalize(input.note_text);
	let candidate = text::normalize(input.candidate_content);
	let reasoning = text::normalize(input.reasoning);
	let conceptual_depth = conceptual_depth(&note, &candidate);
	let semantic_relevance = semantic_relevance(&note, &candidate, input.note_keywords);
	let insightfulness = insightfulness(&candidate, &reasoning);
	let overall = conceptual_depth * policy.depth_weight
		+ semantic_relevance * policy.semantic_weight
		+ insightfulness * policy.insight_weight;
	let passing = overall >= policy.pass_overall && semantic_relevance >= policy.pass_semantic;
	let bracket = QualityBracket::from_overall(overall);

	QualityEvaluation {
		scores: QualityScores { conceptual_depth, semantic_relevance, insightfulness, overall },
		passing,
		bracket,
		explanation: bracket.explanation(),
	}
}

/// Evaluates a batch, keeps those at or above `min_overall`, best first. Ties keep input order.
pub fn rank_by_quality<'a, T>(
	policy: &QualityPolicy,
	items: impl IntoIterator<Item = (T, QualityInput<'a>)>,
	min_overall: f32,
) -> Vec<(T, QualityEvaluation)> {
	let mut out: Vec<(T, QualityEvaluation)> = items
		.into_iter()
		.map(|(item, input)| (item, evaluate(policy, input)))
		.filter(|(_, evaluation)| evaluation.scores.overall >= min_overall)
		.collect();

	out.sort_by(|a, b| {
		b.1.scores.overall.partial_cmp(&a.1.scores.overall).unwrap_or(Ordering::Equal)
	});

	out
}

/// Both arguments must already be normalized.
pub fn conceptual_depth(note: &str, candidate: &str) -> f32 {
	let mut score = 0.0;

	score += shared_pattern_credit(&DIALECTICAL, note, candidate, 0.4, 0.2);
	score += shared_pattern_credit(&PARADOXICAL, note, candidate, 0.4, 0.15);

	if text::contains_any(candidate, DEEP_THINKING.keywords) {
		score += 0.2;
	}

	f32::min(score, 1.0)
}

/// Both texts must already be normalized.
pub fn semantic_relevance(note: &str, candidate: &str, note_keywords: &[String]) -> f32 {
	let mut score = 0.0;
	let mut active = 0_usize;
	let mut shared = 0_usize;

	for pattern in CONCEPT_CATALOG {
		if !pattern.matches(note) {
			continue;
		}

		active += 1;

		if pattern.matches(candidate) {
			shared += 1;
		}
	}

	if active > 0 {
		score += shared as f32 / active as f32 * 0.6;
	}
	if !note_keywords.is_empty() {
		let matched = note_keywords
			.iter()
			.filter(|keyword| candidate.contains(keyword.to_lowercase().as_str()))
			.count();

		score += f32::min(matched as f32 / note_keywords.len() as f32 * 0.4, 0.4);
	}

	score.clamp(0.0, 1.0)
}

/// Both texts must already be normalized.
pub fn insightfulness(candidate: &str, reasoning: &str) -> f32 {
	let mut score: f32 = 0.0;
	let in_either = |words: &[&str]| {
		text::contains_any(candidate, words) || text::contains_any(reasoning, words)
	};

	if in_either(PERSPECTIVE_WORDS) {
		score += 0.4;
	}
	if in_either(CAUSAL_WORDS) {
		score += 0.3;
	}
	if text::contains_any(candidate, ABSTRACT_WORDS) {
		score += 0.3;
	}
	if text::contains_any(candidate, GENERIC_PHRASES) {
		score -= 0.4;
	}

	score.clamp(0.0, 1.0)
}

fn shared_pattern_credit(
	pattern: &ConceptPattern,
	note: &str,
	candidate: &str,
	both: f32,
	one: f32,
) -> f32 {
	let words = pattern.keywords.iter().chain(pattern.related.iter());
	let note_has = words.clone().any(|word| note.contains(*word));
	let candidate_has = words.into_iter().any(|word| candidate.contains(*word));

	match (note_has, candidate_has) {
		(true, true) => both,
		(true, false) | (false, true) => one,
		(false, false) => 0.0,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn policy() -> QualityPolicy {
		QualityPolicy::default()
	}

	fn keywords(values: &[&str]) -> Vec<String> {
		values.iter().map(|value| value.to_string()).collect()
	}

	#[test]
	fn both_sides_dialectical_and_paradoxical_earn_full_credit() {
		let note = "모순 속의 역설을 생각한다";
		let both = conceptual_depth(note, "대립과 아이러니");
		let one = conceptual_depth(note, "대립이 있다");

		assert!((both - 0.8).abs() < 1e-6, "both = {both}");
		assert!(both >= one);
	}

	#[test]
	fn deep_thinking_vocabulary_in_candidate_adds_bonus() {
		assert!((conceptual_depth("평범한 하루", "삶의 본질") - 0.2).abs() < 1e-6);
	}

	#[test]
	fn semantic_relevance_counts_echoed_clusters() {
		// Note activates expansion and change; candidate echoes only expansion.
		let score = semantic_relevance("성장과 변화", "꾸준한 발전", &[]);

		assert!((score - 0.3).abs() < 1e-6, "score = {score}");
	}

	#[test]
	fn semantic_relevance_adds_keyword_bonus() {
		let score = semantic_relevance("오늘의 기록", "기록은 힘이다", &keywords(&["기록", "일상"]));

		assert!((score - 0.2).abs() < 1e-6, "score = {score}");
	}

	#[test]
	fn generic_advice_is_penalized() {
		assert_eq!(insightfulness("꾸준함이 중요하다", ""), 0.0);
		assert!((insightfulness("실패의 원인을 본다", "") - 0.3).abs() < 1e-6);
	}

	#[test]
	fn reasoning_contributes_perspective() {
		assert!((insightfulness("강물", "새로운 관점") - 0.4).abs() < 1e-6);
	}

	#[test]
	fn paradox_note_with_paradox_candidate_passes() {
		let note_keywords = keywords(&["역설", "성장"]);
		let evaluation = evaluate(
			&policy(),
			QualityInput {
				note_text: "삶의 역설을 이해하는 것은 나를 확장하는 방법이 된다.",
				note_keywords: &note_keywords,
				candidate_content: "어둠이 있어야 빛이 빛난다. 대립을 통해 본질을 이해한다.",
				reasoning: "변증법적 관점: 모순과 대립이 오히려 이해를 확장시킨다.",
			},
		);

		assert!(evaluation.passing, "{evaluation:?}");
		assert!(evaluation.scores.overall >= 0.25);
	}

	#[test]
	fn keyword_coincidence_fails_the_gate() {
		let note_keywords = keywords(&["역설", "성장"]);
		let evaluation = evaluate(
			&policy(),
			QualityInput {
				note_text: "삶의 역설을 이해하는 것은 나를 확장하는 방법이 된다.",
				note_keywords: &note_keywords,
				candidate_content: "방법을 찾으면 된다.",
				reasoning: "",
			},
		);

		assert!(!evaluation.passing, "{evaluation:?}");
		assert_eq!(evaluation.bracket, QualityBracket::Low);
	}

	#[test]
	fn brackets_follow_overall_thresholds() {
		assert_eq!(QualityBracket::from_overall(0.75), QualityBracket::High);
		assert_eq!(QualityBracket::from_overall(0.45), QualityBracket::Medium);
		assert_eq!(QualityBracket::from_overall(0.1), QualityBracket::Low);
	}

	#[test]
	fn rank_by_quality_filters_and_orders() {
		let note = "모순과 역설 속에서 성장한다";
		let note_keywords = keywords(&["성장"]);
		let inputs = [
			("flat", "맛있는 점심"),
			("deep", "역설과 모순이 성장의 본질이다"),
			("partial", "성장은 계속된다"),
		];
		let ranked = rank_by_quality(
			&policy(),
			inputs.iter().map(|(id, content)| {
				(
					*id,
					QualityInput {
						note_text: note,
						note_keywords: &note_keywords,
						candidate_content: *content,
						reasoning: "",
					},
				)
			}),
			0.25,
		);
		let ids: Vec<&str> = ranked.iter().map(|(id, _)| *id).collect();

		assert_eq!(ids.first(), Some(&"deep"));
		assert!(!ids.contains(&"flat"));
	}

	#[test]
	fn explanations_are_korean_and_bracket_specific() {
		let high = QualityBracket::High.explanation();

		assert!(high.starts_with("높은 품질"));
		assert!(QualityBracket::Medium.explanation().starts_with("중간 품질"));
		assert!(QualityBracket::Low.explanation().starts_with("낮은 품질"));

		let evaluation = evaluate(
			&policy(),
			QualityInput {
				note_text: "평범한 하루",
				note_keywords: &[],
				candidate_content: "맛있는 점심",
				reasoning: "",
			},
		);

		assert_eq!(evaluation.bracket, QualityBracket::Low);
		assert_eq!(evaluation.explanation, QualityBracket::Low.explanation());
	}
}
