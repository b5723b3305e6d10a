use uuid::Uuid;

use idealink_config::{QualityPolicy, SimilarityWeights};
use idealink_domain::{
	Candidate, CandidateType, ScoredCandidate,
	keywords::{CONCEPT_CLUSTERS, extract_keywords},
	quality::{self, QualityInput},
	ranking, similarity,
};

const SAMPLES: &[&str] = &[
	"",
	"성장",
	"매일 조금씩 성장하고 싶다",
	"실패는 성공의 어머니",
	"Stay hungry, stay foolish.",
	"성장 습관 실패 성공 친구 배움 노력 성장 습관 실패 성공 친구 배움 노력",
	"   \t  ",
];

#[test]
fn similarity_stays_in_unit_interval() {
	let weights = SimilarityWeights::default();
	let tags = vec!["성장".to_string(), "습관".to_string(), "친구".to_string()];

	for note in SAMPLES {
		for candidate in SAMPLES {
			let score = similarity::similarity(&weights, note, &tags, candidate);

			assert!((0.0..=1.0).contains(&score), "{note:?} vs {candidate:?} = {score}");
		}
	}
}

#[test]
fn single_dominant_cluster_leads_the_keywords() {
	for cluster in CONCEPT_CLUSTERS.iter().filter(|cluster| cluster.triggers.len() >= 3) {
		let text = cluster.triggers[..3].join(" ");
		let keywords = extract_keywords(&text, &[]);

		assert_eq!(keywords.first().map(String::as_str), Some(cluster.keyword), "text = {text}");
	}
}

#[test]
fn empty_note_falls_back_to_short_token_list() {
	let keywords = extract_keywords("", &[]);

	assert!(keywords.len() <= 3);
	assert!(keywords.iter().all(|k| (2..=10).contains(&k.chars().count())));
}

#[test]
fn attribution_variants_collapse_to_first_arrival() {
	let kept = ranking::dedup(vec![
		Candidate::new(CandidateType::Quote, "Simplicity is the ultimate sophistication"),
		Candidate::new(
			CandidateType::Quote,
			"Simplicity is the ultimate sophistication - Leonardo da Vinci",
		),
	]);

	assert_eq!(kept.len(), 1);
	assert!(!kept[0].content.contains("Leonardo"));
}

#[test]
fn shared_dialectic_and_paradox_deepen_the_link() {
	let policy = QualityPolicy::default();
	let note = "갈등 속에서 오히려 길을 찾는다";
	let keywords = extract_keywords(note, &[]);
	let both = quality::evaluate(
		&policy,
		QualityInput {
			note_text: note,
			note_keywords: &keywords,
			candidate_content: "대립이 도리어 조화를 낳는다",
			reasoning: "",
		},
	);
	let one = quality::evaluate(
		&policy,
		QualityInput {
			note_text: note,
			note_keywords: &keywords,
			candidate_content: "대립이 조화를 낳는다",
			reasoning: "",
		},
	);

	assert!(both.scores.conceptual_depth >= one.scores.conceptual_depth);
}

#[test]
fn ranked_output_honors_floor_order_and_cap() {
	let note_id = Uuid::new_v4();
	let scored: Vec<ScoredCandidate> = [0.1, 0.95, 0.3, 0.5, 0.5, 0.29, 0.7]
		.iter()
		.enumerate()
		.map(|(idx, relevance)| {
			ScoredCandidate::from_candidate(
				note_id,
				Candidate::new(CandidateType::Web, format!("doc{idx}")),
				*relevance,
			)
		})
		.collect();
	let ranked = ranking::rank(scored, 0.3, 4);
	let contents: Vec<&str> = ranked.iter().map(|item| item.content.as_str()).collect();

	assert_eq!(contents, vec!["doc1", "doc6", "doc3", "doc4"]);
	assert!(ranking::validate(&ranked, 0.3));
}
