use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ranking::dedup_key;

/// Kinds of knowledge a candidate can carry. The set is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateType {
	#[serde(alias = "famous-quote")]
	Quote,
	Proverb,
	Book,
	Essay,
	Poem,
	Academic,
	Web,
	/// Movie, drama and animation dialogue.
	#[serde(alias = "movie", alias = "drama", alias = "animation")]
	ScreenLine,
	#[serde(alias = "memo")]
	UserMemo,
}
impl CandidateType {
	pub const ALL: [Self; 9] = [
		Self::Quote,
		Self::Proverb,
		Self::Book,
		Self::Essay,
		Self::Poem,
		Self::Academic,
		Self::Web,
		Self::ScreenLine,
		Self::UserMemo,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Quote => "quote",
			Self::Proverb => "proverb",
			Self::Book => "book",
			Self::Essay => "essay",
			Self::Poem => "poem",
			Self::Academic => "academic",
			Self::Web => "web",
			Self::ScreenLine => "screenLine",
			Self::UserMemo => "userMemo",
		}
	}
}
impl fmt::Display for CandidateType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for CandidateType {
	type Err = UnknownCandidateType;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let kind = match raw.trim() {
			"quote" | "famous-quote" => Self::Quote,
			"proverb" => Self::Proverb,
			"book" => Self::Book,
			"essay" => Self::Essay,
			"poem" => Self::Poem,
			"academic" => Self::Academic,
			"web" => Self::Web,
			"screenLine" | "movie" | "drama" | "animation" => Self::ScreenLine,
			"userMemo" | "memo" => Self::UserMemo,
			_ => return Err(UnknownCandidateType(raw.to_string())),
		};

		Ok(kind)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown candidate type: {0:?}.")]
pub struct UnknownCandidateType(pub String);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSource {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub author: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub year: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub platform: Option<String>,
}

/// The user's note a search is run for. Immutable for the duration of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
	pub id: Uuid,
	pub text: String,
	pub tags: Vec<String>,
}
impl Note {
	pub fn new(text: impl Into<String>, tags: Vec<String>) -> Self {
		Self { id: Uuid::new_v4(), text: text.into(), tags }
	}

	pub fn with_id(id: Uuid, text: impl Into<String>, tags: Vec<String>) -> Self {
		Self { id, text: text.into(), tags }
	}
}

/// One retrieved piece of knowledge, before engine scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
	#[serde(rename = "type")]
	pub kind: CandidateType,
	pub content: String,
	#[serde(default)]
	pub source: CandidateSource,
	/// Adapter-supplied score. Acts as a floor for the final relevance.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub raw_score: Option<f32>,
	#[serde(default)]
	pub reasoning: String,
}
impl Candidate {
	pub fn new(kind: CandidateType, content: impl Into<String>) -> Self {
		Self {
			kind,
			content: content.into(),
			source: CandidateSource::default(),
			raw_score: None,
			reasoning: String::new(),
		}
	}

	pub fn with_source(mut self, source: CandidateSource) -> Self {
		self.source = source;

		self
	}

	pub fn with_raw_score(mut self, score: f32) -> Self {
		self.raw_score = Some(score.clamp(0.0, 1.0));

		self
	}

	pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
		self.reasoning = reasoning.into();

		self
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityScores {
	pub conceptual_depth: f32,
	pub semantic_relevance: f32,
	pub insightfulness: f32,
	pub overall: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
	/// Stable per note: derived from the note id and the dedup key.
	pub id: Uuid,
	#[serde(rename = "type")]
	pub kind: CandidateType,
	pub content: String,
	pub source: CandidateSource,
	pub relevance: f32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub quality_scores: Option<QualityScores>,
	pub reasoning: String,
}
impl ScoredCandidate {
	pub fn from_candidate(note_id: Uuid, candidate: Candidate, relevance: f32) -> Self {
		let id = Uuid::new_v5(&note_id, dedup_key(&candidate.content).as_bytes());

		Self {
			id,
			kind: candidate.kind,
			content: candidate.content,
			source: candidate.source,
			relevance: relevance.clamp(0.0, 1.0),
			quality_scores: None,
			reasoning: candidate.reasoning,
		}
	}
}

/// An association between a note and a scored candidate, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
	pub note_id: Uuid,
	pub candidate_id: Uuid,
	pub strength: f32,
	pub accepted: bool,
}
impl Connection {
	pub fn propose(note_id: Uuid, candidate: &ScoredCandidate) -> Self {
		Self { note_id, candidate_id: candidate.id, strength: candidate.relevance, accepted: false }
	}

	pub fn accept(self) -> Self {
		Self { accepted: true, ..self }
	}
}
