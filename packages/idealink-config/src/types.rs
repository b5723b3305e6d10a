use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_RESULT_LIMIT: u32 = 10;
pub const DEFAULT_RELEVANCE_FLOOR: f32 = 0.3;
pub const DEFAULT_ADAPTER_TIMEOUT_MS: u64 = 5_000;

pub const DEFAULT_JACCARD_WEIGHT: f32 = 0.5;
pub const DEFAULT_COOCCURRENCE_WEIGHT: f32 = 0.3;
pub const DEFAULT_TAG_WEIGHT: f32 = 0.2;

pub const DEFAULT_DEPTH_WEIGHT: f32 = 0.40;
pub const DEFAULT_SEMANTIC_WEIGHT: f32 = 0.45;
pub const DEFAULT_INSIGHT_WEIGHT: f32 = 0.15;
pub const DEFAULT_PASS_OVERALL: f32 = 0.25;
pub const DEFAULT_PASS_SEMANTIC: f32 = 0.18;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub corpus: Corpus,
	pub search: Search,
	#[serde(default)]
	pub scoring: Scoring,
	pub sources: Sources,
	#[serde(default)]
	pub placeholder: Placeholder,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Corpus {
	/// Directory holding one JSON array file per corpus category.
	pub root: PathBuf,
	#[serde(default)]
	pub preload: bool,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	#[serde(default = "default_result_limit")]
	pub limit: u32,
	#[serde(default = "default_relevance_floor")]
	pub relevance_floor: f32,
	#[serde(default)]
	pub quality_filter: bool,
	#[serde(default = "default_adapter_timeout_ms")]
	pub adapter_timeout_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct Scoring {
	#[serde(default)]
	pub similarity: SimilarityWeights,
	#[serde(default)]
	pub quality: QualityPolicy,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SimilarityWeights {
	pub jaccard_weight: f32,
	pub cooccurrence_weight: f32,
	pub tag_weight: f32,
}
impl Default for SimilarityWeights {
	fn default() -> Self {
		Self {
			jaccard_weight: DEFAULT_JACCARD_WEIGHT,
			cooccurrence_weight: DEFAULT_COOCCURRENCE_WEIGHT,
			tag_weight: DEFAULT_TAG_WEIGHT,
		}
	}
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QualityPolicy {
	pub depth_weight: f32,
	pub semantic_weight: f32,
	pub insight_weight: f32,
	/// Minimum overall score for a candidate to pass the quality gate.
	pub pass_overall: f32,
	/// Minimum semantic relevance for a candidate to pass the quality gate.
	pub pass_semantic: f32,
}
impl Default for QualityPolicy {
	fn default() -> Self {
		Self {
			depth_weight: DEFAULT_DEPTH_WEIGHT,
			semantic_weight: DEFAULT_SEMANTIC_WEIGHT,
			insight_weight: DEFAULT_INSIGHT_WEIGHT,
			pass_overall: DEFAULT_PASS_OVERALL,
			pass_semantic: DEFAULT_PASS_SEMANTIC,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Sources {
	pub library: LocalSourceConfig,
	/// The standalone `quotes.json` and `korean-quotes.json` files under the corpus root.
	#[serde(default)]
	pub local_quotes: LocalSourceConfig,
	pub proverbs: LocalSourceConfig,
	pub quotable: RemoteSourceConfig,
	pub wikipedia: RemoteSourceConfig,
	pub google_books: RemoteSourceConfig,
}

#[derive(Debug, Deserialize)]
pub struct LocalSourceConfig {
	pub enabled: bool,
}
impl Default for LocalSourceConfig {
	fn default() -> Self {
		Self { enabled: true }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSourceConfig {
	pub enabled: bool,
	pub api_base: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Placeholder {
	/// Either "random" or "midpoint".
	#[serde(default = "default_placeholder_mode")]
	pub mode: String,
	pub seed: Option<u64>,
}
impl Placeholder {
	pub fn is_midpoint(&self) -> bool {
		self.mode == "midpoint"
	}
}
impl Default for Placeholder {
	fn default() -> Self {
		Self { mode: default_placeholder_mode(), seed: None }
	}
}

fn default_result_limit() -> u32 {
	DEFAULT_RESULT_LIMIT
}

fn default_relevance_floor() -> f32 {
	DEFAULT_RELEVANCE_FLOOR
}

fn default_adapter_timeout_ms() -> u64 {
	DEFAULT_ADAPTER_TIMEOUT_MS
}

fn default_placeholder_mode() -> String {
	"random".to_string()
}
