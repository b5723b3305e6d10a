mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Corpus, DEFAULT_ADAPTER_TIMEOUT_MS, DEFAULT_COOCCURRENCE_WEIGHT, DEFAULT_DEPTH_WEIGHT,
	DEFAULT_INSIGHT_WEIGHT, DEFAULT_JACCARD_WEIGHT, DEFAULT_PASS_OVERALL, DEFAULT_PASS_SEMANTIC,
	DEFAULT_RELEVANCE_FLOOR, DEFAULT_RESULT_LIMIT, DEFAULT_SEMANTIC_WEIGHT, DEFAULT_TAG_WEIGHT,
	LocalSourceConfig, Placeholder, QualityPolicy, RemoteSourceConfig, Scoring, Search, Service,
	SimilarityWeights, Sources,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.corpus.root.as_os_str().is_empty() {
		return Err(Error::Validation { message: "corpus.root must be non-empty.".to_string() });
	}
	if cfg.search.limit == 0 {
		return Err(Error::Validation {
			message: "search.limit must be greater than zero.".to_string(),
		});
	}
	if !cfg.search.relevance_floor.is_finite() {
		return Err(Error::Validation {
			message: "search.relevance_floor must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.relevance_floor) {
		return Err(Error::Validation {
			message: "search.relevance_floor must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.search.adapter_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.adapter_timeout_ms must be greater than zero.".to_string(),
		});
	}

	let similarity = &cfg.scoring.similarity;
	let quality = &cfg.scoring.quality;

	for (label, weight) in [
		("scoring.similarity.jaccard_weight", similarity.jaccard_weight),
		("scoring.similarity.cooccurrence_weight", similarity.cooccurrence_weight),
		("scoring.similarity.tag_weight", similarity.tag_weight),
		("scoring.quality.depth_weight", quality.depth_weight),
		("scoring.quality.semantic_weight", quality.semantic_weight),
		("scoring.quality.insight_weight", quality.insight_weight),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if weight < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}
	for (label, threshold) in [
		("scoring.quality.pass_overall", quality.pass_overall),
		("scoring.quality.pass_semantic", quality.pass_semantic),
	] {
		if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0.0-1.0."),
			});
		}
	}

	for (label, source) in [
		("quotable", &cfg.sources.quotable),
		("wikipedia", &cfg.sources.wikipedia),
		("google_books", &cfg.sources.google_books),
	] {
		if !source.enabled {
			continue;
		}
		if source.api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("sources.{label}.api_base must be non-empty when enabled."),
			});
		}
		if source.timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("sources.{label}.timeout_ms must be greater than zero."),
			});
		}
	}

	if !matches!(cfg.placeholder.mode.as_str(), "random" | "midpoint") {
		return Err(Error::Validation {
			message: "placeholder.mode must be one of random or midpoint.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.placeholder.mode = cfg.placeholder.mode.trim().to_ascii_lowercase();

	for source in [
		&mut cfg.sources.quotable,
		&mut cfg.sources.wikipedia,
		&mut cfg.sources.google_books,
	] {
		let trimmed = source.api_base.trim().trim_end_matches('/');

		if trimmed.len() != source.api_base.len() {
			source.api_base = trimmed.to_string();
		}
	}
}
