//! Regression harness for the quality evaluator.
//!
//! Each dataset case pairs a note with ideas labelled good or bad. The harness reports how many
//! good ideas clear the quality gate and how many bad ones it rejects.

use std::{
	fs,
	path::{Path, PathBuf},
};

use clap::Parser;
use color_eyre::eyre;
use serde::{Deserialize, Serialize};

use idealink_config::QualityPolicy;
use idealink_domain::{
	keywords::extract_keywords,
	quality::{self, QualityBracket, QualityInput},
};

#[derive(Debug, Parser)]
#[command(
	version = idealink_cli::VERSION,
	rename_all = "kebab",
	styles = idealink_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'd', value_name = "FILE")]
	pub dataset: PathBuf,
	/// Scoring weights come from this file; defaults are used otherwise.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
	#[arg(long, short = 'o', value_name = "FILE")]
	pub out: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct EvalCase {
	pub name: String,
	pub note: EvalNote,
	#[serde(default)]
	pub good: Vec<GoodIdea>,
	#[serde(default)]
	pub bad: Vec<BadIdea>,
}

#[derive(Debug, Deserialize)]
pub struct EvalNote {
	pub text: String,
	#[serde(default)]
	pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoodIdea {
	pub content: String,
	#[serde(default)]
	pub reasoning: String,
	pub expected: QualityBracket,
}

#[derive(Debug, Deserialize)]
pub struct BadIdea {
	pub content: String,
	#[serde(default)]
	pub reasoning: String,
	#[serde(default)]
	pub why_bad: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
	Good,
	Bad,
}

#[derive(Debug, Serialize)]
pub struct EvalOutput {
	pub dataset: String,
	pub summary: EvalSummary,
	pub cases: Vec<CaseReport>,
}

#[derive(Debug, Default, Serialize)]
pub struct EvalSummary {
	pub case_count: usize,
	pub good_total: usize,
	pub good_passing: usize,
	pub bad_total: usize,
	pub bad_rejected: usize,
	pub good_pass_rate: f64,
	pub bad_reject_rate: f64,
	pub mean_good_overall: f64,
	pub mean_bad_overall: f64,
}

#[derive(Debug, Serialize)]
pub struct CaseReport {
	pub name: String,
	pub keywords: Vec<String>,
	pub good_total: usize,
	pub good_passing: usize,
	/// Good ideas whose bracket matched the labelled expectation.
	pub good_bracket_hits: usize,
	pub bad_total: usize,
	pub bad_rejected: usize,
	pub mean_good_overall: f64,
	pub mean_bad_overall: f64,
	/// Every idea, best overall score first.
	pub ranking: Vec<RankedIdea>,
}

#[derive(Debug, Serialize)]
pub struct RankedIdea {
	pub label: Label,
	pub content: String,
	pub overall: f32,
	pub semantic_relevance: f32,
	pub passing: bool,
	pub bracket: QualityBracket,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub expected: Option<QualityBracket>,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let policy = match &args.config {
		Some(path) => {
			let config = idealink_config::load(path)?;

			idealink_cli::init_tracing(&config.service.log_level);

			config.scoring.quality
		},
		None => {
			idealink_cli::init_tracing("info");

			QualityPolicy::default()
		},
	};
	let cases = load_dataset(&args.dataset)?;
	let output = evaluate_dataset(&policy, &args.dataset.display().to_string(), &cases);
	let json = serde_json::to_string_pretty(&output)?;

	tracing::info!(
		cases = output.summary.case_count,
		good_passing = output.summary.good_passing,
		bad_rejected = output.summary.bad_rejected,
		"Evaluation finished."
	);

	match &args.out {
		Some(path) => fs::write(path, format!("{json}\n"))?,
		None => println!("{json}"),
	}

	Ok(())
}

pub fn load_dataset(path: &Path) -> color_eyre::Result<Vec<EvalCase>> {
	let raw = fs::read_to_string(path)?;

	parse_dataset(&raw)
}

pub fn parse_dataset(raw: &str) -> color_eyre::Result<Vec<EvalCase>> {
	let cases: Vec<EvalCase> = serde_json::from_str(raw)?;

	if cases.is_empty() {
		return Err(eyre::eyre!("Dataset must include at least one case."));
	}
	if let Some(case) = cases.iter().find(|case| case.good.is_empty() && case.bad.is_empty()) {
		return Err(eyre::eyre!("Case {:?} has no labelled ideas.", case.name));
	}

	Ok(cases)
}

pub fn evaluate_dataset(policy: &QualityPolicy, name: &str, cases: &[EvalCase]) -> EvalOutput {
	let reports: Vec<CaseReport> = cases.iter().map(|case| evaluate_case(policy, case)).collect();
	let mut summary = EvalSummary { case_count: reports.len(), ..Default::default() };
	let mut good_scores = Vec::new();
	let mut bad_scores = Vec::new();

	for report in &reports {
		summary.good_total += report.good_total;
		summary.good_passing += report.good_passing;
		summary.bad_total += report.bad_total;
		summary.bad_rejected += report.bad_rejected;

		for idea in &report.ranking {
			match idea.label {
				Label::Good => good_scores.push(idea.overall),
				Label::Bad => bad_scores.push(idea.overall),
			}
		}
	}

	summary.good_pass_rate = ratio(summary.good_passing, summary.good_total);
	summary.bad_reject_rate = ratio(summary.bad_rejected, summary.bad_total);
	summary.mean_good_overall = mean(&good_scores);
	summary.mean_bad_overall = mean(&bad_scores);

	EvalOutput { dataset: name.to_string(), summary, cases: reports }
}

pub fn evaluate_case(policy: &QualityPolicy, case: &EvalCase) -> CaseReport {
	let keywords = extract_keywords(&case.note.text, &case.note.tags);
	let good = case.good.iter().map(|idea| {
		let key = (Label::Good, &idea.content, Some(idea.expected));

		(key, idea_input(case, &keywords, &idea.content, &idea.reasoning))
	});
	let bad = case.bad.iter().map(|idea| {
		let key = (Label::Bad, &idea.content, None);

		(key, idea_input(case, &keywords, &idea.content, &idea.reasoning))
	});
	let ranked = quality::rank_by_quality(policy, good.chain(bad), 0.0);
	let ranking: Vec<RankedIdea> = ranked
		.into_iter()
		.map(|((label, content, expected), evaluation)| RankedIdea {
			label,
			content: content.clone(),
			overall: evaluation.scores.overall,
			semantic_relevance: evaluation.scores.semantic_relevance,
			passing: evaluation.passing,
			bracket: evaluation.bracket,
			expected,
		})
		.collect();
	let of = |label: Label| ranking.iter().filter(move |idea| idea.label == label);
	let good_overall: Vec<f32> = of(Label::Good).map(|idea| idea.overall).collect();
	let bad_overall: Vec<f32> = of(Label::Bad).map(|idea| idea.overall).collect();

	CaseReport {
		name: case.name.clone(),
		good_total: case.good.len(),
		good_passing: of(Label::Good).filter(|idea| idea.passing).count(),
		good_bracket_hits: of(Label::Good).filter(|idea| idea.expected == Some(idea.bracket)).count(),
		bad_total: case.bad.len(),
		bad_rejected: of(Label::Bad).filter(|idea| !idea.passing).count(),
		mean_good_overall: mean(&good_overall),
		mean_bad_overall: mean(&bad_overall),
		keywords,
		ranking,
	}
}

fn idea_input<'a>(
	case: &'a EvalCase,
	keywords: &'a [String],
	content: &'a str,
	reasoning: &'a str,
) -> QualityInput<'a> {
	QualityInput { note_text: &case.note.text, note_keywords: keywords, candidate_content: content, reasoning }
}

fn mean(values: &[f32]) -> f64 {
	if values.is_empty() {
		return 0.0;
	}

	values.iter().map(|value| f64::from(*value)).sum::<f64>() / values.len() as f64
}

fn ratio(hits: usize, total: usize) -> f64 {
	if total == 0 { 0.0 } else { hits as f64 / total as f64 }
}
