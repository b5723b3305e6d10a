use rand::{Rng, SeedableRng, rngs::StdRng};
use uuid::Uuid;

use idealink_config::Placeholder;

/// Closed score range assigned to results from a source with no scoring of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBand {
	pub min: f32,
	pub max: f32,
}
impl ScoreBand {
	pub const fn new(min: f32, max: f32) -> Self {
		Self { min, max }
	}

	pub fn midpoint(self) -> f32 {
		(self.min + self.max) / 2.0
	}

	pub fn contains(self, score: f32) -> bool {
		(self.min..=self.max).contains(&score)
	}
}

pub const PROVERB_BAND: ScoreBand = ScoreBand::new(0.80, 0.95);
pub const QUOTABLE_BAND: ScoreBand = ScoreBand::new(0.75, 0.95);
pub const WIKIPEDIA_BAND: ScoreBand = ScoreBand::new(0.70, 0.85);
pub const GOOGLE_BOOKS_BAND: ScoreBand = ScoreBand::new(0.70, 0.90);

/// Score source for adapters with no scoring of their own.
///
/// Holds no mutable state. Every adapter call takes its own [`Draw`], seeded from the configured
/// seed, the source name and the query keywords, so identical queries draw identical scores no
/// matter how concurrent calls interleave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderScores {
	Random { seed: u64 },
	Midpoint,
}
impl PlaceholderScores {
	/// Without a configured seed, one is picked from entropy for the lifetime of the process.
	pub fn from_config(cfg: &Placeholder) -> Self {
		if cfg.is_midpoint() {
			return Self::Midpoint;
		}

		Self::Random { seed: cfg.seed.unwrap_or_else(|| rand::thread_rng().r#gen()) }
	}

	pub fn seeded(seed: u64) -> Self {
		Self::Random { seed }
	}

	pub fn draw(&self, source: &str, keywords: &[String]) -> Draw {
		match *self {
			Self::Midpoint => Draw::Midpoint,
			Self::Random { seed } => {
				Draw::Random(StdRng::seed_from_u64(call_seed(seed, source, keywords)))
			},
		}
	}
}

/// Per-call score sequence.
pub enum Draw {
	Random(StdRng),
	Midpoint,
}
impl Draw {
	pub fn sample(&mut self, band: ScoreBand) -> f32 {
		match self {
			Self::Midpoint => band.midpoint(),
			Self::Random(rng) => rng.gen_range(band.min..=band.max),
		}
	}
}

fn call_seed(seed: u64, source: &str, keywords: &[String]) -> u64 {
	let namespace = Uuid::from_u64_pair(seed, 0);
	let name = format!("{source}\u{1f}{}", keywords.join("\u{1f}"));
	let (high, low) = Uuid::new_v5(&namespace, name.as_bytes()).as_u64_pair();

	high ^ low
}
