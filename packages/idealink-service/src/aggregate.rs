use std::time::Duration;

use futures::future;
use tracing::{debug, warn};

use idealink_domain::{Candidate, CandidateType};

use crate::SourceEntry;

/// Runs every source selected by `filter` concurrently and flattens their output.
///
/// Output is in registration order. A source that errors or exceeds `timeout` contributes nothing.
pub async fn gather(
	sources: &[SourceEntry],
	filter: &[CandidateType],
	keywords: &[String],
	timeout: Duration,
) -> Vec<Candidate> {
	let guarded = sources
		.iter()
		.filter(|entry| entry.serves_any(filter))
		.map(|entry| guard(entry, keywords, timeout));

	future::join_all(guarded).await.into_iter().flatten().collect()
}

async fn guard(entry: &SourceEntry, keywords: &[String], timeout: Duration) -> Vec<Candidate> {
	match tokio::time::timeout(timeout, entry.adapter.search(keywords, entry.limit)).await {
		Ok(Ok(candidates)) => {
			debug!(adapter = %entry.name, count = candidates.len(), "Source adapter finished.");

			candidates
		},
		Ok(Err(err)) => {
			warn!(adapter = %entry.name, error = %err, "Source adapter failed.");

			Vec::new()
		},
		Err(_) => {
			warn!(
				adapter = %entry.name,
				timeout_ms = timeout.as_millis() as u64,
				"Source adapter timed out."
			);

			Vec::new()
		},
	}
}
