use reqwest::Client;
use serde_json::Value;

use crate::Result;

pub const OPENSEARCH_PATH: &str = "/w/api.php";
pub const MIN_DESCRIPTION_CHARS: usize = 30;
pub const MAX_ENTRIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	pub title: String,
	pub description: String,
	pub url: Option<String>,
}

pub async fn opensearch(client: &Client, api_base: &str, keywords: &[String]) -> Result<Vec<Entry>> {
	let url = format!("{api_base}{OPENSEARCH_PATH}");
	let search = keywords.join(" ");
	let json = crate::get_json(
		client,
		url,
		&[
			("action", "opensearch"),
			("search", search.as_str()),
			("limit", "10"),
			("namespace", "0"),
			("format", "json"),
		],
	)
	.await?;

	parse_opensearch(json)
}

/// Long enough and shaped like a sentence rather than a bare label.
pub fn is_sentence_like(description: &str) -> bool {
	description.chars().count() >= MIN_DESCRIPTION_CHARS
		&& (description.contains('.') || description.contains('다'))
}

/// Opensearch answers `[query, titles, descriptions, urls]` as parallel arrays.
fn parse_opensearch(json: Value) -> Result<Vec<Entry>> {
	let parts = json
		.as_array()
		.filter(|parts| parts.len() >= 4)
		.ok_or_else(|| crate::invalid_response("Opensearch response is not a 4-element array."))?;
	let titles = parts[1]
		.as_array()
		.ok_or_else(|| crate::invalid_response("Opensearch titles are not an array."))?;
	let descriptions = parts[2].as_array();
	let urls = parts[3].as_array();
	fn string_at(column: Option<&Vec<Value>>, idx: usize) -> Option<&str> {
		column.and_then(|values| values.get(idx)).and_then(Value::as_str).map(str::trim)
	}

	let entries = titles
		.iter()
		.enumerate()
		.filter_map(|(idx, title)| {
			let title = title.as_str()?.trim();
			let description = string_at(descriptions, idx).unwrap_or_default();

			is_sentence_like(description).then(|| Entry {
				title: title.to_string(),
				description: description.to_string(),
				url: string_at(urls, idx).filter(|url| !url.is_empty()).map(str::to_string),
			})
		})
		.take(MAX_ENTRIES)
		.collect();

	Ok(entries)
}
