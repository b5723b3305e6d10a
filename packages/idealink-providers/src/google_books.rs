use reqwest::Client;
use serde_json::Value;

use crate::Result;

pub const VOLUMES_PATH: &str = "/books/v1/volumes";
pub const MIN_DESCRIPTION_CHARS: usize = 50;
pub const EXCERPT_CHARS: usize = 200;
pub const MAX_VOLUMES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
	pub title: Option<String>,
	pub authors: Vec<String>,
	/// Four-digit year taken from `publishedDate`.
	pub year: Option<String>,
	pub category: Option<String>,
	pub info_link: Option<String>,
	/// Description cut to an excerpt, always ending in `...`.
	pub excerpt: String,
}

pub async fn volumes(client: &Client, api_base: &str, keywords: &[String]) -> Result<Vec<Volume>> {
	let url = format!("{api_base}{VOLUMES_PATH}");
	let q = keywords.join(" ");
	let json = crate::get_json(
		client,
		url,
		&[("q", q.as_str()), ("langRestrict", "ko"), ("maxResults", "10"), ("orderBy", "relevance")],
	)
	.await?;

	parse_volumes(json)
}

pub fn excerpt(description: &str) -> String {
	let mut out: String = description.chars().take(EXCERPT_CHARS).collect();

	out.push_str("...");

	out
}

fn parse_volumes(json: Value) -> Result<Vec<Volume>> {
	let object =
		json.as_object().ok_or_else(|| crate::invalid_response("Volumes response is not an object."))?;
	// No `items` key means zero hits.
	let Some(items) = object.get("items") else {
		return Ok(Vec::new());
	};
	let items =
		items.as_array().ok_or_else(|| crate::invalid_response("Volumes items is not an array."))?;
	let volumes = items
		.iter()
		.filter_map(|item| item.get("volumeInfo"))
		.filter_map(parse_volume)
		.take(MAX_VOLUMES)
		.collect();

	Ok(volumes)
}

fn parse_volume(info: &Value) -> Option<Volume> {
	let description = info.get("description").and_then(|v| v.as_str())?.trim();

	if description.chars().count() < MIN_DESCRIPTION_CHARS {
		return None;
	}

	let text = |key: &str| {
		info.get(key)
			.and_then(|v| v.as_str())
			.map(str::trim)
			.filter(|value| !value.is_empty())
			.map(str::to_string)
	};
	let strings = |key: &str| -> Vec<String> {
		info.get(key)
			.and_then(|v| v.as_array())
			.map(|values| {
				values.iter().filter_map(|v| v.as_str()).map(str::to_string).collect()
			})
			.unwrap_or_default()
	};
	let year = text("publishedDate")
		.map(|date| date.chars().take(4).collect::<String>())
		.filter(|year| year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()));

	Some(Volume {
		title: text("title"),
		authors: strings("authors"),
		year,
		category: strings("categories").into_iter().next(),
		info_link: text("infoLink"),
		excerpt: excerpt(description),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn long_description() -> String {
		"작은 습관이 어떻게 인생을 바꾸는지 설명하는 책이다. ".repeat(10)
	}

	#[test]
	fn parses_volume_fields() {
		let json = serde_json::json!({
			"totalItems": 2,
			"items": [
				{ "volumeInfo": {
					"title": "아주 작은 습관의 힘",
					"authors": ["제임스 클리어"],
					"publishedDate": "2019-02-26",
					"categories": ["Self-Help"],
					"infoLink": "https://books.google.com/x",
					"description": long_description()
				}},
				{ "volumeInfo": { "title": "짧은 책", "description": "너무 짧다." } }
			]
		});
		let volumes = parse_volumes(json).expect("parse failed");

		assert_eq!(volumes.len(), 1);
		assert_eq!(volumes[0].year.as_deref(), Some("2019"));
		assert_eq!(volumes[0].authors, vec!["제임스 클리어"]);
		assert_eq!(volumes[0].category.as_deref(), Some("Self-Help"));
		assert_eq!(volumes[0].excerpt.chars().count(), EXCERPT_CHARS + 3);
		assert!(volumes[0].excerpt.ends_with("..."));
	}

	#[test]
	fn missing_items_means_no_hits() {
		let volumes = parse_volumes(serde_json::json!({ "totalItems": 0 })).expect("parse failed");

		assert!(volumes.is_empty());
	}

	#[test]
	fn skips_entries_without_volume_info_and_bad_years() {
		let json = serde_json::json!({
			"items": [
				{ "id": "no-info" },
				{ "volumeInfo": { "description": long_description(), "publishedDate": "n.d." } }
			]
		});
		let volumes = parse_volumes(json).expect("parse failed");

		assert_eq!(volumes.len(), 1);
		assert_eq!(volumes[0].year, None);
		assert_eq!(volumes[0].title, None);
	}

	#[test]
	fn rejects_non_object_payload() {
		assert!(parse_volumes(serde_json::json!([1, 2])).is_err());
		assert!(parse_volumes(serde_json::json!({ "items": "oops" })).is_err());
	}
}
