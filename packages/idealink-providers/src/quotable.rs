use reqwest::Client;
use serde_json::Value;

use crate::Result;

pub const QUOTES_PATH: &str = "/quotes/random";
pub const QUOTES_PER_CALL: &str = "3";
pub const DEFAULT_TAG: &str = "life";

const TAG_TABLE: &[(&str, &str)] = &[
	("성장", "growth"),
	("습관", "habit"),
	("실패", "failure"),
	("성공", "success"),
	("친구", "friendship"),
	("우정", "friendship"),
	("노력", "effort"),
	("도전", "challenge"),
	("사랑", "love"),
	("행복", "happiness"),
	("배움", "learning"),
	("지혜", "wisdom"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
	pub content: String,
	pub author: Option<String>,
}

/// The first keyword with a known English tag wins.
pub fn english_tag(keywords: &[String]) -> &'static str {
	keywords
		.iter()
		.find_map(|keyword| {
			TAG_TABLE.iter().find(|(korean, _)| *korean == keyword.trim()).map(|(_, tag)| *tag)
		})
		.unwrap_or(DEFAULT_TAG)
}

pub async fn random_quotes(client: &Client, api_base: &str, keywords: &[String]) -> Result<Vec<Quote>> {
	let url = format!("{api_base}{QUOTES_PATH}");
	let json =
		crate::get_json(client, url, &[("tags", english_tag(keywords)), ("limit", QUOTES_PER_CALL)])
			.await?;

	parse_quotes(json)
}

fn parse_quotes(json: Value) -> Result<Vec<Quote>> {
	let items =
		json.as_array().ok_or_else(|| crate::invalid_response("Quote response is not an array."))?;
	let quotes = items
		.iter()
		.filter_map(|item| {
			let content = item.get("content").and_then(|v| v.as_str())?.trim();

			if content.is_empty() {
				return None;
			}

			let author = item
				.get("author")
				.and_then(|v| v.as_str())
				.map(str::trim)
				.filter(|author| !author.is_empty())
				.map(str::to_string);

			Some(Quote { content: content.to_string(), author })
		})
		.collect();

	Ok(quotes)
}
