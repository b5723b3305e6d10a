pub mod google_books;
pub mod quotable;
pub mod wikipedia;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use idealink_config::RemoteSourceConfig;

/// Builds the HTTP client for one remote source, carrying its per-request timeout.
pub fn client(cfg: &RemoteSourceConfig) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?)
}

async fn get_json(client: &Client, url: String, query: &[(&str, &str)]) -> Result<Value> {
	let res = client.get(url).query(query).send().await?;
	let body = res.error_for_status()?.bytes().await?;

	decode_json(&body)
}

fn decode_json(body: &[u8]) -> Result<Value> {
	Ok(serde_json::from_slice(body)?)
}

fn invalid_response(message: &str) -> Error {
	Error::InvalidResponse { message: message.to_string() }
}
