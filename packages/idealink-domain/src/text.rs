use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// NFKC-normalizes, lowercases and collapses whitespace runs into single spaces.
pub fn normalize(input: &str) -> String {
	let composed: String = input.nfkc().collect();
	let mut out = String::with_capacity(composed.len());

	for word in composed.split_whitespace() {
		if !out.is_empty() {
			out.push(' ');
		}

		out.extend(word.chars().flat_map(char::to_lowercase));
	}

	out
}

/// Lowercased whitespace-delimited word set.
pub fn word_set(input: &str) -> HashSet<String> {
	input.split_whitespace().map(str::to_lowercase).collect()
}

pub fn grapheme_len(input: &str) -> usize {
	input.graphemes(true).count()
}

/// Whether any of `terms` appears in the already-normalized `haystack`.
pub fn contains_any(haystack: &str, terms: &[&str]) -> bool {
	terms.iter().any(|term| haystack.contains(term))
}
