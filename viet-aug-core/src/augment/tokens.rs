//! Whitespace tokenization that keeps the separators intact.
//!
//! Token-level stages rewrite individual words; the whitespace between them
//! is copied through unchanged, so a stage that rewrites nothing returns its
//! input byte-for-byte.

use std::ops::Range;

use crate::error::AugmentError;

/// Byte ranges of the whitespace-delimited tokens of `text`.
pub fn token_spans(text: &str) -> Vec<Range<usize>> {
	let mut spans = Vec::new();
	let mut start = None;

	for (i, c) in text.char_indices() {
		if c.is_whitespace() {
			if let Some(s) = start.take() {
				spans.push(s..i);
			}
		} else if start.is_none() {
			start = Some(i);
		}
	}
	if let Some(s) = start {
		spans.push(s..text.len());
	}

	spans
}

/// Rebuilds `text`, replacing each token for which `rewrite` returns
/// `Some`.
///
/// `rewrite` receives the token index and the token itself, in order.
pub fn rewrite_tokens<F>(text: &str, mut rewrite: F) -> Result<String, AugmentError>
where
	F: FnMut(usize, &str) -> Result<Option<String>, AugmentError>,
{
	let mut out = String::with_capacity(text.len());
	let mut cursor = 0;

	for (index, span) in token_spans(text).into_iter().enumerate() {
		out.push_str(&text[cursor..span.start]);
		let token = &text[span.clone()];
		match rewrite(index, token)? {
			Some(replacement) => out.push_str(&replacement),
			None => out.push_str(token),
		}
		cursor = span.end;
	}
	out.push_str(&text[cursor..]);

	Ok(out)
}

/// Removes the token at `span` together with the whitespace that follows it
/// (or precedes it, for the last token).
pub fn remove_token(text: &str, spans: &[Range<usize>], index: usize) -> String {
	let span = &spans[index];
	let (start, end) = match (spans.get(index + 1), index.checked_sub(1)) {
		(Some(next), _) => (span.start, next.start),
		(None, Some(prev)) => (spans[prev].end, span.end),
		(None, None) => (span.start, span.end),
	};

	let mut out = String::with_capacity(text.len());
	out.push_str(&text[..start]);
	out.push_str(&text[end..]);
	out
}
