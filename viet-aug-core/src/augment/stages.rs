//! The individual transformation stages.
//!
//! Every stage takes the previous text by reference and returns a new
//! string. A stage whose precondition does not hold (no token, no accented
//! character) returns its input unchanged; `Err` is reserved for lookup
//! tables that contradict themselves.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::accent::{remove_accent_char, remove_accents};
use super::tables::CharTables;
use super::tokens::{remove_token, rewrite_tokens, token_spans};
use crate::error::AugmentError;

/// Punctuation removed by [`strip_punctuation`] unless it touches a digit.
pub const STRIPPED_PUNCTUATION: &[char] = &['.', ',', ';', ':', '\'', '?', '!'];

/// Draws once from `rng`; true with probability `probability`.
///
/// A draw is uniform in `[0, 1)`, so `0.0` never fires and `1.0` always
/// does.
pub(crate) fn roll<R: Rng>(rng: &mut R, probability: f64) -> bool {
	rng.random::<f64>() < probability
}

/// Rewrites the leading consonant cluster of each token.
///
/// Each token is gated independently; the first pair whose source prefix
/// matches wins.
pub fn swap_typos<R: Rng>(
	text: &str,
	probability: f64,
	tables: &CharTables,
	rng: &mut R,
) -> Result<String, AugmentError> {
	rewrite_tokens(text, |_, word| {
		if !roll(rng, probability) {
			return Ok(None);
		}
		Ok(tables
			.typo_pairs()
			.iter()
			.find(|(source, _)| word.starts_with(source))
			.map(|(source, replacement)| format!("{replacement}{}", &word[source.len()..])))
	})
}

/// Swaps a leading `n`/`l` (either case) for its counterpart.
///
/// Only tokens starting with one of those letters consume a draw.
pub fn swap_n_l<R: Rng>(text: &str, probability: f64, rng: &mut R) -> Result<String, AugmentError> {
	rewrite_tokens(text, |_, word| {
		let mut chars = word.chars();
		let swapped = match chars.next() {
			Some('n') => 'l',
			Some('N') => 'L',
			Some('l') => 'n',
			Some('L') => 'N',
			_ => return Ok(None),
		};
		if !roll(rng, probability) {
			return Ok(None);
		}
		Ok(Some(format!("{swapped}{}", chars.as_str())))
	})
}

/// Re-rolls the tone of accented characters within their base-letter group.
///
/// The new character is drawn from the whole group, so it may be the same
/// one.
pub fn modify_tones<R: Rng>(
	text: &str,
	probability: f64,
	tables: &CharTables,
	rng: &mut R,
) -> Result<String, AugmentError> {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		if roll(rng, probability) {
			if let Some(group) = tables.group_of(c)? {
				let picked = group.choose(rng).ok_or(AugmentError::EmptyChoice { stage: "tone_change" })?;
				out.push(*picked);
				continue;
			}
		}
		out.push(c);
	}
	Ok(out)
}

/// Deletes the first occurrence of one accented character.
///
/// Occurrences are weighted by frequency: the character is drawn from the
/// list of all accented characters in the text.
pub fn delete_character<R: Rng>(
	text: &str,
	probability: f64,
	tables: &CharTables,
	rng: &mut R,
) -> Result<String, AugmentError> {
	let accented: Vec<char> = text.chars().filter(|c| tables.base_of(*c).is_some()).collect();
	if accented.is_empty() || !roll(rng, probability) {
		return Ok(text.to_owned());
	}

	let target = accented.choose(rng).ok_or(AugmentError::EmptyChoice { stage: "char_delete" })?;
	Ok(text.replacen(*target, "", 1))
}

/// Splices one random Vietnamese character at a random position.
///
/// Blank input is left untouched.
pub fn insert_character<R: Rng>(
	text: &str,
	probability: f64,
	tables: &CharTables,
	rng: &mut R,
) -> Result<String, AugmentError> {
	if text.trim().is_empty() || !roll(rng, probability) {
		return Ok(text.to_owned());
	}

	let position = rng.random_range(0..=text.chars().count());
	let base = *tables
		.bases()
		.choose(rng)
		.ok_or(AugmentError::EmptyChoice { stage: "char_insert" })?;
	let inserted = tables
		.group(base)
		.and_then(|variants| variants.choose(rng))
		.copied()
		.unwrap_or(base);

	let byte_index = text.char_indices().nth(position).map_or(text.len(), |(i, _)| i);
	let mut out = String::with_capacity(text.len() + inserted.len_utf8());
	out.push_str(&text[..byte_index]);
	out.push(inserted);
	out.push_str(&text[byte_index..]);
	Ok(out)
}

/// Replaces accented characters with a *different* member of their group.
///
/// Characters whose group has a single member are kept.
pub fn replace_character<R: Rng>(
	text: &str,
	probability: f64,
	tables: &CharTables,
	rng: &mut R,
) -> Result<String, AugmentError> {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		if roll(rng, probability) {
			if let Some(group) = tables.group_of(c)? {
				let alternatives: Vec<char> = group.iter().copied().filter(|v| *v != c).collect();
				if let Some(&replacement) = alternatives.choose(rng) {
					out.push(replacement);
					continue;
				}
			}
		}
		out.push(c);
	}
	Ok(out)
}

/// Lower-cases whole tokens that start with an uppercase letter.
pub fn lower_case_words<R: Rng>(text: &str, probability: f64, rng: &mut R) -> Result<String, AugmentError> {
	rewrite_tokens(text, |_, word| {
		let capitalized = word.chars().next().is_some_and(char::is_uppercase);
		Ok((capitalized && roll(rng, probability)).then(|| word.to_lowercase()))
	})
}

/// Drops sentence punctuation that is not adjacent to a digit.
///
/// Adjacency (to an ASCII decimal digit) is checked against the original
/// text, so `1.000,50` keeps both separators.
pub fn strip_punctuation(text: &str) -> String {
	let chars: Vec<char> = text.chars().collect();
	chars
		.iter()
		.enumerate()
		.filter(|&(i, c)| {
			if !STRIPPED_PUNCTUATION.contains(c) {
				return true;
			}
			let after_digit = i.checked_sub(1).is_some_and(|p| chars[p].is_ascii_digit());
			let before_digit = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
			after_digit || before_digit
		})
		.map(|(_, c)| *c)
		.collect()
}

/// Fully de-accents one randomly chosen token.
pub fn remove_random_accent<R: Rng>(text: &str, probability: f64, rng: &mut R) -> Result<String, AugmentError> {
	let count = token_spans(text).len();
	if !roll(rng, probability) || count == 0 {
		return Ok(text.to_owned());
	}

	let index = rng.random_range(0..count);
	rewrite_tokens(text, |i, word| Ok((i == index).then(|| remove_accents(word))))
}

/// Swaps one accent-bearing character of a random token for another
/// same-letter form.
pub fn replace_accent_chars<R: Rng>(
	text: &str,
	probability: f64,
	tables: &CharTables,
	rng: &mut R,
) -> Result<String, AugmentError> {
	let count = token_spans(text).len();
	if !roll(rng, probability) || count == 0 {
		return Ok(text.to_owned());
	}

	let index = rng.random_range(0..count);
	rewrite_tokens(text, |i, word| {
		if i == index {
			change_accent(word, tables, rng).map(Some)
		} else {
			Ok(None)
		}
	})
}

fn change_accent<R: Rng>(word: &str, tables: &CharTables, rng: &mut R) -> Result<String, AugmentError> {
	let matches: Vec<char> = word.chars().filter(|c| tables.is_accent_bearing(*c)).collect();
	let Some(&target) = matches.choose(rng) else {
		return Ok(word.to_owned());
	};

	let candidates: Vec<char> = tables
		.same_tone(remove_accent_char(target))
		.unwrap_or_default()
		.iter()
		.copied()
		.filter(|c| *c != target)
		.collect();

	match candidates.choose(rng) {
		Some(replacement) => Ok(word.replacen(target, &replacement.to_string(), 1)),
		None => Ok(word.to_owned()),
	}
}

/// Removes one random token from texts of at least three tokens.
pub fn delete_word<R: Rng>(text: &str, probability: f64, rng: &mut R) -> Result<String, AugmentError> {
	let spans = token_spans(text);
	if spans.len() < 3 || !roll(rng, probability) {
		return Ok(text.to_owned());
	}

	let index = rng.random_range(0..spans.len());
	Ok(remove_token(text, &spans, index))
}

/// Swaps the case of individual characters.
pub fn swap_case<R: Rng>(text: &str, probability: f64, rng: &mut R) -> Result<String, AugmentError> {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		if !roll(rng, probability) {
			out.push(c);
		} else if c.is_lowercase() {
			out.extend(c.to_uppercase());
		} else if c.is_uppercase() {
			out.extend(c.to_lowercase());
		} else {
			out.push(c);
		}
	}
	Ok(out)
}
