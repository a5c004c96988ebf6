use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strips every diacritic, returning the base-Latin transliteration.
///
/// The result is recomposed, so characters that only decompose into
/// non-mark parts (Hangul syllables) come back unchanged. `đ`/`Đ` carry no
/// combining mark under canonical decomposition, so they are mapped
/// explicitly.
pub fn remove_accents(text: &str) -> String {
	text.nfd()
		.filter(|c| !is_combining_mark(*c))
		.map(strip_stroke)
		.nfc()
		.collect()
}

/// Single-character form of [`remove_accents`].
pub fn remove_accent_char(c: char) -> char {
	let stripped = remove_accents(c.encode_utf8(&mut [0; 4]));
	let mut chars = stripped.chars();
	match (chars.next(), chars.next()) {
		(Some(base), None) => base,
		_ => c,
	}
}

fn strip_stroke(c: char) -> char {
	match c {
		'đ' => 'd',
		'Đ' => 'D',
		other => other,
	}
}
