use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::error::AugmentError;

/// One row of the tone/diacritic table: an unaccented base letter and the
/// accented Vietnamese letters derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneGroup {
	pub base: char,
	pub variants: &'static [char],
}

/// Tone-changing substitution groups (lowercase only), in lookup order.
pub const TONE_GROUPS: &[ToneGroup] = &[
	ToneGroup {
		base: 'a',
		variants: &['á', 'à', 'ả', 'ã', 'ạ', 'â', 'ấ', 'ầ', 'ẩ', 'ẫ', 'ậ', 'ă', 'ắ', 'ằ', 'ẳ', 'ẵ', 'ặ'],
	},
	ToneGroup { base: 'd', variants: &['đ'] },
	ToneGroup {
		base: 'e',
		variants: &['é', 'è', 'ẻ', 'ẽ', 'ẹ', 'ê', 'ế', 'ề', 'ể', 'ễ', 'ệ'],
	},
	ToneGroup { base: 'i', variants: &['í', 'ì', 'ỉ', 'ĩ', 'ị'] },
	ToneGroup {
		base: 'o',
		variants: &['ó', 'ò', 'ỏ', 'õ', 'ọ', 'ô', 'ố', 'ồ', 'ổ', 'ỗ', 'ộ', 'ơ', 'ớ', 'ờ', 'ở', 'ỡ', 'ợ'],
	},
	ToneGroup {
		base: 'u',
		variants: &['ú', 'ù', 'ủ', 'ũ', 'ụ', 'ư', 'ứ', 'ừ', 'ử', 'ữ', 'ự'],
	},
	ToneGroup { base: 'y', variants: &['ý', 'ỳ', 'ỷ', 'ỹ', 'ỵ'] },
];

/// Initial consonant-cluster confusions as `(source prefix, replacement)`.
///
/// First match wins, so longer clusters (`tr`, `ch`, `gi`) must stay ahead
/// of the single letters they start with.
pub const TYPO_PAIRS: &[(&str, &str)] = &[
	("tr", "ch"),
	("ch", "tr"),
	("d", "gi"),
	("gi", "d"),
	("r", "d"),
	("s", "x"),
	("x", "s"),
	("l", "n"),
	("n", "l"),
	("v", "d"),
	("d", "r"),
	("t", "c"),
	("c", "t"),
	("v", "b"),
	("b", "v"),
];

/// Accent-preserving substitution candidates, keyed by de-accented letter.
pub const SAME_TONE: &[(char, &[char])] = &[
	('a', &['á', 'à', 'ả', 'ã', 'ạ', 'ấ', 'ầ', 'ẩ', 'ẫ', 'ậ', 'ắ', 'ằ', 'ẳ', 'ẵ', 'ặ']),
	('A', &['Á', 'À', 'Ả', 'Ã', 'Ạ', 'Ấ', 'Ầ', 'Ẩ', 'Ẫ', 'Ậ', 'Ắ', 'Ằ', 'Ẳ', 'Ẵ', 'Ặ']),
	('O', &['Ó', 'Ò', 'Ỏ', 'Õ', 'Ọ', 'Ô', 'Ố', 'Ồ', 'Ổ', 'Ỗ', 'Ộ', 'Ơ', 'Ớ', 'Ờ', 'Ở', 'Ỡ', 'Ợ', 'Q']),
	('o', &['ó', 'ò', 'ỏ', 'õ', 'ọ', 'ô', 'ố', 'ồ', 'ổ', 'ỗ', 'ộ', 'ơ', 'ớ', 'ờ', 'ở', 'ỡ', 'ợ', 'q']),
	('e', &['é', 'è', 'ẻ', 'ẽ', 'ẹ', 'ế', 'ề', 'ể', 'ễ', 'ệ', 'ê']),
	('E', &['É', 'È', 'Ẻ', 'Ẽ', 'Ẹ', 'Ế', 'Ề', 'Ể', 'Ễ', 'Ệ', 'Ê']),
	('u', &['ú', 'ù', 'ủ', 'ũ', 'ụ', 'ứ', 'ừ', 'ử', 'ữ', 'ự', 'ư']),
	('U', &['Ú', 'Ù', 'Ủ', 'Ũ', 'Ụ', 'Ứ', 'Ừ', 'Ử', 'Ữ', 'Ự', 'Ư']),
	('i', &['í', 'ì', 'ỉ', 'ĩ', 'ị']),
	('I', &['Í', 'Ì', 'Ỉ', 'Ĩ', 'Ị']),
	('y', &['ý', 'ỳ', 'ỷ', 'ỹ', 'ỵ', 'v']),
	('Y', &['Ý', 'Ỳ', 'Ỷ', 'Ỹ', 'Ỵ', 'V']),
	('n', &['m']),
	('N', &['N']),
	('v', &['y']),
	('V', &['Y']),
	('m', &['n']),
	('M', &['N']),
	('C', &['G']),
	('G', &['C']),
];

/// Characters eligible for accent-preserving substitution.
pub const ACCENT_CLASS: &str = concat!(
	"aàảãáạăằẳẵắặâầẩẫấậAÀẢÃÁẠĂẰẲẴẮẶÂẦẨẪẤẬ",
	"oòỏõóọôồổỗốộơờởỡớợOÒỎÕÓỌÔỒỔỖỐỘƠỜỞỠỢ",
	"eèẻẽéẹêềểễếệEÈẺẼÉẸÊỀỂỄẾỆ",
	"uùủũúụưừửữứựUÙỦŨÚỤƯỪỬỮỨỰ",
	"iìỉĩíịIÌỈĨÍỊ",
	"yỳỷỹýỵYỲỶỸÝỴ",
	"nNvVmMCG",
);

static VIETNAMESE: Lazy<CharTables> = Lazy::new(|| {
	// The built-in data is checked by `builtin_tables_are_consistent`.
	CharTables::build(TONE_GROUPS, TYPO_PAIRS, SAME_TONE, ACCENT_CLASS)
		.expect("built-in Vietnamese tables are consistent")
});

/// Immutable lookup tables used by every stage.
///
/// Built once and shared read-only between pipelines (and threads).
///
/// ## Invariants
/// - `reverse` is the exact inverse of `groups`: every variant maps back to
///   the base letter that lists it
/// - No variant is listed under two base letters
#[derive(Debug, Clone)]
pub struct CharTables {
	/// Base letters in table order (used for uniform base selection).
	bases: Vec<char>,
	groups: HashMap<char, &'static [char]>,
	reverse: HashMap<char, char>,
	typo_pairs: &'static [(&'static str, &'static str)],
	same_tone: HashMap<char, &'static [char]>,
	accent_class: HashSet<char>,
}

impl CharTables {
	/// Builds the tables and derives the reverse lookup.
	///
	/// # Errors
	/// Returns `AugmentError::DuplicateVariant` if a variant appears under
	/// two different base letters.
	pub fn build(
		tone_groups: &'static [ToneGroup],
		typo_pairs: &'static [(&'static str, &'static str)],
		same_tone: &'static [(char, &'static [char])],
		accent_class: &str,
	) -> Result<Self, AugmentError> {
		let mut bases = Vec::with_capacity(tone_groups.len());
		let mut groups = HashMap::with_capacity(tone_groups.len());
		let mut reverse = HashMap::new();

		for group in tone_groups {
			bases.push(group.base);
			groups.insert(group.base, group.variants);
			for &variant in group.variants {
				if let Some(&first) = reverse.get(&variant) {
					if first != group.base {
						return Err(AugmentError::DuplicateVariant {
							variant,
							first,
							second: group.base,
						});
					}
				}
				reverse.insert(variant, group.base);
			}
		}

		Ok(Self {
			bases,
			groups,
			reverse,
			typo_pairs,
			same_tone: same_tone.iter().copied().collect(),
			accent_class: accent_class.chars().collect(),
		})
	}

	/// The built-in Vietnamese tables.
	pub fn vietnamese() -> &'static CharTables {
		&VIETNAMESE
	}

	/// Base letter of an accented variant, if `c` is one.
	pub fn base_of(&self, c: char) -> Option<char> {
		self.reverse.get(&c).copied()
	}

	/// Variants listed under `base`.
	pub fn group(&self, base: char) -> Option<&'static [char]> {
		self.groups.get(&base).copied()
	}

	/// Tone group of the variant `c`.
	///
	/// Returns `Ok(None)` if `c` is not an accented variant.
	///
	/// # Errors
	/// `AugmentError::MissingGroup` if the reverse lookup names a base
	/// letter with no group.
	pub fn group_of(&self, c: char) -> Result<Option<&'static [char]>, AugmentError> {
		match self.base_of(c) {
			Some(base) => self.group(base).map(Some).ok_or(AugmentError::MissingGroup { base }),
			None => Ok(None),
		}
	}

	/// Base letters in table order.
	pub fn bases(&self) -> &[char] {
		&self.bases
	}

	pub fn typo_pairs(&self) -> &[(&'static str, &'static str)] {
		self.typo_pairs
	}

	pub fn same_tone(&self, base: char) -> Option<&'static [char]> {
		self.same_tone.get(&base).copied()
	}

	pub fn is_accent_bearing(&self, c: char) -> bool {
		self.accent_class.contains(&c)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_tables_are_consistent() {
		assert!(CharTables::build(TONE_GROUPS, TYPO_PAIRS, SAME_TONE, ACCENT_CLASS).is_ok());
	}

	#[test]
	fn reverse_lookup_inverts_every_group() {
		let tables = CharTables::vietnamese();
		for group in TONE_GROUPS {
			for &variant in group.variants {
				assert_eq!(tables.base_of(variant), Some(group.base), "variant {variant}");
			}
		}
		let total: usize = TONE_GROUPS.iter().map(|g| g.variants.len()).sum();
		assert_eq!(tables.reverse.len(), total);
	}

	#[test]
	fn base_letters_are_not_variants() {
		let tables = CharTables::vietnamese();
		for &base in tables.bases() {
			assert_eq!(tables.base_of(base), None);
		}
		assert_eq!(tables.bases(), &['a', 'd', 'e', 'i', 'o', 'u', 'y']);
	}

	#[test]
	fn duplicate_variant_is_rejected() {
		static BROKEN: &[ToneGroup] = &[
			ToneGroup { base: 'a', variants: &['á', 'x'] },
			ToneGroup { base: 'e', variants: &['é', 'x'] },
		];
		let err = CharTables::build(BROKEN, TYPO_PAIRS, SAME_TONE, ACCENT_CLASS).unwrap_err();
		assert_eq!(err, AugmentError::DuplicateVariant { variant: 'x', first: 'a', second: 'e' });
	}

	#[test]
	fn typo_pairs_have_no_duplicates() {
		let unique: HashSet<_> = TYPO_PAIRS.iter().collect();
		assert_eq!(unique.len(), TYPO_PAIRS.len());
	}

	#[test]
	fn accent_class_membership() {
		let tables = CharTables::vietnamese();
		assert!(tables.is_accent_bearing('ệ'));
		assert!(tables.is_accent_bearing('Ư'));
		assert!(tables.is_accent_bearing('G'));
		assert!(!tables.is_accent_bearing('g'));
		assert!(!tables.is_accent_bearing('đ'));
		assert!(!tables.is_accent_bearing(' '));
	}
}
