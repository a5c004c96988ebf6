use proptest::prelude::*;
use viet_aug_core::augment::tables::TONE_GROUPS;
use viet_aug_core::augment::{Augmenter, CharTables, Stage};
use viet_aug_core::config::AugmentationConfig;

fn with_all(p: f64) -> AugmentationConfig {
	AugmentationConfig {
		augmentation_probability: p,
		char_delete_percentage: p,
		lower_case_words_probability: p,
		nl_swap_probability: p,
		replace_accent_chars_ratio: p,
		remove_random_accent_ratio: p,
		delete_word_probability: p,
		..AugmentationConfig::default()
	}
}

#[test]
fn probability_zero_is_identity_for_sample() {
	let mut augmenter = Augmenter::with_seed(with_all(0.0), 1).unwrap();
	for _ in 0..20 {
		assert_eq!(augmenter.augment("Xin chào các bạn"), "Xin chào các bạn");
	}
}

#[test]
fn probability_one_is_reproducible() {
	let text = "Người Việt Nam luôn lạc quan; giá 2.500,75 đồng.";
	let run = |seed| {
		let mut augmenter = Augmenter::with_seed(with_all(1.0), seed).unwrap();
		(0..10).map(|_| augmenter.augment(text)).collect::<Vec<_>>()
	};
	assert_eq!(run(2024), run(2024));
}

#[test]
fn probability_one_changes_text() {
	let mut augmenter = Augmenter::with_seed(with_all(1.0), 5).unwrap();
	assert_ne!(augmenter.augment("Trường học ở Hà Nội"), "Trường học ở Hà Nội");
}

#[test]
fn reverse_lookup_is_exact_inverse() {
	let tables = CharTables::vietnamese();
	for group in TONE_GROUPS {
		for &variant in group.variants {
			assert_eq!(tables.base_of(variant), Some(group.base));
			let owners = TONE_GROUPS.iter().filter(|g| g.variants.contains(&variant)).count();
			assert_eq!(owners, 1, "{variant} belongs to {owners} groups");
		}
	}
}

#[test]
fn digit_adjacent_punctuation_survives_pipeline() {
	let mut augmenter = Augmenter::with_seed(with_all(0.0), 3).unwrap();
	assert_eq!(augmenter.augment("giá 1.000,50 đồng!"), "giá 1.000,50 đồng");
}

#[test]
fn deletion_on_accent_free_text() {
	let config = AugmentationConfig { char_delete_percentage: 1.0, ..with_all(0.0) };
	let mut augmenter = Augmenter::with_seed(config, 8).unwrap();
	for _ in 0..20 {
		assert_eq!(augmenter.apply(Stage::CharDelete, "xin chao").unwrap(), "xin chao");
	}
}

proptest! {
	#[test]
	fn augment_is_total(text in "\\PC{0,40}", seed in any::<u64>(), p in 0.0f64..=1.0) {
		let mut augmenter = Augmenter::with_seed(with_all(p), seed).unwrap();
		let _ = augmenter.augment(&text);
		prop_assert!(augmenter.try_augment(&text).is_ok());
	}

	#[test]
	fn whitespace_only_passes_through(text in "[ \t\n]{0,12}", seed in any::<u64>()) {
		let mut augmenter = Augmenter::with_seed(with_all(1.0), seed).unwrap();
		prop_assert_eq!(augmenter.augment(&text), text);
	}

	#[test]
	fn replacement_never_keeps_char(seed in any::<u64>()) {
		let config = AugmentationConfig { augmentation_probability: 1.0, ..with_all(0.0) };
		let mut augmenter = Augmenter::with_seed(config, seed).unwrap();
		let out = augmenter.apply(Stage::CharReplace, "ấy ơi ừ").unwrap();
		for (before, after) in "ấy ơi ừ".chars().zip(out.chars()) {
			if before != ' ' && before != 'y' && before != 'i' {
				prop_assert_ne!(before, after);
			}
		}
	}
}
