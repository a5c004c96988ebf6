use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound of `augmentations_per_sample`.
pub const MAX_AUGMENTATIONS_PER_SAMPLE: usize = 10_000;

/// Parameters of the augmentation pipeline and of batch generation.
///
/// Serialized with the upper-case option names (`AUGMENTATION_PROBABILITY`,
/// ...). Options missing from a configuration file keep their default.
///
/// # Invariants
/// - Every probability is finite and within `[0, 1]`
/// - `batch_size`, `max_length` and `augmentations_per_sample` are `>= 1`
/// - `augmentations_per_sample <= MAX_AUGMENTATIONS_PER_SAMPLE`
///
/// Both are checked by [`AugmentationConfig::validate`], which every
/// constructor in this crate calls.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct AugmentationConfig {
	/// Shared gate of typo swap, tone change, insertion, replacement and
	/// (halved) case swap.
	pub augmentation_probability: f64,
	pub char_delete_percentage: f64,
	pub lower_case_words_probability: f64,
	/// Chance that batch preparation joins a sample with the next one.
	pub combine_sentences_probability: f64,
	pub delete_word_probability: f64,
	pub replace_accent_chars_ratio: f64,
	pub remove_random_accent_ratio: f64,
	pub nl_swap_probability: f64,
	/// Samples per worker chunk during batch augmentation.
	pub batch_size: usize,
	/// Longest clean sample (in characters) accepted by batch preparation.
	pub max_length: usize,
	pub augmentations_per_sample: usize,
}

impl Default for AugmentationConfig {
	fn default() -> Self {
		Self {
			augmentation_probability: 0.3,
			char_delete_percentage: 0.1,
			lower_case_words_probability: 0.2,
			combine_sentences_probability: 1.0,
			delete_word_probability: 0.1,
			replace_accent_chars_ratio: 0.15,
			remove_random_accent_ratio: 0.15,
			nl_swap_probability: 0.2,
			batch_size: 1000,
			max_length: 256,
			augmentations_per_sample: 15,
		}
	}
}

impl AugmentationConfig {
	/// Parses and validates a JSON configuration.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a JSON configuration file.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_json_str(&json)
	}

	/// Checks the invariants listed on the type.
	///
	/// # Errors
	/// - `ConfigError::OutOfRange` for a probability outside `[0, 1]` (or NaN)
	/// - `ConfigError::Zero` for a size of zero
	/// - `ConfigError::TooLarge` for too many augmentations per sample
	pub fn validate(&self) -> Result<(), ConfigError> {
		let probabilities = [
			("AUGMENTATION_PROBABILITY", self.augmentation_probability),
			("CHAR_DELETE_PERCENTAGE", self.char_delete_percentage),
			("LOWER_CASE_WORDS_PROBABILITY", self.lower_case_words_probability),
			("COMBINE_SENTENCES_PROBABILITY", self.combine_sentences_probability),
			("DELETE_WORD_PROBABILITY", self.delete_word_probability),
			("REPLACE_ACCENT_CHARS_RATIO", self.replace_accent_chars_ratio),
			("REMOVE_RANDOM_ACCENT_RATIO", self.remove_random_accent_ratio),
			("NL_SWAP_PROBABILITY", self.nl_swap_probability),
		];
		for (name, value) in probabilities {
			if !(0.0..=1.0).contains(&value) {
				return Err(ConfigError::OutOfRange { name, value });
			}
		}

		let sizes = [
			("BATCH_SIZE", self.batch_size),
			("MAX_LENGTH", self.max_length),
			("AUGMENTATIONS_PER_SAMPLE", self.augmentations_per_sample),
		];
		for (name, value) in sizes {
			if value == 0 {
				return Err(ConfigError::Zero { name });
			}
		}
		if self.augmentations_per_sample > MAX_AUGMENTATIONS_PER_SAMPLE {
			return Err(ConfigError::TooLarge {
				name: "AUGMENTATIONS_PER_SAMPLE",
				value: self.augmentations_per_sample,
				max: MAX_AUGMENTATIONS_PER_SAMPLE,
			});
		}

		Ok(())
	}
}
