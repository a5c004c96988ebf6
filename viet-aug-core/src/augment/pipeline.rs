use std::fmt;

use log::{debug, error, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::stages;
use super::tables::CharTables;
use crate::config::AugmentationConfig;
use crate::error::{AugmentError, ConfigError};

/// One independently gated transformation step.
///
/// The first ten variants form the default pipeline ([`Stage::PIPELINE`]);
/// `DeleteWord` and `SwapCase` are only run when asked for explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
	TypoSwap,
	NlSwap,
	ToneChange,
	CharDelete,
	CharInsert,
	CharReplace,
	LowerCaseWords,
	StripPunctuation,
	RemoveAccent,
	ReplaceAccent,
	DeleteWord,
	SwapCase,
}

impl Stage {
	/// Stage order of [`Augmenter::augment`].
	///
	/// The transforms do not commute, so this order is part of the contract.
	pub const PIPELINE: [Stage; 10] = [
		Stage::TypoSwap,
		Stage::NlSwap,
		Stage::ToneChange,
		Stage::CharDelete,
		Stage::CharInsert,
		Stage::CharReplace,
		Stage::LowerCaseWords,
		Stage::StripPunctuation,
		Stage::RemoveAccent,
		Stage::ReplaceAccent,
	];

	pub fn name(self) -> &'static str {
		match self {
			Stage::TypoSwap => "typo_swap",
			Stage::NlSwap => "nl_swap",
			Stage::ToneChange => "tone_change",
			Stage::CharDelete => "char_delete",
			Stage::CharInsert => "char_insert",
			Stage::CharReplace => "char_replace",
			Stage::LowerCaseWords => "lower_case_words",
			Stage::StripPunctuation => "strip_punctuation",
			Stage::RemoveAccent => "remove_accent",
			Stage::ReplaceAccent => "replace_accent",
			Stage::DeleteWord => "delete_word",
			Stage::SwapCase => "swap_case",
		}
	}

	/// Gate probability of this stage under `config`.
	///
	/// `StripPunctuation` is not gated and always reports `1.0`.
	pub fn probability(self, config: &AugmentationConfig) -> f64 {
		match self {
			Stage::TypoSwap
			| Stage::ToneChange
			| Stage::CharInsert
			| Stage::CharReplace => config.augmentation_probability,
			Stage::NlSwap => config.nl_swap_probability,
			Stage::CharDelete => config.char_delete_percentage,
			Stage::LowerCaseWords => config.lower_case_words_probability,
			Stage::StripPunctuation => 1.0,
			Stage::RemoveAccent => config.remove_random_accent_ratio,
			Stage::ReplaceAccent => config.replace_accent_chars_ratio,
			Stage::DeleteWord => config.delete_word_probability,
			Stage::SwapCase => config.augmentation_probability / 2.0,
		}
	}

	fn run<R: Rng>(
		self,
		text: &str,
		config: &AugmentationConfig,
		tables: &CharTables,
		rng: &mut R,
	) -> Result<String, AugmentError> {
		let p = self.probability(config);
		match self {
			Stage::TypoSwap => stages::swap_typos(text, p, tables, rng),
			Stage::NlSwap => stages::swap_n_l(text, p, rng),
			Stage::ToneChange => stages::modify_tones(text, p, tables, rng),
			Stage::CharDelete => stages::delete_character(text, p, tables, rng),
			Stage::CharInsert => stages::insert_character(text, p, tables, rng),
			Stage::CharReplace => stages::replace_character(text, p, tables, rng),
			Stage::LowerCaseWords => stages::lower_case_words(text, p, rng),
			Stage::StripPunctuation => Ok(stages::strip_punctuation(text)),
			Stage::RemoveAccent => stages::remove_random_accent(text, p, rng),
			Stage::ReplaceAccent => stages::replace_accent_chars(text, p, tables, rng),
			Stage::DeleteWord => stages::delete_word(text, p, rng),
			Stage::SwapCase => stages::swap_case(text, p, rng),
		}
	}
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Applies the augmentation pipeline to single strings.
///
/// An `Augmenter` owns its configuration and its random source; the lookup
/// tables are shared. Use one instance per thread (or guard it with a lock):
/// every call advances the random source.
///
/// # Determinism
/// Two augmenters built with the same seed and configuration produce the
/// same outputs for the same sequence of inputs.
#[derive(Debug, Clone)]
pub struct Augmenter<R = StdRng> {
	config: AugmentationConfig,
	tables: &'static CharTables,
	rng: R,
}

impl Augmenter<StdRng> {
	/// Creates an augmenter seeded from the operating system.
	///
	/// # Errors
	/// Returns an error if the configuration is invalid.
	pub fn new(config: AugmentationConfig) -> Result<Self, ConfigError> {
		Self::with_rng(config, StdRng::from_os_rng())
	}

	/// Creates an augmenter with a reproducible random sequence.
	pub fn with_seed(config: AugmentationConfig, seed: u64) -> Result<Self, ConfigError> {
		Self::with_rng(config, StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> Augmenter<R> {
	/// Creates an augmenter around a caller-supplied random source.
	///
	/// # Errors
	/// Returns an error if the configuration is invalid.
	pub fn with_rng(config: AugmentationConfig, rng: R) -> Result<Self, ConfigError> {
		Self::with_tables(config, CharTables::vietnamese(), rng)
	}

	/// Creates an augmenter over custom lookup tables.
	///
	/// # Errors
	/// Returns an error if the configuration is invalid.
	pub fn with_tables(config: AugmentationConfig, tables: &'static CharTables, rng: R) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self { config, tables, rng })
	}

	pub fn config(&self) -> &AugmentationConfig {
		&self.config
	}

	/// Produces one noisy variant of `text`.
	///
	/// Never fails: if a stage reports a fault, the fault is logged and the
	/// untouched input is returned.
	pub fn augment(&mut self, text: &str) -> String {
		match self.try_augment(text) {
			Ok(augmented) => augmented,
			Err(e) => {
				error!("augmentation failed for {text:?}: {e}");
				text.to_owned()
			}
		}
	}

	/// Runs every stage of [`Stage::PIPELINE`] in order.
	///
	/// # Errors
	/// Returns the first stage fault; partial results are discarded.
	pub fn try_augment(&mut self, text: &str) -> Result<String, AugmentError> {
		debug!("augment in: {text:?}");
		let mut current = text.to_owned();
		for stage in Stage::PIPELINE {
			current = self.apply(stage, &current)?;
		}
		debug!("augment out: {current:?}");
		Ok(current)
	}

	/// Runs a single stage, including the ones outside the default pipeline.
	pub fn apply(&mut self, stage: Stage, text: &str) -> Result<String, AugmentError> {
		let out = stage.run(text, &self.config, self.tables, &mut self.rng)?;
		trace!("{stage}: {text:?} -> {out:?}");
		Ok(out)
	}
}
