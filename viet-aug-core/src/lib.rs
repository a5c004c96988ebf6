//! Synthetic noise generation for Vietnamese text.
//!
//! This crate turns clean Vietnamese sentences into realistic misspelled
//! variants for training spelling-correction models:
//! - Tone and diacritic substitutions, accent removal
//! - Initial consonant confusions (`tr`/`ch`, `n`/`l`, ...)
//! - Random insertion, deletion and replacement of Vietnamese letters
//! - Casing and punctuation drift
//!
//! The pipeline itself lives in [`augment`]; the remaining modules feed it
//! (configuration) or consume it (batch generation, record files).
//!
//! ```
//! use viet_aug_core::augment::Augmenter;
//! use viet_aug_core::config::AugmentationConfig;
//!
//! let mut augmenter = Augmenter::with_seed(AugmentationConfig::default(), 7).unwrap();
//! let noisy = augmenter.augment("Xin chào các bạn");
//! assert!(!noisy.is_empty());
//! ```

/// The augmentation pipeline, its stages and lookup tables.
pub mod augment;

/// Batch generation of training records from clean lines.
pub mod batch;

/// Pipeline and batch parameters.
pub mod config;

/// CSV → JSONL record conversion.
pub mod convert;

pub mod error;

/// File helpers (line reading, output paths, JSONL writing).
pub mod io;

pub mod record;
