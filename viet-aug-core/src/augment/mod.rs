//! Vietnamese noise-injection pipeline.
//!
//! This module contains:
//! - The character equivalence tables (`CharTables`)
//! - The individual randomized stages
//! - The ordered pipeline (`Augmenter`, `Stage`)

/// Accent removal helpers.
pub mod accent;

/// `Augmenter` and the `Stage` enumeration.
///
/// Composes the stages in their fixed order and applies the
/// return-the-original fallback on failure.
pub mod pipeline;

/// Stage implementations, each a pure function of
/// (text, probability, tables, random source).
pub mod stages;

/// Static lookup data: tone groups, reverse lookup, typo pairs, same-tone
/// table and the accent-bearing character class.
pub mod tables;

/// Whitespace tokenization preserving separators.
mod tokens;

pub use accent::remove_accents;
pub use pipeline::{Augmenter, Stage};
pub use tables::CharTables;
