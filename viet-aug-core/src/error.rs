//! Error types shared by the augmentation pipeline, its configuration and
//! the record I/O helpers.

use std::path::PathBuf;

use thiserror::Error;

/// Faults raised inside the pipeline.
///
/// A stage whose precondition is not met (nothing to delete, no token to
/// pick) is a silent no-op and never produces one of these. They only
/// signal inconsistent lookup data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AugmentError {
	#[error("variant `{variant}` is listed under both `{first}` and `{second}`")]
	DuplicateVariant { variant: char, first: char, second: char },
	#[error("no tone group registered for base letter `{base}`")]
	MissingGroup { base: char },
	#[error("stage `{stage}` tried to choose from an empty candidate list")]
	EmptyChoice { stage: &'static str },
}

/// Invalid or unreadable augmentation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("{name} must be a probability in [0, 1], got {value}")]
	OutOfRange { name: &'static str, value: f64 },
	#[error("{name} must be at least 1")]
	Zero { name: &'static str },
	#[error("{name} must be at most {max}, got {value}")]
	TooLarge { name: &'static str, value: usize, max: usize },
	#[error("failed to read configuration {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

/// Failures of the file-level helpers (batch augmentation, CSV conversion).
#[derive(Debug, Error)]
pub enum DataError {
	#[error("I/O error on {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error(transparent)]
	Csv(#[from] csv::Error),
	#[error(transparent)]
	Json(#[from] serde_json::Error),
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl DataError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}
