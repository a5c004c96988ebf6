use serde::{Deserialize, Serialize};

/// One training pair: a noisy `input` and the clean `output` it should be
/// corrected to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Record {
	pub input: String,
	pub output: String,
}

impl Record {
	pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
		Self {
			input: input.into(),
			output: output.into(),
		}
	}
}
