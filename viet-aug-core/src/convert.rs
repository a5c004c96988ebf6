use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::DataError;
use crate::io::write_jsonl;
use crate::record::Record;

/// A CSV row; absent columns read as empty strings.
#[derive(Deserialize)]
struct CsvRow {
	#[serde(default)]
	input: String,
	#[serde(default)]
	output: String,
}

/// Converts a headed CSV with `input`/`output` columns into line-delimited
/// JSON records.
///
/// Both fields are trimmed. Other columns are ignored.
///
/// # Returns
/// The number of records written.
pub fn csv_to_jsonl<PC, PJ>(csv_path: PC, jsonl_path: PJ) -> Result<usize, DataError>
where
	PC: AsRef<Path>,
	PJ: AsRef<Path>,
{
	let records = read_csv_records(csv_path.as_ref())?;
	let written = write_jsonl(jsonl_path.as_ref(), &records)?;
	info!(
		"converted {} rows from {} to {}",
		written,
		csv_path.as_ref().display(),
		jsonl_path.as_ref().display()
	);
	Ok(written)
}

fn read_csv_records(path: &Path) -> Result<Vec<Record>, DataError> {
	let mut reader = csv::Reader::from_path(path)?;
	let mut records = Vec::new();
	for row in reader.deserialize() {
		let row: CsvRow = row?;
		records.push(Record::new(row.input.trim(), row.output.trim()));
	}
	Ok(records)
}
