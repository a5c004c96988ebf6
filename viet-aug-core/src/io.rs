use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::DataError;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_lines<P: AsRef<Path>>(filename: P) -> Result<Vec<String>, DataError> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|e| DataError::io(path, e))?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Default location of the records derived from a data file: next to it,
/// same stem, `extension` instead of the original one (`data/vi.csv` →
/// `data/vi.jsonl`).
///
/// # Errors
/// `DataError::Io` if `source` has no file name to derive a stem from.
pub fn build_output_path<P: AsRef<Path>>(source: P, extension: &str) -> Result<PathBuf, DataError> {
	let source = source.as_ref();
	let stem = source.file_stem().ok_or_else(|| {
		DataError::io(
			source,
			std::io::Error::new(std::io::ErrorKind::InvalidInput, "data file path has no stem"),
		)
	})?;

	let mut records_path = source.with_file_name(stem);
	records_path.set_extension(extension);
	Ok(records_path)
}

/// Writes one JSON object per line.
///
/// Non-ASCII text is written as-is (no `\u` escapes). Returns the number of
/// lines written.
pub fn write_jsonl<P, T>(path: P, records: &[T]) -> Result<usize, DataError>
where
	P: AsRef<Path>,
	T: Serialize,
{
	let path = path.as_ref();
	let file = File::create(path).map_err(|e| DataError::io(path, e))?;
	let mut writer = BufWriter::new(file);

	for record in records {
		serde_json::to_writer(&mut writer, record)?;
		writer.write_all(b"\n").map_err(|e| DataError::io(path, e))?;
	}
	writer.flush().map_err(|e| DataError::io(path, e))?;

	Ok(records.len())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::Record;

	#[test]
	fn output_path_replaces_extension() {
		assert_eq!(build_output_path("data/vi.csv", "jsonl").unwrap(), PathBuf::from("data/vi.jsonl"));
		assert_eq!(build_output_path("clean.txt", "jsonl").unwrap(), PathBuf::from("clean.jsonl"));
		assert!(build_output_path("..", "jsonl").is_err());
	}

	#[test]
	fn jsonl_keeps_vietnamese_unescaped() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out.jsonl");
		let records = vec![Record::new("xin chao", "xin chào"), Record::new("ban", "bạn")];

		assert_eq!(write_jsonl(&path, &records).unwrap(), 2);
		let written = std::fs::read_to_string(&path).unwrap();
		assert_eq!(
			written,
			"{\"input\":\"xin chao\",\"output\":\"xin chào\"}\n{\"input\":\"ban\",\"output\":\"bạn\"}\n"
		);
		assert_eq!(read_lines(&path).unwrap().len(), 2);
	}

	#[test]
	fn missing_input_reports_path() {
		let err = read_lines("/nonexistent/input.txt").unwrap_err();
		assert!(err.to_string().contains("/nonexistent/input.txt"));
	}
}
