use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::augment::Augmenter;
use crate::augment::stages::roll;
use crate::config::AugmentationConfig;
use crate::error::{ConfigError, DataError};
use crate::io::{read_lines, write_jsonl};
use crate::record::Record;

/// Turns raw lines into clean samples ready for augmentation.
///
/// # Behavior
/// - Trims every line and drops empty ones.
/// - With probability `combine_sentences_probability`, joins a line with the
///   following one (single space) when the result still fits in
///   `max_length` characters.
/// - Skips samples longer than `max_length` characters.
pub fn prepare_samples<R: Rng>(lines: &[String], config: &AugmentationConfig, rng: &mut R) -> Vec<String> {
	let mut cleaned = lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()).peekable();
	let mut samples = Vec::new();

	while let Some(line) = cleaned.next() {
		let mut sample = line.to_owned();
		let length = sample.chars().count();

		if let Some(next) = cleaned.peek() {
			if roll(rng, config.combine_sentences_probability)
				&& length + 1 + next.chars().count() <= config.max_length
			{
				sample.push(' ');
				sample.push_str(next);
				cleaned.next();
			}
		}

		if sample.chars().count() > config.max_length {
			warn!("skipping sample longer than {} characters: {:?}", config.max_length, sample);
			continue;
		}
		samples.push(sample);
	}

	samples
}

/// Produces `augmentations_per_sample` records for every sample.
///
/// Samples are split into chunks of `batch_size`, processed on up to
/// `num_cpus` threads. Each chunk gets its own `Augmenter`; with a `seed`
/// the chunk seeds are derived from it, so the output only depends on the
/// seed and the input, not on the number of threads.
///
/// Records are returned in input order.
pub fn augment_samples(
	samples: &[String],
	config: &AugmentationConfig,
	seed: Option<u64>,
) -> Result<Vec<Record>, ConfigError> {
	config.validate()?;
	if samples.is_empty() {
		return Ok(Vec::new());
	}

	let chunks: Vec<&[String]> = samples.chunks(config.batch_size).collect();
	let workers = num_cpus::get().clamp(1, chunks.len());

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for worker in 0..workers {
			let tx = tx.clone();
			let chunks = &chunks;
			scope.spawn(move || {
				for index in (worker..chunks.len()).step_by(workers) {
					let chunk_seed = seed.map(|s| s.wrapping_add(1 + index as u64));
					let records = augment_chunk(chunks[index], config, chunk_seed);
					if tx.send((index, records)).is_err() {
						return;
					}
				}
			});
		}
		drop(tx);
	});

	let mut partials: Vec<(usize, Result<Vec<Record>, ConfigError>)> = rx.iter().collect();
	partials.sort_by_key(|(index, _)| *index);

	let mut records = Vec::new();
	for (_, partial) in partials {
		records.extend(partial?);
	}
	Ok(records)
}

fn augment_chunk(
	chunk: &[String],
	config: &AugmentationConfig,
	seed: Option<u64>,
) -> Result<Vec<Record>, ConfigError> {
	let mut augmenter = match seed {
		Some(seed) => Augmenter::with_seed(config.clone(), seed)?,
		None => Augmenter::new(config.clone())?,
	};

	let mut records = Vec::new();
	for sample in chunk {
		for _ in 0..config.augmentations_per_sample {
			records.push(Record::new(augmenter.augment(sample), sample.as_str()));
		}
	}
	debug!("augmented chunk of {} samples", chunk.len());
	Ok(records)
}

/// Reads clean lines from `input`, augments them and writes JSONL records
/// to `output`.
///
/// # Returns
/// The number of records written.
pub fn augment_file<PI, PO>(
	input: PI,
	output: PO,
	config: &AugmentationConfig,
	seed: Option<u64>,
) -> Result<usize, DataError>
where
	PI: AsRef<Path>,
	PO: AsRef<Path>,
{
	config.validate()?;
	let lines = read_lines(&input)?;

	let mut rng = match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};
	let samples = prepare_samples(&lines, config, &mut rng);
	let records = augment_samples(&samples, config, seed)?;
	let written = write_jsonl(&output, &records)?;

	info!(
		"{} lines -> {} samples -> {} records written to {}",
		lines.len(),
		samples.len(),
		written,
		output.as_ref().display()
	);
	Ok(written)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lines(items: &[&str]) -> Vec<String> {
		items.iter().map(|s| s.to_string()).collect()
	}

	fn config(combine: f64, max_length: usize) -> AugmentationConfig {
		AugmentationConfig {
			combine_sentences_probability: combine,
			max_length,
			..AugmentationConfig::default()
		}
	}

	#[test]
	fn prepare_trims_and_drops_blank_lines() {
		let mut rng = StdRng::seed_from_u64(1);
		let samples = prepare_samples(&lines(&["  xin chào ", "", "   ", "tạm biệt"]), &config(0.0, 256), &mut rng);
		assert_eq!(samples, vec!["xin chào", "tạm biệt"]);
	}

	#[test]
	fn prepare_combines_pairs() {
		let mut rng = StdRng::seed_from_u64(1);
		let samples = prepare_samples(&lines(&["một", "hai", "ba"]), &config(1.0, 256), &mut rng);
		assert_eq!(samples, vec!["một hai", "ba"]);
	}

	#[test]
	fn prepare_respects_max_length() {
		let mut rng = StdRng::seed_from_u64(1);
		let samples = prepare_samples(&lines(&["bốn", "năm", "quá dài rồi"]), &config(1.0, 7), &mut rng);
		assert_eq!(samples, vec!["bốn năm"]);
	}

	#[test]
	fn augments_every_sample_in_order() {
		let config = AugmentationConfig {
			augmentations_per_sample: 3,
			batch_size: 2,
			..AugmentationConfig::default()
		};
		let samples = lines(&["một", "hai", "ba", "bốn", "năm"]);
		let records = augment_samples(&samples, &config, Some(7)).unwrap();

		assert_eq!(records.len(), 15);
		let outputs: Vec<&str> = records.iter().map(|r| r.output.as_str()).collect();
		assert_eq!(&outputs[..6], &["một", "một", "một", "hai", "hai", "hai"]);
		assert_eq!(outputs[14], "năm");
	}

	#[test]
	fn seeded_batches_are_reproducible() {
		let config = AugmentationConfig {
			augmentation_probability: 1.0,
			batch_size: 1,
			augmentations_per_sample: 2,
			..AugmentationConfig::default()
		};
		let samples = lines(&["Tiếng Việt", "Hà Nội", "Sài Gòn"]);
		assert_eq!(
			augment_samples(&samples, &config, Some(99)).unwrap(),
			augment_samples(&samples, &config, Some(99)).unwrap()
		);
	}

	#[test]
	fn oversized_augmentation_count_is_an_error() {
		let config = AugmentationConfig {
			augmentations_per_sample: usize::MAX / 2,
			..AugmentationConfig::default()
		};
		let err = augment_samples(&lines(&["a", "b", "c"]), &config, Some(1)).unwrap_err();
		assert!(matches!(err, ConfigError::TooLarge { .. }));
	}

	#[test]
	fn empty_batch() {
		assert!(augment_samples(&[], &AugmentationConfig::default(), None).unwrap().is_empty());
	}

	#[test]
	fn augments_file_to_jsonl() {
		let dir = tempfile::tempdir().unwrap();
		let input = dir.path().join("clean.txt");
		let output = dir.path().join("clean.jsonl");
		std::fs::write(&input, "xin chào\n\ntạm biệt\n").unwrap();

		let config = AugmentationConfig {
			combine_sentences_probability: 0.0,
			augmentations_per_sample: 4,
			..AugmentationConfig::default()
		};
		assert_eq!(augment_file(&input, &output, &config, Some(3)).unwrap(), 8);

		let records: Vec<Record> = std::fs::read_to_string(&output)
			.unwrap()
			.lines()
			.map(|l| serde_json::from_str(l).unwrap())
			.collect();
		assert_eq!(records.len(), 8);
		assert!(records[..4].iter().all(|r| r.output == "xin chào"));
		assert!(records[4..].iter().all(|r| r.output == "tạm biệt"));
	}
}
