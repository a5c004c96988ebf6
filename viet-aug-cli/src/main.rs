use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;
use viet_aug_core::augment::Augmenter;
use viet_aug_core::batch::augment_file;
use viet_aug_core::config::AugmentationConfig;
use viet_aug_core::convert::csv_to_jsonl;
use viet_aug_core::io::build_output_path;

/// Generate noisy Vietnamese text for spelling-correction training.
#[derive(Debug, Parser)]
#[command(name = "viet-aug", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print augmented variants of TEXT (or of every stdin line).
    Augment(AugmentArgs),
    /// Augment a file of clean lines into JSONL training records.
    Batch(BatchArgs),
    /// Convert a CSV with `input`/`output` columns to JSONL.
    CsvToJsonl(ConvertArgs),
    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// JSON configuration file (defaults are used when omitted).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct AugmentArgs {
    /// Text to augment; reads stdin line by line when omitted.
    text: Option<String>,
    /// Number of variants per input.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// File of clean sentences, one per line.
    input: PathBuf,
    /// Output JSONL file (defaults to INPUT with a `.jsonl` extension).
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Args)]
struct ConvertArgs {
    /// CSV file with a header row.
    input: PathBuf,
    /// Output JSONL file (defaults to INPUT with a `.jsonl` extension).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ConfigArgs {
    fn load(&self) -> Result<AugmentationConfig, Box<dyn std::error::Error>> {
        match &self.config {
            Some(path) => Ok(AugmentationConfig::from_json_file(path)?),
            None => Ok(AugmentationConfig::default()),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn output_path(input: &Path, output: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match output {
        Some(path) => Ok(path),
        None => Ok(build_output_path(input, "jsonl")?),
    }
}

fn run_augment(args: AugmentArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.config.load()?;
    let mut augmenter = match args.seed {
        Some(seed) => Augmenter::with_seed(config, seed)?,
        None => Augmenter::new(config)?,
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let inputs: Vec<String> = match args.text {
        Some(text) => vec![text],
        None => io::stdin().lock().lines().collect::<Result<_, _>>()?,
    };
    for text in &inputs {
        for _ in 0..args.count {
            writeln!(out, "{}", augmenter.augment(text))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Augment(args) => run_augment(args)?,
        Commands::Batch(args) => {
            let config = args.config.load()?;
            let output = output_path(&args.input, args.output)?;
            let written = augment_file(&args.input, &output, &config, args.seed)?;
            println!("{} records written to {}", written, output.display());
        }
        Commands::CsvToJsonl(args) => {
            let output = output_path(&args.input, args.output)?;
            let written = csv_to_jsonl(&args.input, &output)?;
            println!("{} records written to {}", written, output.display());
        }
        Commands::Config(args) => {
            println!("{}", serde_json::to_string_pretty(&args.load()?)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_augment_with_count_and_seed() {
        let cli = Cli::try_parse_from(["viet-aug", "-vv", "augment", "xin chào", "-n", "3", "--seed", "7"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Augment(args) => {
                assert_eq!(args.text.as_deref(), Some("xin chào"));
                assert_eq!(args.count, 3);
                assert_eq!(args.seed, Some(7));
                assert!(args.config.config.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn default_output_path_uses_jsonl() {
        assert_eq!(output_path(Path::new("data/vi.csv"), None).unwrap(), PathBuf::from("data/vi.jsonl"));
        assert_eq!(
            output_path(Path::new("data/vi.csv"), Some(PathBuf::from("x.jsonl"))).unwrap(),
            PathBuf::from("x.jsonl")
        );
    }
}
