use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_markov_core::MarkovError;
use rs_markov_core::io::read_seed_line;
use rs_markov_core::model::{ChainInput, MarkovModel, StartSeed};
use rs_markov_core::text::{WORDS_PER_LINE, format_lines};

#[derive(Parser)]
#[command(name = "rs-markov", about = "Generate text from a word-level Markov chain")]
struct Cli {
	/// Corpus file to learn from
	file: PathBuf,

	/// Number of slots in the prefix table (never grows)
	#[arg(long, short = 'c')]
	capacity: usize,

	/// Number of words in a prefix
	#[arg(long, short = 'p', default_value_t = 2)]
	prefix_len: usize,

	/// Maximum number of generated words
	#[arg(long, short = 'n')]
	words: usize,

	/// Seed of the random generator, fixed for reproducible output
	#[arg(long, default_value_t = 8)]
	rng_seed: u64,

	/// Start words; defaults to the first line of the corpus
	#[arg(long, num_args = 1.., conflicts_with = "from_start")]
	seed: Option<Vec<String>>,

	/// Start where the corpus starts, using the boundary markers
	#[arg(long, default_value_t = false)]
	from_start: bool,
}

fn run(cli: &Cli) -> Result<()> {
	// Validate before touching the corpus, so a bad run prints nothing
	if cli.prefix_len < 1 {
		return Err(MarkovError::InvalidPrefixLength(cli.prefix_len).into());
	}
	let mut input = ChainInput::new(cli.words)?;

	let model = MarkovModel::from_file(&cli.file, cli.prefix_len, cli.capacity)
		.with_context(|| format!("failed to index {}", cli.file.display()))?;
	info!("table usage: {:?}", model.stats());

	input.start_seed = if cli.from_start {
		StartSeed::Boundary
	} else if let Some(seed) = &cli.seed {
		StartSeed::Custom(seed.clone())
	} else {
		// Second pass over the source for the seed prefix
		StartSeed::Custom(read_seed_line(&cli.file, cli.prefix_len)?)
	};
	debug!("start seed: {:?}", input.start_seed);

	let mut rng = StdRng::seed_from_u64(cli.rng_seed);
	let chain = model.generate(&input, &mut rng)?;
	for line in format_lines(&chain, WORDS_PER_LINE) {
		println!("{}", line);
	}
	Ok(())
}

fn main() -> ExitCode {
	env_logger::init();
	let cli = Cli::parse();

	match run(&cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("ERROR: {:#}", e);
			ExitCode::FAILURE
		}
	}
}
