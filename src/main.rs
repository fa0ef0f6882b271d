//! prophage-merger: consensus prophage regions from multiple predictors
//!
//! Usage: prophage-merger --virsorter2 <FILE> --checkv <FILE> --genomad <FILE> --vibrant <FILE>

use clap::Parser;
use log::debug;
use std::path::PathBuf;
use std::process;

use prophage_merger::commands::{CombineCommand, MergeCommand};
use prophage_merger::config::{InputPaths, OutputPaths};
use prophage_merger::error::MergerError;

#[derive(Parser)]
#[command(name = "prophage-merger")]
#[command(version)]
#[command(about = "Merge VirSorter2 + CheckV, geNomad and VIBRANT prophage predictions into consensus regions", long_about = None)]
struct Cli {
    /// VirSorter2 boundary file
    #[arg(long, value_parser = existing_file)]
    virsorter2: PathBuf,

    /// CheckV provirus fasta
    #[arg(long, value_parser = existing_file)]
    checkv: PathBuf,

    /// GeNomad provirus file
    #[arg(long, value_parser = existing_file)]
    genomad: PathBuf,

    /// Vibrant prophage file
    #[arg(long, value_parser = existing_file)]
    vibrant: PathBuf,

    /// Output all coordinates [default: all_coordinates.txt]
    #[arg(long, alias = "all_coordinates")]
    all_coordinates: Option<PathBuf>,

    /// Output maximized coordinates [default: final_coordinates.txt]
    #[arg(long, alias = "final_coordinates")]
    final_coordinates: Option<PathBuf>,

    /// Output maximized 0-based coordinates [default: final_coordinates_0-based.bed]
    #[arg(long, alias = "bed_file")]
    bed_file: Option<PathBuf>,

    /// Number of threads to use (default: number of CPUs)
    #[arg(long, short = 't')]
    threads: Option<usize>,

    /// Print run statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("File '{}' does not exist", s))
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "prophage_merger=debug,info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool if --threads specified
    if let Some(n) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
            eprintln!("Error: failed to initialize thread pool: {}", e);
            process::exit(1);
        }
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), MergerError> {
    let inputs = InputPaths::new(cli.virsorter2, cli.checkv, cli.genomad, cli.vibrant);
    let outputs =
        OutputPaths::with_overrides(cli.all_coordinates, cli.final_coordinates, cli.bed_file);
    debug!("Inputs: {:?}", inputs);
    debug!("Outputs: {:?}", outputs);

    let cmd = CombineCommand::new(inputs)
        .with_outputs(outputs)
        .with_merge(MergeCommand::new());
    let stats = cmd.run()?;

    if cli.stats {
        eprintln!("Combine stats: {}", stats);
    }
    Ok(())
}
