#![forbid(unsafe_code)]

use std::path::PathBuf;

use airdrop_builder::logging::{self, LogLevel};
use airdrop_builder::{
    build_round, load_allowlist, read_json, verify_address, verify_round, write_artifacts,
    BuildOptions, InputFormat,
};
use airdrop_common::{HashAlgorithm, ProofFile, RoundConfig};
use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "airdrop-builder")]
#[command(about = "Build and check Merkle airdrop rounds", long_about = None)]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the tree and write the proof and round files
    Build(BuildArgs),
    /// Re-check published proof and round files
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Allowlist: CSV `address,amount` lines or a JSON array
    #[arg(short, long)]
    input: PathBuf,

    /// Force the input format instead of guessing from the extension
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Proof distribution file
    #[arg(long, default_value = "proofs.json")]
    proofs_output: PathBuf,

    /// Round configuration file
    #[arg(long, default_value = "round.json")]
    round_output: PathBuf,

    /// Claim window length recorded in the round file
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..=1825)
    )]
    claim_period_days: u64,

    #[arg(long, value_enum, default_value_t = AlgorithmArg::Keccak256)]
    hash_algorithm: AlgorithmArg,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    #[arg(long, default_value = "proofs.json")]
    proofs: PathBuf,

    #[arg(long, default_value = "round.json")]
    round: PathBuf,

    /// Check a single address instead of the whole file
    #[arg(short, long)]
    address: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => InputFormat::Csv,
            FormatArg::Json => InputFormat::Json,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AlgorithmArg {
    Keccak256,
    Sha256,
}

impl From<AlgorithmArg> for HashAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Keccak256 => HashAlgorithm::Keccak256,
            AlgorithmArg::Sha256 => HashAlgorithm::Sha256,
        }
    }
}

fn run_build(args: BuildArgs) -> Result<()> {
    let entries = load_allowlist(&args.input, args.format.map(Into::into))
        .with_context(|| format!("Failed to load allowlist {:?}", args.input))?;

    let options = BuildOptions::new(args.hash_algorithm.into(), args.claim_period_days);
    let artifacts = build_round(&entries, &options).context("Failed to build round")?;

    write_artifacts(&artifacts, &args.proofs_output, &args.round_output)
        .context("Failed to write round files")?;

    println!("Merkle root: {}", artifacts.config.merkle_root);
    println!("Users: {}", artifacts.config.total_users);
    println!("Total tokens: {}", artifacts.config.total_tokens);
    Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<()> {
    let config: RoundConfig = read_json(&args.round).context("Failed to read round file")?;
    let proofs: ProofFile = read_json(&args.proofs).context("Failed to read proof file")?;

    match args.address {
        Some(address) => {
            let entry = verify_address(&config, &proofs, &address)
                .with_context(|| format!("Verification failed for {address}"))?;
            println!("{} may claim {}", entry.address, entry.amount);
        }
        None => {
            let report = verify_round(&config, &proofs).context("Verification failed")?;
            println!(
                "{} proofs verified against {} ({} tokens)",
                report.checked, config.merkle_root, report.total_tokens
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LogLevel::Warn
    } else {
        LogLevel::from_verbosity(cli.verbose)
    };
    logging::try_init(level).map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Build(args) => run_build(args)?,
        Commands::Verify(args) => run_verify(args)?,
    }

    Ok(())
}
