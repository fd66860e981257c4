#![forbid(unsafe_code)]
//! Builds a ledger round by round and prints it after every commit.

use clap::Parser;
use colored::*;
use ledgerchain::blockchain::Blockchain;
use ledgerchain::cli::{apply_round, verify_summary};
use ledgerchain::config::{load_config, load_config_from};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a ledger.toml; defaults to ./ledger.toml or built-in rounds
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the final chain as JSON instead of the text dump
    #[arg(long)]
    json: bool,
    /// Only print the final chain
    #[arg(long)]
    quiet: bool,
    /// Check block linkage once all rounds are committed
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    tracing_subscriber::fmt()
        .with_max_level(config.logging.max_level()?)
        .with_writer(std::io::stderr)
        .init();

    let mut chain = Blockchain::new();
    if !cli.quiet && !cli.json {
        print!("{}", chain);
    }

    for round in &config.rounds {
        apply_round(&mut chain, round);
        if !cli.quiet && !cli.json {
            print!("{}", chain);
        }
    }

    if cli.json {
        println!("{}", chain.export_json()?);
    } else if cli.quiet {
        print!("{}", chain);
    }

    if cli.verify {
        match verify_summary(&chain) {
            Ok(summary) => eprintln!("{} {}", "✅ Chain verified:".bright_green(), summary),
            Err(e) => {
                eprintln!("{} {}", "❌ Chain verification failed:".red().bold(), e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
