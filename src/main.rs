use std::path::PathBuf;
use std::process;

use clap::Parser;
use tab_settler_lib::settle_expenses;
use tracing_subscriber::EnvFilter;

/// Splits a ledger of shared expenses and reports who owes whom.
#[derive(Parser, Debug)]
#[command(name = "tab-settler", version, about)]
struct Cli {
    /// Path to the ledger CSV file.
    #[arg(short, long)]
    input: PathBuf,

    /// Path to the JSON settings file.
    #[arg(short, long)]
    config: PathBuf,

    /// Enable verbose diagnostics. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    // diagnostics stay on stderr, the settlement report owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match settle_expenses(&cli.input, &cli.config) {
        Ok(report) => {
            print!("{report}");
            process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
