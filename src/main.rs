//! Command-line front end for the queue-file codec.
//!
//! `inspect` dumps a decoded queue as JSON, `roundtrip` verifies that a
//! file survives decode/encode byte-for-byte, and `sites` lists the
//! configured site names from the client's site directory.
#![expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "command-line tool reports on standard streams"
)]

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

use rushq::{queue::QueueFile, sites};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a queue file and print its records as JSON
    Inspect {
        /// Path to the queue file
        file: PathBuf,
    },
    /// Decode and re-encode a queue file, verifying byte identity
    Roundtrip {
        /// Path to the queue file
        file: PathBuf,
        /// Write the re-encoded bytes here instead of only comparing
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the configured site names
    Sites {
        /// Explicit path to RushSite.xml
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Inspect { file } => {
            let queue = QueueFile::load(&file)?;
            println!("{}", serde_json::to_string_pretty(&queue.items)?);
        }
        Commands::Roundtrip { file, output } => {
            let original = std::fs::read(&file)?;
            let reencoded = QueueFile::decode(&original)?.encode()?;
            if let Some(out_path) = output {
                std::fs::write(&out_path, &reencoded)?;
            }
            if reencoded == original {
                println!("{}: byte-identical round trip", file.display());
            } else {
                return Err(format!(
                    "{}: round trip differs ({} bytes in, {} bytes out)",
                    file.display(),
                    original.len(),
                    reencoded.len()
                )
                .into());
            }
        }
        Commands::Sites { file } => {
            for name in sites::site_names(file.as_deref()) {
                println!("{name}");
            }
        }
    }
    Ok(())
}
