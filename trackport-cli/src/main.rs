//! Command-line PolyTrack track importer.
//!
//! Works against a JSON file holding the game's key-value storage: import
//! track manifests into it, export it back to a manifest, wipe it, or
//! inspect a single share code.
//!
//! Usage:
//!   trackport import tracks.txt --store storage.json --mode rename
//!   trackport export --store storage.json -o backup.txt
//!   trackport inspect v3EAM92bwB...

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use trackport_cli::{run_delete_all, run_export, run_import, run_inspect};
use trackport_types::CollisionPolicy;

#[derive(Parser, Debug)]
#[command(name = "trackport")]
#[command(about = "PolyTrack track importer and exporter")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import track manifests into a storage file
    Import {
        /// Manifest files to import, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Storage file to import into
        #[arg(short, long, default_value = "storage.json")]
        store: PathBuf,

        /// What to do when a track name already exists
        #[arg(short, long, default_value = "skip")]
        mode: CollisionPolicy,

        /// Convert native payloads to the PolyTrack1 format
        #[arg(long)]
        legacy: bool,

        /// Write a report of failed tracks to this file
        #[arg(long)]
        failed_report: Option<PathBuf>,
    },

    /// Export all tracks from a storage file as a manifest
    Export {
        /// Storage file to export from
        #[arg(short, long, default_value = "storage.json")]
        store: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete every track in a storage file
    DeleteAll {
        /// Storage file to wipe
        #[arg(short, long, default_value = "storage.json")]
        store: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Classify a share code and show what it carries
    Inspect {
        /// The share code or payload to inspect
        code: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    match args.command {
        Command::Import {
            files,
            store,
            mode,
            legacy,
            failed_report,
        } => run_import(&files, &store, mode, legacy, failed_report.as_deref()),
        Command::Export { store, output } => run_export(&store, output.as_deref()),
        Command::DeleteAll { store, yes } => run_delete_all(&store, yes),
        Command::Inspect { code } => run_inspect(&code),
    }
}
