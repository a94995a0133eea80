#![allow(warnings)]

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use log::info;

mod error;
mod model;
mod store;
mod xml;

use model::EntityKind;
use store::{MemoryStore, ObjectStore};
use xml::record::{ConstantMismatchPolicy, ImportOptions, NestedFailurePolicy};
use xml::report::Messages;

#[derive(Parser)]
#[command(name = "brewxml")]
#[command(about = "A schema-driven BeerXML import/export engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a BeerXML file and report what would be stored
    Import {
        /// The BeerXML file to read
        file: PathBuf,
        /// Write the resulting store contents to a JSON file
        #[arg(long)]
        dump_store: Option<PathBuf>,
        /// Skip unreadable nested records instead of failing their parent
        #[arg(long)]
        skip_bad_records: bool,
        /// Treat a VERSION tag mismatch as a failure instead of a warning
        #[arg(long)]
        strict_version: bool,
    },
    /// Import a BeerXML file, then export the stored recipes back to XML
    Roundtrip {
        /// The BeerXML file to read
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("brewxml.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting brewxml");

    let coding = xml::coding_named("BeerXML 1.0")
        .ok_or_else(|| anyhow::anyhow!("BeerXML 1.0 coding is not registered"))?;

    match cli.command {
        Commands::Import { file, dump_store, skip_bad_records, strict_version } => {
            let options = ImportOptions {
                nested_failure: if skip_bad_records {
                    NestedFailurePolicy::SkipAndLog
                } else {
                    NestedFailurePolicy::AbortRecord
                },
                constant_mismatch: if strict_version {
                    ConstantMismatchPolicy::Fail
                } else {
                    ConstantMismatchPolicy::Warn
                },
            };

            let text = std::fs::read_to_string(&file)?;
            let mut store = MemoryStore::new();
            let mut messages = Messages::new();
            let report = xml::import_document(coding, &text, &mut store, options, &mut messages)?;

            if !messages.is_empty() {
                println!("{}", messages);
            }
            println!("{}", report.stats);

            if let Some(path) = dump_store {
                let json = serde_json::to_string_pretty(&store.entities())?;
                std::fs::write(&path, json)?;
                println!("Store contents written to {}", path.display());
            }

            if !report.succeeded() {
                bail!("import of {} finished with failures", file.display());
            }
        }
        Commands::Roundtrip { file } => {
            let text = std::fs::read_to_string(&file)?;
            let mut store = MemoryStore::new();
            let mut messages = Messages::new();
            let report = xml::import_document(
                coding,
                &text,
                &mut store,
                ImportOptions::default(),
                &mut messages,
            )?;
            if !messages.is_empty() {
                eprintln!("{}", messages);
            }
            if !report.succeeded() {
                bail!("import of {} finished with failures", file.display());
            }

            let recipe_ids: Vec<_> = store
                .find_all(EntityKind::Recipe)
                .into_iter()
                .map(|(id, _)| id)
                .collect();
            let exported = xml::export_document(coding, &store, "RECIPES", &recipe_ids)?;
            print!("{}", exported);
        }
    }

    Ok(())
}
