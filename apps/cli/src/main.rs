use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use carta_importer::Importer;
use carta_models::source::ContinuityOfCareRecord;
use carta_vocabulary::Vocabulary;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "carta",
    about = "Extract normalized clinical records from CCR documents",
    version,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a normalized record from a CCR document (JSON tree).
    Extract {
        /// Path to the CCR document (or "-" for stdin).
        document: PathBuf,
        /// Path to a vocabulary JSON file. Defaults to the embedded base
        /// vocabulary.
        #[arg(short = 'v', long)]
        vocabulary: Option<PathBuf>,
        /// Pretty-print the output record.
        #[arg(long, action = ArgAction::SetTrue)]
        pretty: bool,
    },

    /// Validate a vocabulary file and list its term sets.
    Vocab {
        /// Path to the vocabulary JSON file.
        vocabulary: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract {
            document,
            vocabulary,
            pretty,
        } => extract(&document, vocabulary.as_ref(), pretty),
        Commands::Vocab { vocabulary } => inspect_vocabulary(&vocabulary),
    }
}

fn extract(document: &PathBuf, vocabulary: Option<&PathBuf>, pretty: bool) -> Result<()> {
    let vocab = match vocabulary {
        Some(path) => load_vocabulary(path)?,
        None => Vocabulary::base(),
    };
    let importer = Importer::new(vocab).context("vocabulary is not usable for extraction")?;

    let raw = read_input(document)
        .with_context(|| format!("failed to read document {}", document.display()))?;
    let ccr: ContinuityOfCareRecord = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse document {}", document.display()))?;

    let record = importer.create_record(&ccr);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, &record)?;
    } else {
        serde_json::to_writer(&mut out, &record)?;
    }
    writeln!(out)?;
    Ok(())
}

fn inspect_vocabulary(path: &PathBuf) -> Result<()> {
    let vocab = load_vocabulary(path)?;

    let mut ids: Vec<_> = vocab.term_sets().map(|ts| ts.id.clone()).collect();
    ids.sort();
    for id in &ids {
        let ts = vocab.get(id).expect("id was just listed");
        println!("{id}: {} codes, {} terms", ts.codes.len(), ts.terms.len());
    }

    let missing: Vec<_> = carta_importer::REQUIRED_TERM_SETS
        .iter()
        .filter(|id| !vocab.contains(id))
        .collect();
    if missing.is_empty() {
        println!("vocabulary is complete for extraction");
    } else {
        println!("missing required term sets: {missing:?}");
    }
    Ok(())
}

fn load_vocabulary(path: &PathBuf) -> Result<Vocabulary> {
    let file = File::open(path)
        .with_context(|| format!("failed to open vocabulary {}", path.display()))?;
    Vocabulary::from_reader(file)
        .with_context(|| format!("failed to load vocabulary {}", path.display()))
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
