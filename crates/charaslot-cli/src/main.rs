//! Charaslot command line
//!
//! Assigns a title to a character slot and regenerates the title table and
//! the roster parameter table under a destination root.

use anyhow::{bail, Context, Result};
use charaslot_core::{CompileRequest, Compiler, EntityRecord, UpdateMode};
use charaslot_io::{ArtifactWriter, OutputLayout};
use charaslot_script::{Loader, RosterData};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "charaslot")]
#[command(about = "Compile character slot titles into message and roster tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Destination root the artifact paths are relative to
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// RON file overriding the artifact layout
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory with characters.ron and baseline.ron (defaults to the bundled dataset)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign a title to a character slot
    Assign {
        /// Character key or search pattern
        character: String,

        /// Slot number
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=8))]
        slot: u8,

        /// Display title
        #[arg(long)]
        title: String,

        /// add keeps existing titles; replace starts a fresh table.
        /// Defaults to add when a title table exists, replace otherwise.
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Which match to use when the search is ambiguous (1-based)
        #[arg(long, default_value_t = 1)]
        pick: usize,
    },

    /// List characters matching a key or search pattern
    Lookup {
        query: String,
    },

    /// Regenerate the roster table from the existing title table
    Rebuild,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Add,
    Replace,
}

impl From<ModeArg> for UpdateMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Add => UpdateMode::Add,
            ModeArg::Replace => UpdateMode::Replace,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data = load_data(cli.data.as_deref())?;
    let layout = match &cli.config {
        Some(path) => OutputLayout::load(path)
            .with_context(|| format!("failed to load layout {}", path.display()))?,
        None => OutputLayout::default(),
    };
    let writer = ArtifactWriter::new(&cli.root, layout);

    match cli.command {
        Commands::Assign {
            character,
            slot,
            title,
            mode,
            pick,
        } => assign(&data, &writer, &character, slot, title, mode, pick),
        Commands::Lookup { query } => lookup(&data, &query),
        Commands::Rebuild => rebuild(&data, &writer),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_data(dir: Option<&Path>) -> Result<RosterData> {
    let loader = match dir {
        Some(dir) => {
            let mut loader = Loader::new();
            loader
                .load_directory(dir)
                .with_context(|| format!("failed to load dataset from {}", dir.display()))?;
            loader
        }
        None => Loader::bundled().context("bundled dataset is invalid")?,
    };
    let data = loader.finish().context("dataset is incomplete")?;
    info!(
        characters = data.directory.len(),
        baseline = data.baseline.len(),
        "dataset loaded"
    );
    Ok(data)
}

fn pick_character<'a>(data: &'a RosterData, query: &str, pick: usize) -> Result<&'a EntityRecord> {
    let matches = data.directory.lookup(query)?;
    if matches.is_empty() {
        bail!("no character matches {query:?}");
    }
    if matches.len() > 1 {
        for (i, record) in matches.iter().enumerate() {
            warn!(choice = i + 1, key = %record.key, name = %record.name, "ambiguous match");
        }
    }
    match pick.checked_sub(1).and_then(|i| matches.get(i).copied()) {
        Some(record) => Ok(record),
        None => bail!("--pick {pick} is out of range (1..={})", matches.len()),
    }
}

fn assign(
    data: &RosterData,
    writer: &ArtifactWriter,
    query: &str,
    slot: u8,
    title: String,
    mode: Option<ModeArg>,
    pick: usize,
) -> Result<()> {
    let entity = pick_character(data, query, pick)?;
    let mode = match mode {
        Some(mode) => mode.into(),
        None if writer.title_table_exists() => UpdateMode::Add,
        None => UpdateMode::Replace,
    };
    info!(key = %entity.key, name = %entity.name, slot, ?mode, "assigning title");

    let existing = match mode {
        UpdateMode::Add => writer
            .read_titles()
            .with_context(|| format!("failed to read {}", writer.title_path().display()))?,
        UpdateMode::Replace => None,
    };

    let compiler = Compiler::new(&data.directory, &data.baseline);
    let request = CompileRequest::new(entity.id, slot, title, mode);
    let artifacts = compiler.compile(&request, existing.as_ref())?;

    writer.write(&artifacts).context("failed to write artifacts")?;
    println!(
        "{} ({}) slot {} -> {} title entries, {} roster segments",
        entity.name,
        entity.key,
        slot,
        artifacts.titles.len(),
        artifacts.roster.len()
    );
    Ok(())
}

fn lookup(data: &RosterData, query: &str) -> Result<()> {
    let matches = data.directory.lookup(query)?;
    if matches.is_empty() {
        bail!("no character matches {query:?}");
    }
    for record in matches {
        println!("{}\t{}\t{}", record.id, record.key, record.name);
    }
    Ok(())
}

fn rebuild(data: &RosterData, writer: &ArtifactWriter) -> Result<()> {
    let Some(titles) = writer
        .read_titles()
        .with_context(|| format!("failed to read {}", writer.title_path().display()))?
    else {
        bail!("no title table at {}", writer.title_path().display());
    };

    let compiler = Compiler::new(&data.directory, &data.baseline);
    let artifacts = compiler.rebuild(titles)?;
    writer.write(&artifacts).context("failed to write artifacts")?;
    println!(
        "rebuilt {} roster segments from {} title entries",
        artifacts.roster.len(),
        artifacts.titles.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_slot_range_is_enforced() {
        let args = |slot: &'static str| ["charaslot", "assign", "mario", "--slot", slot, "--title", "x"];
        assert!(Cli::try_parse_from(args("9")).is_err());
        assert!(Cli::try_parse_from(args("0")).is_err());
        assert!(Cli::try_parse_from(args("8")).is_ok());
    }

    #[test]
    fn test_pick_character() {
        let data = Loader::bundled().unwrap().finish().unwrap();

        assert_eq!(pick_character(&data, "mario", 1).unwrap().key, "mario");
        assert_eq!(pick_character(&data, "mario", 2).unwrap().key, "mariod");
        assert!(pick_character(&data, "mario", 0).is_err());
        assert!(pick_character(&data, "nobody", 1).is_err());
    }
}
