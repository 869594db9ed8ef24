mod sources;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use intel_catalog::{to_archive, Catalog, StaticCharacterDirectory};
use intel_engine::IntelEngine;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Intel chat tokenizer tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compiles a JSON catalog to an rkyv archive.
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Tokenizes chat lines and prints one JSON report per line.
    Parse {
        /// Catalog as `.json` or compiled archive.
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Parser configuration (JSON).
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Active region; repeat for several. All regions when omitted.
        #[arg(short, long = "region", value_name = "NAME")]
        regions: Vec<String>,

        /// Author of the lines, passed to the character lookup.
        #[arg(long, value_name = "NAME")]
        originator: Option<String>,

        /// Chat log to read instead of stdin.
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn compile(input: PathBuf, output: PathBuf) -> Result<()> {
    let data = sources::read_catalog(&input)?;
    info!(
        version = data.version,
        systems = data.systems.len(),
        ships = data.ships.len(),
        "compiling catalog"
    );
    // Rejects systems in unknown regions.
    Catalog::from_data(&data).context("validating catalog")?;

    let bytes = to_archive(&data)?;
    fs::write(&output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    info!(bytes = bytes.len(), output = %output.display(), "archive written");
    Ok(())
}

async fn parse(
    catalog: PathBuf,
    config: Option<PathBuf>,
    regions: Vec<String>,
    originator: Option<String>,
    input: Option<PathBuf>,
) -> Result<()> {
    let data = sources::read_catalog(&catalog)?;
    let config = sources::read_config(config.as_deref())?;
    let directory = StaticCharacterDirectory::from_records(&data.characters);
    let engine = IntelEngine::new(Arc::new(Catalog::from_data(&data)?), Arc::new(directory), config)?;

    let text = match input {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut text = String::new();
            while let Some(line) = lines.next_line().await? {
                text.push_str(&line);
                text.push('\n');
            }
            text
        }
    };

    let mut stdout = tokio::io::stdout();
    for line in text.lines() {
        let report = engine.report(line, &regions, originator.as_deref()).await;
        stdout.write_all(report.to_json()?.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Compile { input, output } => compile(input, output),
        Command::Parse {
            catalog,
            config,
            regions,
            originator,
            input,
        } => parse(catalog, config, regions, originator, input).await,
    }
}
