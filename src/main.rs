use std::path::PathBuf;

use clap::Parser;
use pennant::pipeline::{self, Options};
use pennant::{Config, Dialect, League, Source};

#[derive(Parser)]
#[command(name = "pennant", about = "Standings, head-to-head and magic/tragic numbers from raw schedule text")]
struct Cli {
    /// Config file to use instead of ~/.config/pennant/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input dialect (prose, pipe, markup). Sniffed per document when omitted.
    #[arg(long)]
    dialect: Option<Dialect>,

    /// Only evaluate this league. Repeatable; defaults to every league.
    #[arg(long)]
    league: Vec<League>,

    /// Evaluate every rank instead of first place, the cutoffs and last place.
    #[arg(long)]
    matrix: bool,

    /// Write the JSON snapshot here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write debug logs to /tmp/pennant-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Input documents; `-` reads stdin.
    #[arg(required = true)]
    inputs: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/pennant-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("pennant debug log started, tail -f /tmp/pennant-debug.log");
    }

    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };

    let options = Options {
        dialect: cli.dialect,
        leagues: if cli.league.is_empty() { League::ALL.to_vec() } else { cli.league },
        matrix: cli.matrix,
    };
    let sources = cli.inputs.iter().map(|arg| Source::from_arg(arg)).collect();

    let snapshot = pipeline::run(&config, sources, &options).await?;
    for refusal in &snapshot.refused {
        eprintln!("pennant: {} refused: {}", refusal.league, refusal.reason);
    }

    let json = snapshot.to_json()?;
    match &cli.out {
        Some(path) => tokio::fs::write(path, json).await?,
        None => println!("{json}"),
    }
    Ok(())
}
