mod renderer;
mod state;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use eeg_cloud_core::config::AppConfig;
use eeg_cloud_core::views::ViewKind;

const USAGE: &str = "Usage: eeg-cloud-tui [line|radar|glyph|history] [--config PATH] [--seed N]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    view: ViewKind,
    config: Option<PathBuf>,
    seed: Option<u64>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut out = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                out.config = Some(PathBuf::from(path));
            }
            "--seed" => {
                let seed = args.next().context("--seed needs a number")?;
                let parsed = seed.parse::<u64>().with_context(|| format!("bad seed: {seed}"))?;
                out.seed = Some(parsed);
            }
            "-h" | "--help" => bail!("{USAGE}"),
            view => {
                out.view = view
                    .parse::<ViewKind>()
                    .map_err(|e| anyhow::anyhow!("{e}\n{USAGE}"))?;
            }
        }
    }
    Ok(out)
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::from_env()?,
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut state = state::TuiState::new(&config, args.view)?;
    renderer::run(&mut state)
}
