mod app;
mod document;

use std::path::PathBuf;

use clap::Parser;

/// Layered-noise planet map generator.
#[derive(Parser, Debug)]
#[command(name = "loam", version, about)]
pub struct Args {
    /// Map width in tiles, before the border ring is added
    #[arg(long, default_value_t = 300)]
    pub width: usize,

    /// Map height in tiles, before the border ring is added
    #[arg(long, default_value_t = 300)]
    pub height: usize,

    /// Base seed; drawn at random (and logged) when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// TOML rule table replacing the built-in layers
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Chunk side length for the tile payload
    #[arg(long, default_value_t = loam_chunk::CHUNK_SIDE)]
    pub chunk: u32,

    /// Output document path
    #[arg(long, default_value = "map.json")]
    pub out: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(err) = app::run(&args) {
        log::error!("map generation failed: {err}");
        std::process::exit(1);
    }
}
