use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use doodle_core::Config;
use doodle_core::generate_from_scribble;

const DEFAULT_PROMPT: &str =
    "friendly watercolor illustration for children, soft colors, clean shapes";

/// Turn a hand-drawn scribble into a stylized illustration using a
/// remote ControlNet model.
#[derive(Parser, Debug)]
#[command(name = "doodle", version, about)]
struct Args {
    /// Path to the scribble image
    image: PathBuf,

    /// Prompt describing the desired illustration style
    #[arg(short, long, default_value = DEFAULT_PROMPT)]
    prompt: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = Config::from_env().context("loading configuration")?;

    info!("generating illustration from {}", args.image.display());
    let url = generate_from_scribble(&config, &args.image, &args.prompt).await?;
    println!("{url}");

    Ok(())
}
