//! Patina Demo — apply a cataloged effect to a photo from the command line.
//!
//! ```text
//! patina-demo --list
//! patina-demo -i photo.jpg -e sepia-tone -a 0.8 -o out.png
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use patina_core::EffectId;
use patina_session::EffectSession;

#[derive(Parser)]
#[command(about = "Apply a cataloged image effect with a chosen adjustment")]
struct Args {
    /// Input photo (PNG, JPEG, TIFF, ...).
    #[arg(short, long, required_unless_present = "list")]
    input: Option<PathBuf>,

    /// Effect slug, e.g. `sepia-tone` or `gaussian-blur`.
    #[arg(short, long, default_value = "sepia-tone")]
    effect: String,

    /// Adjustment value in the effect's native slider range.
    #[arg(short, long)]
    adjustment: Option<f32>,

    /// Secondary scale applied to the adjustment.
    #[arg(short, long, default_value_t = 1.0)]
    multiplier: f32,

    /// Output path for the processed PNG.
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Print the effect catalog as JSON and exit.
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let args = Args::parse();
    let session = EffectSession::builtin();

    if args.list {
        println!("{}", serde_json::to_string_pretty(&session.list_effects())?);
        return Ok(());
    }

    let input = args.input.context("--input is required")?;
    let effect: EffectId = args
        .effect
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{e}; try --list for available slugs"))?;

    let bytes = std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
    session.load_image(&bytes).context("decoding input image")?;

    let remembered = session.select_effect(effect)?;
    let adjustment = args.adjustment.unwrap_or(remembered);
    tracing::info!(%effect, adjustment, multiplier = args.multiplier, "applying");

    let output = session.adjust(adjustment, args.multiplier).await?;
    std::fs::write(&args.output, &output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("{} -> {}", input.display(), args.output.display());
    Ok(())
}
