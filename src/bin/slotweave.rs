use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use slotweave::{GeneratorConfig, PngCompression};

#[derive(Parser, Debug)]
#[command(name = "slotweave", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate composite variants for one sample directory.
    Generate(GenerateArgs),
    /// Match layouts against backgrounds and print the resulting pairs.
    Pairs(PairsArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Sample directory containing layouts/, backgrounds/ and images/.
    #[arg(long)]
    sample_dir: PathBuf,

    /// Output root; files land under <save-dir>/<sample-name>/.
    #[arg(long)]
    save_dir: PathBuf,

    /// Optional JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Variants generated per (layout, background) pair.
    #[arg(long)]
    num_images_per_bg: Option<u32>,

    /// Uniform scaling applied to the layout mask.
    #[arg(long)]
    scaling_factor: Option<f64>,

    /// Base seed for deterministic asset selection.
    #[arg(long)]
    seed: Option<u64>,

    /// PNG compression level.
    #[arg(long, value_enum)]
    png_compression: Option<CompressionChoice>,

    /// Override rayon worker threads for the pair pool.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PairsArgs {
    /// Sample directory containing layouts/ and backgrounds/.
    #[arg(long)]
    sample_dir: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CompressionChoice {
    Fast,
    Default,
    Best,
}

impl From<CompressionChoice> for PngCompression {
    fn from(v: CompressionChoice) -> Self {
        match v {
            CompressionChoice::Fast => PngCompression::Fast,
            CompressionChoice::Default => PngCompression::Default,
            CompressionChoice::Best => PngCompression::Best,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Pairs(args) => cmd_pairs(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config '{}'", path.display()))?;
            serde_json::from_reader::<_, GeneratorConfig>(BufReader::new(file))
                .with_context(|| format!("failed to parse config '{}'", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(n) = args.num_images_per_bg {
        cfg.num_images_per_bg = n;
    }
    if let Some(f) = args.scaling_factor {
        cfg.scaling_factor = f;
    }
    if let Some(s) = args.seed {
        cfg.seed = s;
    }
    if let Some(c) = args.png_compression {
        cfg.png_compression = c.into();
    }
    if let Some(t) = args.threads {
        cfg.threads = Some(t);
    }

    let summary = slotweave::process_sample(&args.sample_dir, &args.save_dir, &cfg)?;

    println!(
        "pairs: {}  variants written: {}  clipped slots: {}",
        summary.pairs_total, summary.variants_written, summary.slots_clipped
    );
    for failure in &summary.failures {
        eprintln!(
            "pair {}_{} failed: {}",
            failure.pair.layout_id, failure.pair.background_id, failure.error
        );
    }
    if !summary.failures.is_empty() {
        anyhow::bail!("{} of {} pairs failed", summary.failures.len(), summary.pairs_total);
    }
    Ok(())
}

fn cmd_pairs(args: PairsArgs) -> anyhow::Result<()> {
    let layouts = slotweave::list_image_files(&args.sample_dir.join("layouts"))?;
    let backgrounds = slotweave::list_image_files(&args.sample_dir.join("backgrounds"))?;
    let outcome = slotweave::match_pairs(&layouts, &backgrounds);

    for pair in &outcome.pairs {
        println!(
            "{}_{}: {} + {}",
            pair.layout_id,
            pair.background_id,
            pair.layout_path.display(),
            pair.background_path.display()
        );
    }
    for (path, error) in &outcome.rejected {
        eprintln!("rejected {}: {}", path.display(), error);
    }
    Ok(())
}
