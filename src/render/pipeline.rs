use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{ImageEncoder, RgbaImage};
use rand::SeedableRng as _;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::assets::pool::list_image_files;
use crate::assets::select::{select_assets, variant_seed};
use crate::foundation::error::{SlotweaveError, SlotweaveResult};
use crate::layout::matcher::{CompositePair, match_pairs};
use crate::layout::slots::extract_slots;
use crate::render::canvas::load_canvas;
use crate::render::composite::{Placement, place_into_slot, prepare_asset};

/// PNG compression level for generated variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PngCompression {
    /// Favor encode speed.
    Fast,
    /// Mid-range default.
    #[default]
    Default,
    /// Favor output size.
    Best,
}

impl PngCompression {
    fn as_image_compression(self) -> CompressionType {
        match self {
            Self::Fast => CompressionType::Fast,
            Self::Default => CompressionType::Default,
            Self::Best => CompressionType::Best,
        }
    }
}

/// Configuration surface consumed by the compositing core.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GeneratorConfig {
    /// Number of variants generated per (layout, background) pair.
    pub num_images_per_bg: u32,
    /// Uniform scaling applied to the layout mask before labeling.
    pub scaling_factor: f64,
    /// Base seed for deterministic asset selection.
    pub seed: u64,
    /// PNG compression level for outputs.
    #[serde(default)]
    pub png_compression: PngCompression,
    /// Worker thread override for the pair pool; `None` uses rayon's default.
    #[serde(default)]
    pub threads: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_images_per_bg: 1,
            scaling_factor: 1.0,
            seed: 0,
            png_compression: PngCompression::Default,
            threads: None,
        }
    }
}

impl GeneratorConfig {
    /// Validate configuration values before any work starts.
    pub fn validate(&self) -> SlotweaveResult<()> {
        if self.num_images_per_bg == 0 {
            return Err(SlotweaveError::validation(
                "num_images_per_bg must be >= 1",
            ));
        }
        if !(self.scaling_factor.is_finite() && self.scaling_factor > 0.0) {
            return Err(SlotweaveError::validation(format!(
                "scaling_factor must be a positive finite number, got {}",
                self.scaling_factor
            )));
        }
        Ok(())
    }
}

/// One pair task that could not produce its variants.
#[derive(Debug)]
pub struct PairFailure {
    /// The failed work unit.
    pub pair: CompositePair,
    /// What went wrong for this pair.
    pub error: SlotweaveError,
}

/// Summary of one generation run over a sample directory.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Matched (layout, background) work units.
    pub pairs_total: usize,
    /// Variant files successfully written.
    pub variants_written: u64,
    /// Slot placements skipped because their clamped rectangle had no area.
    pub slots_clipped: u64,
    /// Per-pair failures; sibling pairs are unaffected.
    pub failures: Vec<PairFailure>,
    /// Template files skipped because their names could not be parsed.
    pub rejected_files: Vec<PathBuf>,
}

#[derive(Debug, Default)]
struct PairStats {
    variants_written: u64,
    slots_clipped: u64,
}

/// Process one sample directory end to end.
///
/// Expects the `layouts/`, `backgrounds/` and `images/` subdirectories of
/// the input convention, matches template pairs, and generates
/// `num_images_per_bg` variants per pair under `<save_dir>/<sample_name>/`.
/// Pairs fan out on a bounded rayon pool; a failing pair is recorded in the
/// summary without aborting its siblings.
#[tracing::instrument(skip(cfg))]
pub fn process_sample(
    sample_dir: &Path,
    save_dir: &Path,
    cfg: &GeneratorConfig,
) -> SlotweaveResult<RunSummary> {
    cfg.validate()?;

    let layouts = list_image_files(&sample_dir.join("layouts"))?;
    let backgrounds = list_image_files(&sample_dir.join("backgrounds"))?;
    let asset_pool = list_image_files(&sample_dir.join("images"))?;

    let sample_name = sample_dir
        .file_name()
        .ok_or_else(|| SlotweaveError::validation("sample_dir must name a directory"))?;
    let out_dir = save_dir.join(sample_name);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory '{}'", out_dir.display()))?;

    let outcome = match_pairs(&layouts, &backgrounds);
    for (path, error) in &outcome.rejected {
        tracing::warn!(path = %path.display(), %error, "skipping unparseable template file");
    }

    let mut summary = generate_pairs(&outcome.pairs, &asset_pool, &out_dir, cfg)?;
    summary.rejected_files = outcome.rejected.into_iter().map(|(p, _)| p).collect();

    tracing::info!(
        pairs = summary.pairs_total,
        written = summary.variants_written,
        failed = summary.failures.len(),
        "sample processed"
    );
    Ok(summary)
}

/// Generate all variants for a list of matched pairs.
///
/// Exposed separately from [`process_sample`] so callers with their own
/// matching or discovery logic can drive the engine directly.
pub fn generate_pairs(
    pairs: &[CompositePair],
    asset_pool: &[PathBuf],
    out_dir: &Path,
    cfg: &GeneratorConfig,
) -> SlotweaveResult<RunSummary> {
    cfg.validate()?;
    let pool = build_thread_pool(cfg.threads)?;

    let results: Vec<(usize, Result<PairStats, SlotweaveError>)> = pool.install(|| {
        pairs
            .par_iter()
            .enumerate()
            .map(|(idx, pair)| (idx, generate_pair(pair, idx as u64, asset_pool, out_dir, cfg)))
            .collect()
    });

    let mut summary = RunSummary {
        pairs_total: pairs.len(),
        ..RunSummary::default()
    };
    for (idx, result) in results {
        match result {
            Ok(stats) => {
                summary.variants_written += stats.variants_written;
                summary.slots_clipped += stats.slots_clipped;
            }
            Err(error) => {
                tracing::warn!(pair = idx, %error, "pair failed");
                summary.failures.push(PairFailure {
                    pair: pairs[idx].clone(),
                    error,
                });
            }
        }
    }
    Ok(summary)
}

fn generate_pair(
    pair: &CompositePair,
    pair_index: u64,
    asset_pool: &[PathBuf],
    out_dir: &Path,
    cfg: &GeneratorConfig,
) -> Result<PairStats, SlotweaveError> {
    let layout = extract_slots(&pair.layout_path, cfg.scaling_factor)?;

    // Hard precondition, checked before any canvas or asset pixels are
    // touched: a variant needs one distinct asset per slot.
    if layout.slots.len() > asset_pool.len() {
        return Err(SlotweaveError::InsufficientAssets {
            required: layout.slots.len(),
            available: asset_pool.len(),
        });
    }

    let mut stats = PairStats::default();
    for variant in 1..=u64::from(cfg.num_images_per_bg) {
        let mut canvas = load_canvas(&pair.background_path, layout.size)?;
        let mut rng = ChaCha8Rng::seed_from_u64(variant_seed(cfg.seed, pair_index, variant));
        let selected = select_assets(asset_pool, layout.slots.len(), &mut rng)?;

        let mut clipped = 0u64;
        for (slot, asset_path) in layout.slots.iter().zip(&selected) {
            let asset = prepare_asset(asset_path, slot.bounds)?;
            if place_into_slot(&mut canvas, &asset, slot) == Placement::Clipped {
                clipped += 1;
            }
        }
        if clipped > 0 {
            tracing::debug!(
                layout = %pair.layout_id,
                background = %pair.background_id,
                variant,
                clipped,
                "slot placements fully clipped"
            );
        }

        let filename = format!("{}_{}_{}.png", pair.layout_id, pair.background_id, variant);
        write_png(&canvas, &out_dir.join(filename), cfg.png_compression)?;
        stats.variants_written += 1;
        stats.slots_clipped += clipped;
    }
    Ok(stats)
}

fn write_png(canvas: &RgbaImage, path: &Path, compression: PngCompression) -> SlotweaveResult<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?;
    let encoder = PngEncoder::new_with_quality(
        BufWriter::new(file),
        compression.as_image_compression(),
        PngFilterType::Adaptive,
    );
    encoder
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            image::ExtendedColorType::Rgba8,
        )
        .with_context(|| format!("failed to encode '{}'", path.display()))?;
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> SlotweaveResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        if n == 0 {
            return Err(SlotweaveError::validation("threads must be >= 1"));
        }
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SlotweaveError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
