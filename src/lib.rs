//! Slotweave is a template-driven compositing engine.
//!
//! It mass-produces visually varied composite images from three reusable
//! inputs: binary layout templates whose connected foreground regions
//! ("slots") say where content goes, background plates, and a pool of
//! foreground assets.
//!
//! # Pipeline overview
//!
//! 1. **Match**: join `layout_<id>` and `background_<id>_<variant>` files on
//!    their shared id into independent [`CompositePair`] work units
//! 2. **Extract**: threshold + scale the layout mask and label its
//!    8-connected regions into [`Slot`]s ([`extract_slots`])
//! 3. **Select**: draw one distinct asset per slot, uniformly without
//!    replacement, from a per-variant seeded RNG ([`select_assets`])
//! 4. **Compose**: resize each asset into its slot and merge it onto the
//!    background canvas by direct copy or alpha blend ([`place_into_slot`])
//! 5. **Persist**: write each variant as an RGBA PNG ([`process_sample`])
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: every variant derives its own RNG seed
//!   from (base seed, pair index, variant index); no global RNG state is
//!   shared across the worker pool.
//! - **Pairs are independent**: pair tasks fan out on a bounded rayon pool
//!   and one pair's failure never aborts its siblings.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod layout;
mod render;

pub use assets::decode::{crop_to_opaque_bounds, load_rgba, normalize_to_rgba};
pub use assets::pool::list_image_files;
pub use assets::select::{select_assets, variant_seed};
pub use foundation::error::{SlotweaveError, SlotweaveResult};
pub use layout::matcher::{CompositePair, MatchOutcome, TemplateId, extract_id, match_pairs};
pub use layout::slots::{
    BINARY_THRESHOLD, CanvasSize, LayoutSlots, Slot, SlotBounds, extract_slots, slots_from_image,
};
pub use render::canvas::{fit_canvas, load_canvas};
pub use render::composite::{Placement, place_into_slot, prepare_asset};
pub use render::pipeline::{
    GeneratorConfig, PairFailure, PngCompression, RunSummary, generate_pairs, process_sample,
};
