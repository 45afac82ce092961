use std::path::PathBuf;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::foundation::error::{SlotweaveError, SlotweaveResult};
use crate::foundation::math::Fnv1a64;

/// Derive the RNG seed for one generated variant.
///
/// Each variant of each pair gets its own deterministic seed mixed from the
/// configured base seed plus the pair and variant indices, so parallel pair
/// tasks never share RNG state and a run is reproducible for a given base
/// seed.
pub fn variant_seed(base_seed: u64, pair_index: u64, variant_index: u64) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(base_seed);
    h.write_u64(pair_index);
    h.write_u64(variant_index);
    h.finish()
}

/// Draw `count` distinct paths from `pool` uniformly without replacement, in
/// random order.
///
/// Fails with [`SlotweaveError::InsufficientAssets`] when `count` exceeds the
/// pool size; partial fulfillment or reuse is never attempted. The same
/// (pool, rng state, count) triple always yields the same output.
pub fn select_assets<R: Rng + ?Sized>(
    pool: &[PathBuf],
    count: usize,
    rng: &mut R,
) -> SlotweaveResult<Vec<PathBuf>> {
    if count > pool.len() {
        return Err(SlotweaveError::InsufficientAssets {
            required: count,
            available: pool.len(),
        });
    }
    let mut selected: Vec<PathBuf> = pool.choose_multiple(rng, count).cloned().collect();
    // choose_multiple returns an unspecified order; shuffle so slot
    // assignment is itself uniform.
    selected.shuffle(rng);
    Ok(selected)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/select.rs"]
mod tests;
