use std::path::{Path, PathBuf};

use crate::foundation::error::{SlotweaveError, SlotweaveResult};

/// Identifier parts extracted from a template filename stem.
///
/// `layout_<id>` stems carry only a layout id; `background_<id>_<variant>`
/// stems additionally carry a variant id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateId {
    /// Identifier shared between a layout and its backgrounds.
    pub layout_id: String,
    /// Secondary id distinguishing backgrounds of the same layout.
    pub variant_id: Option<String>,
}

/// One (layout, background) work unit joined on a shared layout id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositePair {
    /// Shared identifier of the matched layout.
    pub layout_id: String,
    /// Variant id of the matched background.
    pub background_id: String,
    /// Path to the layout template.
    pub layout_path: PathBuf,
    /// Path to the background template.
    pub background_path: PathBuf,
}

/// Result of joining layout and background file lists.
///
/// Files whose names do not follow the convention end up in `rejected`
/// instead of aborting the whole match; unmatched backgrounds are silently
/// excluded per the matching contract.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    /// Matched work units, one per (layout, background) combination.
    pub pairs: Vec<CompositePair>,
    /// Files skipped because their names could not be parsed.
    pub rejected: Vec<(PathBuf, SlotweaveError)>,
}

/// Parse the identifier parts out of a template filename.
///
/// The stem must split on `_` into exactly 2 (`layout_07`) or 3
/// (`background_07_2`) parts; anything else fails with
/// [`SlotweaveError::InvalidFilenameFormat`].
pub fn extract_id(path: &Path) -> SlotweaveResult<TemplateId> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| SlotweaveError::invalid_filename(path.display().to_string()))?;

    let parts: Vec<&str> = stem.split('_').collect();
    match parts.as_slice() {
        [_, id] => Ok(TemplateId {
            layout_id: (*id).to_string(),
            variant_id: None,
        }),
        [_, id, variant] => Ok(TemplateId {
            layout_id: (*id).to_string(),
            variant_id: Some((*variant).to_string()),
        }),
        _ => Err(SlotweaveError::invalid_filename(stem)),
    }
}

/// Join background paths against layout paths sharing the same layout id.
///
/// Produces one pair per matching combination: a layout id carried by
/// several backgrounds yields several pairs for that layout.
pub fn match_pairs(layout_paths: &[PathBuf], background_paths: &[PathBuf]) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();

    // Parse layouts once up front; bad layout names are rejected here so a
    // single malformed file cannot poison every background's join.
    let mut layouts = Vec::with_capacity(layout_paths.len());
    for path in layout_paths {
        match extract_id(path) {
            Ok(id) => layouts.push((id.layout_id, path)),
            Err(e) => outcome.rejected.push((path.clone(), e)),
        }
    }

    for bg_path in background_paths {
        let bg_id = match extract_id(bg_path) {
            Ok(id) => id,
            Err(e) => {
                outcome.rejected.push((bg_path.clone(), e));
                continue;
            }
        };
        for (layout_id, layout_path) in &layouts {
            if *layout_id != bg_id.layout_id {
                continue;
            }
            outcome.pairs.push(CompositePair {
                layout_id: layout_id.clone(),
                background_id: bg_id.variant_id.clone().unwrap_or_default(),
                layout_path: (*layout_path).clone(),
                background_path: bg_path.clone(),
            });
        }
    }

    outcome
}

#[cfg(test)]
#[path = "../../tests/unit/layout/matcher.rs"]
mod tests;
