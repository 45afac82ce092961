use std::path::{Path, PathBuf};

use super::*;

#[test]
fn extract_id_layout_stem() {
    let id = extract_id(Path::new("samples/layouts/layout_07.png")).unwrap();
    assert_eq!(
        id,
        TemplateId {
            layout_id: "07".to_string(),
            variant_id: None
        }
    );
}

#[test]
fn extract_id_background_stem() {
    let id = extract_id(Path::new("backgrounds/background_07_2.jpg")).unwrap();
    assert_eq!(
        id,
        TemplateId {
            layout_id: "07".to_string(),
            variant_id: Some("2".to_string())
        }
    );
}

#[test]
fn extract_id_rejects_wrong_part_count() {
    for bad in ["layout.png", "a_b_c_d.png"] {
        let err = extract_id(Path::new(bad)).unwrap_err();
        assert!(matches!(err, SlotweaveError::InvalidFilenameFormat(_)));
    }
}

#[test]
fn match_joins_on_layout_id() {
    let layouts = vec![
        PathBuf::from("layouts/layout_01.png"),
        PathBuf::from("layouts/layout_02.png"),
    ];
    let backgrounds = vec![
        PathBuf::from("backgrounds/background_01_1.png"),
        PathBuf::from("backgrounds/background_01_2.png"),
        PathBuf::from("backgrounds/background_02_1.png"),
    ];
    let outcome = match_pairs(&layouts, &backgrounds);
    assert!(outcome.rejected.is_empty());
    assert_eq!(outcome.pairs.len(), 3);

    let first = &outcome.pairs[0];
    assert_eq!(first.layout_id, "01");
    assert_eq!(first.background_id, "1");
    assert_eq!(first.layout_path, layouts[0]);
    assert_eq!(first.background_path, backgrounds[0]);

    assert_eq!(outcome.pairs[1].background_id, "2");
    assert_eq!(outcome.pairs[2].layout_id, "02");
}

#[test]
fn unmatched_backgrounds_are_silently_excluded() {
    let layouts = vec![PathBuf::from("layout_01.png")];
    let backgrounds = vec![PathBuf::from("background_99_1.png")];
    let outcome = match_pairs(&layouts, &backgrounds);
    assert!(outcome.pairs.is_empty());
    assert!(outcome.rejected.is_empty());
}

#[test]
fn malformed_names_are_rejected_without_poisoning_the_join() {
    let layouts = vec![
        PathBuf::from("badlayout.png"),
        PathBuf::from("layout_03.png"),
    ];
    let backgrounds = vec![
        PathBuf::from("background_03_1.png"),
        PathBuf::from("background_too_many_parts_here.png"),
    ];
    let outcome = match_pairs(&layouts, &backgrounds);
    assert_eq!(outcome.pairs.len(), 1);
    assert_eq!(outcome.pairs[0].layout_id, "03");
    assert_eq!(outcome.rejected.len(), 2);
}
