use super::*;

#[test]
fn default_config_validates() {
    GeneratorConfig::default().validate().unwrap();
}

#[test]
fn zero_variants_is_rejected() {
    let cfg = GeneratorConfig {
        num_images_per_bg: 0,
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        cfg.validate().unwrap_err(),
        SlotweaveError::Validation(_)
    ));
}

#[test]
fn bad_scaling_factor_is_rejected() {
    for bad in [0.0, -0.5, f64::INFINITY, f64::NAN] {
        let cfg = GeneratorConfig {
            scaling_factor: bad,
            ..GeneratorConfig::default()
        };
        assert!(cfg.validate().is_err(), "scaling_factor {bad} accepted");
    }
}

#[test]
fn config_json_roundtrip_with_defaults() {
    let cfg: GeneratorConfig =
        serde_json::from_str(r#"{"num_images_per_bg": 3, "scaling_factor": 0.5, "seed": 11}"#)
            .unwrap();
    assert_eq!(cfg.num_images_per_bg, 3);
    assert_eq!(cfg.png_compression, PngCompression::Default);
    assert_eq!(cfg.threads, None);

    let json = serde_json::to_string(&cfg).unwrap();
    let back: GeneratorConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.seed, 11);
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    build_thread_pool(Some(2)).unwrap();
    build_thread_pool(None).unwrap();
}
