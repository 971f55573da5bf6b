use codegauge_core::{
    classify, preset, symbol_set, thresholds_with_symbols, CountMode, CountingConfig,
    DirectoryMetrics, FileMetrics, MetricsEntry, Threshold, DEFAULT_INDICATOR, PRESET_NAMES,
};
use std::path::Path;

#[test]
fn classify_picks_highest_reached_threshold() {
    let thresholds = vec![
        Threshold::new(0, "⚪", "Tiny size"),
        Threshold::new(100, "🔵", "Small size"),
        Threshold::new(500, "🟢", "Medium size"),
    ];

    assert_eq!(classify(99, &thresholds), "⚪");
    assert_eq!(classify(100, &thresholds), "🔵");
    assert_eq!(classify(500, &thresholds), "🟢");
    assert_eq!(classify(1_000_000, &thresholds), "🟢");
}

#[test]
fn classify_falls_back_on_empty_thresholds() {
    assert_eq!(classify(42, &[]), DEFAULT_INDICATOR);
}

#[test]
fn classify_resolves_equal_values_to_first_listed() {
    let thresholds = vec![
        Threshold::new(10, "🔵", "first"),
        Threshold::new(10, "🟢", "second"),
    ];
    assert_eq!(classify(15, &thresholds), "🔵");
}

#[test]
fn presets_resolve_and_unknown_names_do_not() {
    for name in PRESET_NAMES {
        assert!(preset(name).is_some(), "missing preset {name}");
    }
    assert!(preset("does-not-exist").is_none());

    let llm = preset("llm-context").unwrap();
    assert_eq!(llm.count_mode, CountMode::Tokens);
    assert_eq!(llm.thresholds.len(), 7);
}

#[test]
fn preset_thresholds_classify_sensibly() {
    let config = preset("default").unwrap();

    assert_eq!(classify(50, &config.thresholds), "⚪");
    assert_eq!(classify(750, &config.thresholds), "🟢");
    assert_eq!(classify(999_999, &config.thresholds), "⛔");
}

#[test]
fn symbol_sets_pair_with_values() {
    assert!(symbol_set("mood").is_some());

    let thresholds = thresholds_with_symbols(&[1000, 0, 200], "ascii-blocks").unwrap();
    assert_eq!(thresholds.len(), 3);
    assert_eq!(thresholds[0].value, 0);
    assert_eq!(thresholds[0].indicator, "▁");
    assert_eq!(thresholds[2].value, 1000);
    assert_eq!(thresholds[2].indicator, "▃");
}

#[test]
fn config_builder_and_extension_matching() {
    let config = CountingConfig::builder()
        .extensions(vec![".rs".to_string()])
        .thresholds(vec![Threshold::new(0, "⚪", "Tiny size")])
        .build()
        .unwrap();

    assert!(config.matches_extension(Path::new("lib.rs")));
    assert!(!config.matches_extension(Path::new("lib.go")));
    assert_eq!(config.count_mode, CountMode::Lines);
}

#[test]
fn metrics_entry_dispatches_exhaustively() {
    let file = FileMetrics::new("/r/a.rs", 12, 40, "⚪");
    let mut dir = DirectoryMetrics::empty("/r");
    dir.total_line_count = 12;
    dir.total_token_count = 40;
    dir.children.push(MetricsEntry::File(file.clone()));

    for entry in &dir.children {
        match entry {
            MetricsEntry::File(f) => assert_eq!(f.count_for(CountMode::Tokens), 40),
            MetricsEntry::Directory(_) => panic!("expected a file child"),
        }
    }

    let as_entry = MetricsEntry::Directory(dir);
    assert_eq!(as_entry.count_for(CountMode::Lines), 12);
    assert_eq!(as_entry.path(), Path::new("/r"));
}
