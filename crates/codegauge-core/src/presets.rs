//! Built-in counting presets.

use crate::config::{CountMode, CountingConfig, Threshold};

/// Names of the built-in presets, in display order.
pub const PRESET_NAMES: &[&str] = &["default", "llm-context", "code-review", "documentation"];

/// Look up a built-in preset by name.
pub fn preset(name: &str) -> Option<CountingConfig> {
    match name {
        "default" => Some(CountingConfig::new(
            CountMode::Lines,
            [".js", ".ts", ".py", ".html", ".css"],
            vec![
                Threshold::new(0, "⚪", "Tiny size"),
                Threshold::new(100, "🔵", "Small size"),
                Threshold::new(500, "🟢", "Medium size"),
                Threshold::new(1000, "🟡", "Medium-large size"),
                Threshold::new(2000, "🟠", "Approaching large size"),
                Threshold::new(5000, "🔴", "Large, consider splitting"),
                Threshold::new(10000, "⛔", "Very large, should be split"),
            ],
        )),
        "llm-context" => Some(CountingConfig::new(
            CountMode::Tokens,
            [".txt", ".md", ".json", ".py", ".js"],
            vec![
                Threshold::new(0, "⚪", "Tiny size"),
                Threshold::new(2000, "🔵", "2K token context"),
                Threshold::new(4000, "🟢", "4K token context"),
                Threshold::new(8000, "🟡", "8K token context"),
                Threshold::new(16000, "🟠", "16K token context"),
                Threshold::new(32000, "🔴", "32K token context"),
                Threshold::new(64000, "⛔", "Exceeds most context windows"),
            ],
        )),
        "code-review" => Some(CountingConfig::new(
            CountMode::Lines,
            [".js", ".ts", ".py", ".java", ".c", ".cpp", ".cs", ".go", ".rs"],
            vec![
                Threshold::new(0, "✅", "Easy to review"),
                Threshold::new(50, "🟩", "Quick review"),
                Threshold::new(200, "🟨", "Moderate review time"),
                Threshold::new(500, "🟧", "Detailed review needed"),
                Threshold::new(1000, "🟥", "Extensive review required"),
                Threshold::new(2000, "⚠️", "Consider splitting for review"),
                Threshold::new(5000, "🛑", "Too large for effective review"),
            ],
        )),
        "documentation" => Some(CountingConfig::new(
            CountMode::Lines,
            [".md", ".txt", ".rst", ".adoc", ".docx", ".tex"],
            vec![
                Threshold::new(0, "📝", "Note"),
                Threshold::new(100, "📄", "Brief document"),
                Threshold::new(500, "📑", "Multi-page document"),
                Threshold::new(1000, "📚", "Chapter-sized content"),
                Threshold::new(3000, "📔", "Large document"),
                Threshold::new(10000, "📙", "Book-sized content"),
                Threshold::new(30000, "📘", "Comprehensive documentation"),
            ],
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_listed_presets_resolve() {
        for name in PRESET_NAMES {
            let config = preset(name).unwrap();
            assert!(!config.extensions.is_empty());
            assert_eq!(config.thresholds.len(), 7);
        }
    }

    #[test]
    fn test_llm_context_counts_tokens() {
        let config = preset("llm-context").unwrap();
        assert_eq!(config.count_mode, CountMode::Tokens);
        assert_eq!(config.thresholds[1].value, 2000);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(preset("nonexistent").is_none());
    }
}
