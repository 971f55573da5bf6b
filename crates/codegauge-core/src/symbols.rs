//! Indicator symbol sets.
//!
//! A symbol set is an ordered list of indicators from least to most severe.
//! Pairing a set with a list of threshold values produces ready-to-use
//! [`Threshold`]s without spelling out every indicator by hand.

use crate::config::Threshold;
use crate::error::ConfigError;

/// A named, ordered list of indicator symbols.
#[derive(Debug, Clone, Copy)]
pub struct SymbolSet {
    /// Lookup name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Symbols from least to most severe.
    pub symbols: &'static [&'static str],
}

/// Built-in symbol sets.
pub const SYMBOL_SETS: &[SymbolSet] = &[
    SymbolSet {
        name: "colored-circles",
        description: "Color-coded circles from white to red, ending with a stop sign",
        symbols: &["⚪", "🔵", "🟢", "🟡", "🟠", "🔴", "⛔"],
    },
    SymbolSet {
        name: "mood",
        description: "How a developer might feel when opening the file",
        symbols: &["🥰", "😊", "🤔", "😐", "😟", "😰", "🤯"],
    },
    SymbolSet {
        name: "documentation-icons",
        description: "Document-themed icons of increasing heft",
        symbols: &["📝", "📄", "📑", "📚", "📔", "📙", "📘"],
    },
    SymbolSet {
        name: "ascii-blocks",
        description: "Block characters of increasing height",
        symbols: &["▁", "▂", "▃", "▄", "▅", "▆", "▇"],
    },
    SymbolSet {
        name: "numbers",
        description: "Minimalist numeric badges",
        symbols: &["1", "2", "3", "4", "5", "6", "7"],
    },
];

/// Rank descriptions applied to generated thresholds, smallest first.
const RANK_DESCRIPTIONS: &[&str] = &[
    "Tiny size",
    "Small size",
    "Medium size",
    "Medium-large size",
    "Large size",
    "Very large size",
    "Extremely large size",
];

/// Look up a built-in symbol set by name.
pub fn symbol_set(name: &str) -> Option<&'static SymbolSet> {
    SYMBOL_SETS.iter().find(|set| set.name == name)
}

/// Build thresholds by pairing values with a symbol set's symbols.
///
/// Values are sorted ascending and each is assigned the set's symbol at the
/// same rank. Errors if the set is unknown or has fewer symbols than values.
pub fn thresholds_with_symbols(values: &[u64], set_name: &str) -> Result<Vec<Threshold>, ConfigError> {
    let set = symbol_set(set_name).ok_or_else(|| ConfigError::UnknownSymbolSet {
        name: set_name.to_string(),
    })?;

    if set.symbols.len() < values.len() {
        return Err(ConfigError::NotEnoughSymbols {
            name: set.name.to_string(),
            available: set.symbols.len(),
            needed: values.len(),
        });
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    Ok(sorted
        .into_iter()
        .enumerate()
        .map(|(rank, value)| {
            let description = RANK_DESCRIPTIONS
                .get(rank)
                .map(|d| (*d).to_string())
                .unwrap_or_else(|| format!("Level {}", rank + 1));
            Threshold::new(value, set.symbols[rank], description)
        })
        .collect())
}
