//! Threshold classification.

use compact_str::CompactString;

use crate::config::Threshold;

/// Indicator used when no threshold qualifies.
pub const DEFAULT_INDICATOR: &str = "⚪";

/// Map a count to the indicator of the highest threshold it reaches.
///
/// Thresholds are sorted descending by value before lookup; the stored order
/// is not trusted. The result is the indicator of the first threshold whose
/// value is at or below `count`. With equal values the earlier-listed
/// threshold wins (stable sort); duplicate values are a configuration-layer
/// concern, not validated here. An empty threshold list, or a count below
/// every value, yields [`DEFAULT_INDICATOR`].
pub fn classify(count: u64, thresholds: &[Threshold]) -> CompactString {
    let mut sorted: Vec<&Threshold> = thresholds.iter().collect();
    sorted.sort_by(|a, b| b.value.cmp(&a.value));

    for threshold in sorted {
        if count >= threshold.value {
            return threshold.indicator.clone();
        }
    }

    CompactString::const_new(DEFAULT_INDICATOR)
}
