//! Configuration knobs for splitting and matching key lists.

use serde::{Deserialize, Serialize};

/// The match-everything pattern put into empty search buckets.
pub const DEFAULT_MATCH_ALL: &str = "*.*";

/// Characters separating the keys of a list.
pub const DEFAULT_DELIMITERS: &str = " ;,";

/// Character removed from every key, wherever it occurs.
pub const DEFAULT_QUOTE: char = '"';

/// Settings used by [`EnumKeys`](crate::EnumKeys).
///
/// Missing fields fall back to their defaults when deserializing, so partial configuration
/// files are fine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Pattern used for search buckets which ended up empty.
    pub default_pattern: String,

    /// Set of delimiter characters. Runs of them collapse.
    pub delimiters: String,

    /// Quote character stripped from keys.
    pub quote: char,

    /// Fold ASCII case when matching candidate paths against keys.
    pub ignore_case: bool,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            default_pattern: DEFAULT_MATCH_ALL.to_string(),
            delimiters: DEFAULT_DELIMITERS.to_string(),
            quote: DEFAULT_QUOTE,
            ignore_case: true,
        }
    }
}

impl KeyConfig {
    /// Check whether `ch` separates keys.
    #[inline]
    pub fn is_delimiter(&self, ch: char) -> bool {
        self.delimiters.contains(ch)
    }
}

#[test]
fn test_partial_config() {
    let config: KeyConfig = serde_json::from_str(r#"{ "delimiters": "|" }"#).unwrap();
    assert_eq!(config.delimiters, "|");
    assert_eq!(config.default_pattern, DEFAULT_MATCH_ALL);
    assert_eq!(config.quote, '"');
    assert!(config.ignore_case);

    assert!(config.is_delimiter('|'));
    assert!(!config.is_delimiter(';'));

    let config: KeyConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, KeyConfig::default());
    assert!(config.is_delimiter(' '));
    assert!(config.is_delimiter(';'));
    assert!(config.is_delimiter(','));
}
