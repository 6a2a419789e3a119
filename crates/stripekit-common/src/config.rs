//! Codec configuration
//!
//! `CodecConfig` is a flat string key/value map consulted by the coder
//! resolver. The two well-known keys below name an override factory for a
//! codec family; an unset key means "use the built-in default".

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration key naming the Reed-Solomon raw coder factory override
pub const RS_RAWCODER_FACTORY_KEY: &str = "erasurecode.codec.rs.rawcoder.factory";

/// Configuration key naming the XOR raw coder factory override
pub const XOR_RAWCODER_FACTORY_KEY: &str = "erasurecode.codec.xor.rawcoder.factory";

/// Codec configuration map
///
/// Immutable once built, so it is safe to share across threads for
/// concurrent resolution calls.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodecConfig {
    #[serde(flatten)]
    entries: HashMap<String, String>,
}

impl CodecConfig {
    /// Create an empty configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a configuration entry
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`set`](Self::set)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Get a raw configuration value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up the factory name configured under `key`
    ///
    /// Blank values count as unset, mirroring an absent entry.
    #[must_use]
    pub fn factory_name(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|name| !name.is_empty())
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the configuration holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut conf = CodecConfig::new();
        assert!(conf.is_empty());
        conf.set(RS_RAWCODER_FACTORY_KEY, "my-factory");
        assert_eq!(conf.get(RS_RAWCODER_FACTORY_KEY), Some("my-factory"));
        assert_eq!(conf.len(), 1);
    }

    #[test]
    fn test_factory_name_blank_is_unset() {
        let conf = CodecConfig::new().with(XOR_RAWCODER_FACTORY_KEY, "   ");
        assert_eq!(conf.factory_name(XOR_RAWCODER_FACTORY_KEY), None);
        assert_eq!(conf.factory_name(RS_RAWCODER_FACTORY_KEY), None);
    }

    #[test]
    fn test_factory_name_trims() {
        let conf = CodecConfig::new().with(RS_RAWCODER_FACTORY_KEY, " fast-rs ");
        assert_eq!(conf.factory_name(RS_RAWCODER_FACTORY_KEY), Some("fast-rs"));
    }

    #[test]
    fn test_serde_round_trip() {
        let conf = CodecConfig::new().with(RS_RAWCODER_FACTORY_KEY, "fast-rs");
        let json = serde_json::to_string(&conf).unwrap();
        let back: CodecConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, conf);
    }
}
