use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// Mode

/// The framing protocol of reference values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// A null flag, then the value of the declared pointee type.
    ///
    /// No reference ids and no type tags: shared objects are written once
    /// per reference, cycles are not detected, and polymorphic pointees
    /// cannot be written.
    Minimal,
    /// Null flag, reference id, seen flag and an optional type tag.
    ///
    /// Supports shared objects, cycles and polymorphic pointees.
    #[default]
    Standard,
}

// -----------------------------------------------------------------------------
// EngineConfig

/// Configuration of an [`Engine`](crate::Engine).
///
/// # Examples
///
/// ```
/// use fsv_binary::{EngineConfig, Mode};
///
/// let config = EngineConfig::default();
/// assert_eq!(config.mode, Mode::Standard);
/// assert_eq!(config.max_depth, EngineConfig::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: Mode,
    /// Maximum nesting of strategy-written values in one pass. Option and
    /// shared-handle framing does not count.
    pub max_depth: usize,
}

impl EngineConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 2048;

    #[inline]
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for EngineConfig {
    #[inline]
    fn default() -> Self {
        Self::new(Mode::Standard)
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineConfig, Mode};

    #[test]
    fn json_round_trip() {
        let config = EngineConfig::new(Mode::Minimal).with_max_depth(64);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"mode":"Minimal","max_depth":64}"#);
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn ron_fills_missing_fields() {
        let config: EngineConfig = ron::from_str("(mode: Minimal)").unwrap();
        assert_eq!(config.mode, Mode::Minimal);
        assert_eq!(config.max_depth, EngineConfig::DEFAULT_MAX_DEPTH);

        let config: EngineConfig = ron::from_str("()").unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
