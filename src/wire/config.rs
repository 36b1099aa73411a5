//! Configuration for event framing

use serde::Deserialize;

/// Default upper bound for a single framed event (1 MiB)
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Limits applied by [`EventReader`](super::EventReader) and [`EventWriter`](super::EventWriter)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Longest accepted line, excluding the trailing newline
    pub max_line_bytes: usize,

    /// Flush the underlying writer after every event
    pub flush_each_event: bool,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            flush_each_event: true,
        }
    }
}

impl FramingConfig {
    /// Set the maximum line length
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Leave flushing to the caller
    pub fn without_flush(mut self) -> Self {
        self.flush_each_event = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_line_bytes == 0 {
            return Err("max_line_bytes must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FramingConfig::default();
        assert_eq!(config.max_line_bytes, DEFAULT_MAX_LINE_BYTES);
        assert!(config.flush_each_event);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = FramingConfig::default()
            .with_max_line_bytes(64)
            .without_flush();

        assert_eq!(config.max_line_bytes, 64);
        assert!(!config.flush_each_event);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = FramingConfig::default().with_max_line_bytes(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: FramingConfig =
            serde_json::from_str(r#"{"max_line_bytes": 4096}"#).unwrap();

        assert_eq!(config.max_line_bytes, 4096);
        assert!(config.flush_each_event);
    }
}
