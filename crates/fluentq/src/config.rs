//! Processor configuration.
//!
//! One [`ProcessorConfig`] is shared by the compiler, the processor and the
//! value dispatcher, so every rendering path applies the same policies.

use serde::Deserialize;

use crate::error::{QueryError, QueryResult};

/// What to do with `%%name` when `name` is not a known directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownDirectivePolicy {
    /// Fail with [`QueryError::UnknownDirective`].
    #[default]
    Error,
    /// Keep the `%%name` text verbatim.
    Preserve,
}

/// Configuration shared by the processor, compiler and value dispatcher.
///
/// # Example
/// ```ignore
/// use fluentq::{ProcessorConfig, UnknownDirectivePolicy};
///
/// let config = ProcessorConfig::new()
///     .unknown_directive(UnknownDirectivePolicy::Preserve)
///     .max_log_length(80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Policy for unknown directive names (compiler and processor alike).
    pub unknown_directive: UnknownDirectivePolicy,
    /// Emit unsupported values as unescaped text instead of failing.
    pub raw_fallback: bool,
    /// Whether to emit `tracing` events for compile/complete.
    pub log_templates: bool,
    /// Truncate logged templates (in bytes). `None` means no truncation.
    pub max_log_length: Option<usize>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            unknown_directive: UnknownDirectivePolicy::Error,
            raw_fallback: false,
            log_templates: true,
            max_log_length: Some(200),
        }
    }
}

impl ProcessorConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    ///
    /// ```toml
    /// unknown_directive = "preserve"
    /// raw_fallback = false
    /// max_log_length = 120
    /// ```
    pub fn from_toml_str(raw: &str) -> QueryResult<Self> {
        toml::from_str(raw).map_err(|e| QueryError::Config(e.to_string()))
    }

    /// Set the unknown directive policy.
    pub fn unknown_directive(mut self, policy: UnknownDirectivePolicy) -> Self {
        self.unknown_directive = policy;
        self
    }

    /// Allow unsupported values to pass through unescaped.
    ///
    /// This is an injection risk; only enable it for trusted inputs.
    pub fn allow_raw_fallback(mut self) -> Self {
        self.raw_fallback = true;
        self
    }

    /// Enable template logging.
    pub fn enable_logging(mut self) -> Self {
        self.log_templates = true;
        self
    }

    /// Disable template logging.
    pub fn disable_logging(mut self) -> Self {
        self.log_templates = false;
        self
    }

    /// Set maximum logged template length.
    pub fn max_log_length(mut self, len: usize) -> Self {
        self.max_log_length = Some(len);
        self
    }

    /// Disable template truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_log_length = None;
        self
    }

    pub(crate) fn preserves_unknown(&self) -> bool {
        self.unknown_directive == UnknownDirectivePolicy::Preserve
    }
}
