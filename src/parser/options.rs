//! Parsing options and configuration.

/// Vertical gap, as a multiple of the average line spacing, that starts a new block.
pub const DEFAULT_BLOCK_GAP_RATIO: f32 = 1.5;

/// Options for parsing PDF documents into page layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Error handling mode for pages whose content cannot be decoded
    pub error_mode: ErrorMode,

    /// Line gap ratio that separates two text blocks
    pub block_gap_ratio: f32,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (undecodable pages become empty pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the block gap ratio. Values below 1.0 are clamped to 1.0.
    pub fn with_block_gap_ratio(mut self, ratio: f32) -> Self {
        self.block_gap_ratio = ratio.max(1.0);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            block_gap_ratio: DEFAULT_BLOCK_GAP_RATIO,
        }
    }
}

/// How failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Log, skip the failing unit and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().lenient().with_block_gap_ratio(2.0);
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.block_gap_ratio, 2.0);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.block_gap_ratio, DEFAULT_BLOCK_GAP_RATIO);
    }

    #[test]
    fn test_gap_ratio_clamped() {
        let options = ParseOptions::new().with_block_gap_ratio(0.2);
        assert_eq!(options.block_gap_ratio, 1.0);
    }
}
