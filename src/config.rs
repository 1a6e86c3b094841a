//! Verifier configuration.

/// Knobs for [`crate::protocol::Protocol::verify_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Stop at the first rejected query (sequential mode only).
    pub fail_fast: bool,
    /// Check queries on the rayon pool. Ignored without the `parallel` feature.
    pub parallel: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            fail_fast: true,
            parallel: false,
        }
    }
}

impl VerifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether checks actually run in parallel with the compiled feature set.
    pub fn runs_parallel(&self) -> bool {
        self.parallel && cfg!(feature = "parallel")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let cfg = VerifierConfig::new().with_fail_fast(false).with_parallel(true);
        assert!(!cfg.fail_fast);
        assert!(cfg.parallel);
        assert_eq!(cfg.runs_parallel(), cfg!(feature = "parallel"));
        assert!(VerifierConfig::default().fail_fast);
    }
}
