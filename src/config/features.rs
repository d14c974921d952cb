//! Feature flags

use serde::Deserialize;

/// Runtime switches.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Include internal error messages in API responses. Keep off in production.
    #[serde(default)]
    pub verbose_errors: bool,

    /// Wrap the router in a request trace layer.
    #[serde(default = "default_enable_tracing")]
    pub enable_tracing: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            verbose_errors: false,
            enable_tracing: default_enable_tracing(),
        }
    }
}

fn default_enable_tracing() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_tracing_only() {
        let flags = FeatureFlags::default();
        assert!(!flags.verbose_errors);
        assert!(flags.enable_tracing);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let flags: FeatureFlags = serde_json::from_str(r#"{"verbose_errors": true}"#).unwrap();
        assert!(flags.verbose_errors);
        assert!(flags.enable_tracing);
    }
}
