//! Safety hook configuration.
//!
//! The only knob is the hardware variant; it is fixed at init and cannot be
//! changed over the bus.
//!
//! # Config File Format
//!
//! ```toml
//! [safety]
//! variant = "gateway"   # standalone | nidec | gateway | bosch
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::domain::HardwareVariant;
use crate::error::{ConfigError, ConfigResult};

/// Environment variable selecting the variant.
pub const VARIANT_ENV: &str = "SAFETY_VARIANT";

/// Safety configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Device topology.
    #[serde(default)]
    pub variant: HardwareVariant,
}

/// Configuration file structure.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    safety: SafetyConfig,
}

impl SafetyConfig {
    pub fn new(variant: HardwareVariant) -> Self {
        Self { variant }
    }

    /// Create configuration from environment variables.
    ///
    /// - `SAFETY_VARIANT`: `standalone|nidec|gateway|bosch` (default: standalone)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVariant`] for an unrecognized value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        match lookup(VARIANT_ENV) {
            Some(value) => Ok(Self::new(value.parse()?)),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.safety)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_standalone() {
        assert_eq!(SafetyConfig::default().variant, HardwareVariant::Standalone);
    }

    #[test]
    fn test_parse_variant() {
        let config = SafetyConfig::parse("[safety]\nvariant = \"gateway\"\n").unwrap();
        assert_eq!(config.variant, HardwareVariant::Gateway);

        let config = SafetyConfig::parse("[safety]\nvariant = \"bosch\"\n").unwrap();
        assert_eq!(config.variant, HardwareVariant::Gateway);
    }

    #[test]
    fn test_parse_variant_ignores_case_like_env() {
        let config = SafetyConfig::parse("[safety]\nvariant = \"Bosch\"\n").unwrap();
        assert_eq!(config.variant, HardwareVariant::Gateway);

        let config = SafetyConfig::parse("[safety]\nvariant = \" NIDEC \"\n").unwrap();
        assert_eq!(config.variant, HardwareVariant::Standalone);

        let from_env = SafetyConfig::from_lookup(|_| Some("Bosch".to_string())).unwrap();
        assert_eq!(from_env.variant, HardwareVariant::Gateway);
    }

    #[test]
    fn test_serialized_variant_is_lowercase() {
        let text = toml::to_string(&SafetyConfig::new(HardwareVariant::Gateway)).unwrap();
        assert_eq!(text.trim(), "variant = \"gateway\"");
    }

    #[test]
    fn test_from_lookup_unset_is_default() {
        let config = SafetyConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SafetyConfig::default());
    }

    #[test]
    fn test_from_lookup_reads_variant_key() {
        let config = SafetyConfig::from_lookup(|key| {
            (key == VARIANT_ENV).then(|| "gateway".to_string())
        })
        .unwrap();
        assert_eq!(config.variant, HardwareVariant::Gateway);
    }

    #[test]
    fn test_from_lookup_rejects_unknown_variant() {
        let err = SafetyConfig::from_lookup(|_| Some("toyota".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVariant(v) if v == "toyota"));
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        assert_eq!(SafetyConfig::parse("").unwrap(), SafetyConfig::default());
        assert_eq!(SafetyConfig::parse("[safety]\n").unwrap(), SafetyConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_variant() {
        let err = SafetyConfig::parse("[safety]\nvariant = \"toyota\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[safety]\nvariant = \"nidec\"").unwrap();

        let config = SafetyConfig::load(file.path()).unwrap();
        assert_eq!(config.variant, HardwareVariant::Standalone);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SafetyConfig::load("/nonexistent/safety.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
