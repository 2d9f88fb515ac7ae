//! # Quote Settings
//!
//! Configuration constants consumed by the calculation engine and the
//! document composer. Settings are read from a TOML file; any key that is
//! left out falls back to its default, so an empty file is a valid config.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::settings::QuoteSettings;
//!
//! let settings = QuoteSettings::from_toml_str(
//!     r#"
//!     volumetric_divisor = 6000.0
//!
//!     [branding]
//!     title = "ACME FREIGHT"
//!     "#,
//!     "inline",
//! ).unwrap();
//!
//! assert_eq!(settings.volumetric_divisor, 6000.0);
//! assert_eq!(settings.validity_days, 7);
//! assert_eq!(settings.branding.title, "ACME FREIGHT");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};

/// Standard air-freight volumetric factor (cm³ per kg)
pub const VOLUMETRIC_WEIGHT_DIVISOR: f64 = 5000.0;

/// Days a quotation stays valid after its issue date
pub const QUOTE_VALIDITY_DAYS: u32 = 7;

/// Delivery country used when the form leaves it unset
pub const DEFAULT_COUNTRY: &str = "India";

/// Currency code all amounts are quoted in
pub const DEFAULT_CURRENCY: &str = "AED";

/// Calculation and rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
    /// Divisor turning L×B×H (cm³) into volumetric kilograms
    pub volumetric_divisor: f64,

    /// Validity window added to the issue date
    pub validity_days: u32,

    /// Delivery country applied when the form has none
    pub default_country: String,

    /// Currency code used by the currency formatter
    pub currency: String,

    /// Fixed header and footer text
    pub branding: Branding,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        QuoteSettings {
            volumetric_divisor: VOLUMETRIC_WEIGHT_DIVISOR,
            validity_days: QUOTE_VALIDITY_DAYS,
            default_country: DEFAULT_COUNTRY.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            branding: Branding::default(),
        }
    }
}

impl QuoteSettings {
    /// Parse settings from TOML text. `source_name` is only used in errors.
    pub fn from_toml_str(text: &str, source_name: &str) -> QuoteResult<Self> {
        let settings: QuoteSettings = toml::from_str(text)
            .map_err(|e| QuoteError::config_error(source_name, e.to_string()))?;
        settings.validate(source_name)?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> QuoteResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            QuoteError::file_error("read settings", path.display().to_string(), e.to_string())
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Load settings from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> QuoteResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self, source_name: &str) -> QuoteResult<()> {
        if !self.volumetric_divisor.is_finite() || self.volumetric_divisor <= 0.0 {
            return Err(QuoteError::config_error(
                source_name,
                format!(
                    "volumetric_divisor must be a positive number, got {}",
                    self.volumetric_divisor
                ),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(QuoteError::config_error(source_name, "currency must not be empty"));
        }
        Ok(())
    }
}

/// Company identity printed in the header and footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Large title at the top left
    pub title: String,

    /// Contact lines under the title
    pub contact_lines: Vec<String>,

    /// Footer terms, printed under the "Terms & Conditions:" heading
    pub terms: String,

    /// Centered closing line
    pub thank_you: String,
}

impl Default for Branding {
    fn default() -> Self {
        Branding {
            title: "VOXAREL".to_string(),
            contact_lines: vec![
                "Voxarel Logistics".to_string(),
                "Dubai, United Arab Emirates".to_string(),
                "contact@voxarel.com".to_string(),
            ],
            terms: "1. All charges are in AED. | 2. Transit time is an estimate and not guaranteed."
                .to_string(),
            thank_you: "Thank you for your business!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn test_defaults() {
        let settings = QuoteSettings::default();
        assert_eq!(settings.volumetric_divisor, 5000.0);
        assert_eq!(settings.validity_days, 7);
        assert_eq!(settings.default_country, "India");
        assert_eq!(settings.currency, "AED");
        assert_eq!(settings.branding.title, "VOXAREL");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let settings = QuoteSettings::from_toml_str("", "empty").unwrap();
        assert_eq!(settings, QuoteSettings::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let settings = QuoteSettings::from_toml_str(
            "validity_days = 14\ndefault_country = \"Kenya\"\n",
            "partial",
        )
        .unwrap();
        assert_eq!(settings.validity_days, 14);
        assert_eq!(settings.default_country, "Kenya");
        assert_eq!(settings.volumetric_divisor, 5000.0);
        assert_eq!(settings.branding, Branding::default());
    }

    #[test]
    fn test_rejects_zero_divisor() {
        let err = QuoteSettings::from_toml_str("volumetric_divisor = 0.0", "zero").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = QuoteSettings::from_toml_str("validity_days = \"seven\"", "bad").unwrap_err();
        assert!(matches!(err, QuoteError::ConfigError { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_dir().join("quote_core_test_settings.toml");
        fs::write(&path, "currency = \"USD\"\n").unwrap();

        let settings = QuoteSettings::load(&path).unwrap();
        assert_eq!(settings.currency, "USD");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_is_file_error() {
        let path = temp_dir().join("quote_core_test_settings_missing.toml");
        let err = QuoteSettings::load(&path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
