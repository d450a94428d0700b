//! Configuration for the F-Pack service module

use serde::{Deserialize, Serialize};

/// F-Pack service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Decimal places of presented quote amounts
    #[serde(default = "default_price_scale")]
    pub price_scale: u32,

    /// Appended to the name of duplicated templates and products
    #[serde(default = "default_copy_suffix")]
    pub copy_suffix: String,

    /// Check that column, group item and selection targets exist when authored
    #[serde(default = "default_true")]
    pub validate_references: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            price_scale: default_price_scale(),
            copy_suffix: default_copy_suffix(),
            validate_references: true,
        }
    }
}

fn default_price_scale() -> u32 {
    2
}

fn default_copy_suffix() -> String {
    " (copy)".to_string()
}

fn default_true() -> bool {
    true
}
