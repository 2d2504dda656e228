//! # Configuration
//!
//! Form thresholds are managed by [`confique`], which layers environment
//! variables over a TOML file over compiled defaults.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `max_image_bytes` | `500000` | Largest accepted image, inclusive |
//! | `accepted_image_types` | jpeg, jpg, png, webp | Accepted image MIME types |
//! | `default_rating` | `0` | Rating a fresh form starts with |
//! | `enforce_rating_max` | `false` | Also reject ratings above 5 |
//! | `refetch_after_create` | `true` | Reload the collection after a create |
//!
//! The image label advertises 5MB, but the enforced threshold is 500,000 bytes.
//! The default keeps the enforced value.
//!
//! `enforce_rating_max` is a behavior change over the historical form, which
//! advertised 1-5 but only checked the lower bound. It stays off unless asked for.

use crate::error::Result;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_RATING: f64 = 5.0;

fn default_accepted_image_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/jpg".to_string(),
        "image/png".to_string(),
        "image/webp".to_string(),
    ]
}

/// Configuration for the destination form.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FormConfig {
    /// Largest accepted image in bytes (inclusive)
    #[config(default = 500000, env = "DESTINASI_MAX_IMAGE_BYTES")]
    pub max_image_bytes: u64,

    /// Accepted image MIME types
    #[config(default = ["image/jpeg", "image/jpg", "image/png", "image/webp"])]
    pub accepted_image_types: Vec<String>,

    /// Rating value of a fresh form
    #[config(default = 0.0, env = "DESTINASI_DEFAULT_RATING")]
    pub default_rating: f64,

    /// Reject ratings above 5 as well as below 1
    #[config(default = false, env = "DESTINASI_ENFORCE_RATING_MAX")]
    pub enforce_rating_max: bool,

    /// Reload the record collection after a successful create
    #[config(default = true, env = "DESTINASI_REFETCH_AFTER_CREATE")]
    pub refetch_after_create: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 500_000,
            accepted_image_types: default_accepted_image_types(),
            default_rating: 0.0,
            enforce_rating_max: false,
            refetch_after_create: true,
        }
    }
}

impl FormConfig {
    /// Load from environment, then `path` (if it exists), then defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::builder().env().file(path.as_ref()).load()?;
        Ok(config)
    }
}
