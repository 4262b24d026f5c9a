use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ConfigError;

/// A brand entry from the seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandConfig {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub notes: Option<String>,
}

impl BrandConfig {
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Generate a URL-safe slug from a brand name.
///
/// The result only ever contains `[a-z0-9-]`, so it is always usable as a
/// storage key segment once non-empty.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c == ' ' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Deserialize)]
pub struct BrandsFile {
    pub brands: Vec<BrandConfig>,
}

/// A tracked brand as stored at `brand:{slug}:meta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandRecord {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl BrandRecord {
    #[must_use]
    pub fn new(name: &str, keywords: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            slug: slugify(name),
            keywords,
            created_at: Utc::now(),
        }
    }
}

impl From<&BrandConfig> for BrandRecord {
    fn from(config: &BrandConfig) -> Self {
        BrandRecord::new(&config.name, config.keywords.clone())
    }
}

/// Load and validate the brand seed file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brands(path: &Path) -> Result<BrandsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_brands(&content)
}

/// Parse and validate brand YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_brands(content: &str) -> Result<BrandsFile, ConfigError> {
    let brands_file: BrandsFile = serde_yaml::from_str(content)?;
    validate_brands(&brands_file)?;
    Ok(brands_file)
}

fn validate_brands(brands_file: &BrandsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for brand in &brands_file.brands {
        if brand.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        let slug = brand.slug();
        if slug.is_empty() {
            return Err(ConfigError::Validation(format!(
                "brand '{}' produces an empty slug",
                brand.name
            )));
        }

        let lower_name = brand.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand name: '{}'",
                brand.name
            )));
        }

        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand slug: '{}' (from brand '{}')",
                slug, brand.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
