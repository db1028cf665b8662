// ⚙️ Site Configuration - TOML file with defaults
//
// Every field has a default so an absent or partial file still yields a
// usable config. CLI flags override whatever the file says.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SITEMAP_BATCH_SIZE: usize = 200;

/// Fixed member names inside the dataset archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveMembers {
    pub businesses: String,
    pub cities: String,
    pub states: String,
    pub categories: String,
}

impl Default for ArchiveMembers {
    fn default() -> Self {
        ArchiveMembers {
            businesses: "salons.csv".to_string(),
            cities: "cities.csv".to_string(),
            states: "states.csv".to_string(),
            categories: "categories.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Shown in page titles and the home page heading
    pub site_name: String,

    /// Absolute origin used in sitemap `<loc>` entries, no trailing slash
    pub base_url: String,

    /// Zip archive holding the four CSV members
    pub archive: PathBuf,

    /// Root of the generated tree
    pub output_dir: PathBuf,

    /// URLs per company sitemap shard
    pub sitemap_batch_size: usize,

    pub members: ArchiveMembers,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: "Salon Directory".to_string(),
            base_url: "https://example.com".to_string(),
            archive: PathBuf::from("data.zip"),
            output_dir: PathBuf::from("public"),
            sitemap_batch_size: DEFAULT_SITEMAP_BATCH_SIZE,
            members: ArchiveMembers::default(),
        }
    }
}

impl SiteConfig {
    /// Load config from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: SiteConfig =
            toml::from_str(content).context("Failed to parse config TOML")?;
        config.normalize();
        Ok(config)
    }

    /// Builder pattern: override base URL
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self.normalize();
        self
    }

    /// Builder pattern: override archive path
    pub fn with_archive<P: Into<PathBuf>>(mut self, archive: P) -> Self {
        self.archive = archive.into();
        self
    }

    /// Builder pattern: override output directory
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    fn normalize(&mut self) {
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        if self.sitemap_batch_size == 0 {
            self.sitemap_batch_size = DEFAULT_SITEMAP_BATCH_SIZE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.sitemap_batch_size, 200);
        assert_eq!(config.members.businesses, "salons.csv");
        assert_eq!(config.members.categories, "categories.csv");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SiteConfig::from_toml(
            r#"
            site_name = "Nail Finder"
            base_url = "https://nails.example/"

            [members]
            businesses = "companies.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.site_name, "Nail Finder");
        assert_eq!(config.base_url, "https://nails.example");
        assert_eq!(config.members.businesses, "companies.csv");
        assert_eq!(config.members.cities, "cities.csv");
        assert_eq!(config.sitemap_batch_size, 200);
    }

    #[test]
    fn test_zero_batch_size_falls_back() {
        let config = SiteConfig::from_toml("sitemap_batch_size = 0").unwrap();
        assert_eq!(config.sitemap_batch_size, DEFAULT_SITEMAP_BATCH_SIZE);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(SiteConfig::from_toml("site_name = [").is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = SiteConfig::default()
            .with_base_url("http://localhost:3000/")
            .with_output_dir("out");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}
