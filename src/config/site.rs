//! Site configuration (_config.yml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub blog_dir: String,
    pub public_dir: String,

    // Date format (Moment.js style)
    pub date_format: String,

    /// Values used when a provider document leaves a field empty
    pub defaults: DefaultsConfig,

    /// Headless content provider
    pub provider: ProviderConfig,

    /// Query result caching
    pub cache: CacheConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            blog_dir: "blog".to_string(),
            public_dir: "public".to_string(),

            date_format: "MMMM DD, YYYY".to_string(),

            defaults: DefaultsConfig::default(),
            provider: ProviderConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the router and the static export cannot work with
    pub fn validate(&self) -> Result<()> {
        let blog_dir = self.blog_dir.trim_matches('/');
        if blog_dir.is_empty() {
            bail!("blog_dir must name a directory below the site root");
        }
        if blog_dir
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            bail!("blog_dir {:?} is not a plain relative path", self.blog_dir);
        }
        Ok(())
    }

    /// Apply `BLOG_PROVIDER_*` environment overrides
    pub fn apply_env(&mut self) {
        self.provider.apply_overrides(|key| std::env::var(key).ok());
    }
}

/// Fallback values for optional post fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub author: String,
    pub category: String,
    pub image: String,
    pub date: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            author: "Editorial Team".to_string(),
            category: "Insights".to_string(),
            image: "/images/blog/default.jpg".to_string(),
            date: "Recently".to_string(),
        }
    }
}

/// Headless content provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    pub token: Option<String>,
    pub timeout_secs: u64,

    /// Base URL replacing the hosted query API, e.g. a local mirror
    pub endpoint: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
            token: None,
            timeout_secs: 10,
            endpoint: None,
        }
    }
}

impl ProviderConfig {
    /// The provider is only queried once a project id is known
    pub fn is_enabled(&self) -> bool {
        !self.project_id.trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(project_id) = lookup("BLOG_PROVIDER_PROJECT_ID") {
            self.project_id = project_id;
        }
        if let Some(dataset) = lookup("BLOG_PROVIDER_DATASET") {
            self.dataset = dataset;
        }
        if let Some(token) = lookup("BLOG_PROVIDER_TOKEN") {
            self.token = Some(token).filter(|t| !t.is_empty());
        }
    }
}

/// Freshness window and size bound for cached query results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            max_entries: 1024,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
