//! agency-blog: blog content layer for a recruitment agency marketing site
//!
//! Posts come from a headless content provider when one is configured and
//! reachable, and from a static collection bundled with the binary otherwise.
//! Either way they are normalized into a single [`content::Post`] shape and
//! cached for a short window before being rendered or served.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod provider;
pub mod server;
pub mod store;
pub mod templates;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use content::StaticPosts;
use provider::SanityProvider;
use store::ContentStore;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// Post access shared by commands and the server
    pub store: Arc<ContentStore<SanityProvider>>,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        let provider = if config.provider.is_enabled() {
            tracing::debug!("Content provider project: {}", config.provider.project_id);
            Some(SanityProvider::new(&config.provider)?)
        } else {
            tracing::info!("No content provider configured, serving bundled posts");
            None
        };

        let store = ContentStore::new(&config, provider, StaticPosts::bundled()?);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
            store: Arc::new(store),
        })
    }

    /// Write the blog pages to the public directory
    pub async fn generate(&self) -> Result<usize> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
