//! Image asset URL resolution

use super::document::ImageRef;
use crate::config::ProviderConfig;

const IMAGE_CDN: &str = "https://cdn.sanity.io/images";

/// Builds display URLs for uploaded image assets
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
        }
    }

    /// Resolve an image field to a URL, if it points anywhere usable
    pub fn resolve(&self, image: &ImageRef) -> Option<String> {
        let asset = image.asset.as_ref()?;
        if let Some(url) = asset.url.as_deref().filter(|u| !u.is_empty()) {
            return Some(url.to_string());
        }
        self.url_for_ref(asset.reference.as_deref()?)
    }

    /// Turn `image-<hash>-<w>x<h>-<format>` into a CDN URL
    ///
    /// # Examples
    /// ```ignore
    /// builder.url_for_ref("image-abc-800x600-png")
    /// // -> "https://cdn.sanity.io/images/<project>/<dataset>/abc-800x600.png"
    /// ```
    pub fn url_for_ref(&self, reference: &str) -> Option<String> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Some(reference.to_string());
        }
        if self.project_id.is_empty() {
            return None;
        }

        let rest = reference.strip_prefix("image-")?;
        let (id_and_size, format) = rest.rsplit_once('-')?;
        let (id, size) = id_and_size.rsplit_once('-')?;
        let (width, height) = size.split_once('x')?;
        if id.is_empty()
            || format.is_empty()
            || width.parse::<u32>().is_err()
            || height.parse::<u32>().is_err()
        {
            return None;
        }

        Some(format!(
            "{}/{}/{}/{}-{}.{}",
            IMAGE_CDN, self.project_id, self.dataset, id, size, format
        ))
    }
}
