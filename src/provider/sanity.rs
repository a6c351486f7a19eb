//! HTTP client for the provider's query endpoint

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::document::QueryResponse;
use super::{all_posts_query, post_by_slug_query, ContentProvider, PostDocument, ProviderError};
use crate::config::ProviderConfig;

/// Characters left as-is in query-string values
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Content provider reached over HTTP
#[derive(Debug, Clone)]
pub struct SanityProvider {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl SanityProvider {
    /// Create a client from provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: endpoint(config)?,
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Full request URL for `query` with JSON-encoded `$name` parameters
    pub fn query_url(&self, query: &str, params: &[(&str, &str)]) -> Result<String, ProviderError> {
        let mut url = format!(
            "{}?query={}",
            self.endpoint,
            utf8_percent_encode(query, QUERY_VALUE)
        );
        for (name, value) in params {
            let encoded = serde_json::to_string(value)?;
            url.push_str(&format!(
                "&${}={}",
                name,
                utf8_percent_encode(&encoded, QUERY_VALUE)
            ));
        }
        Ok(url)
    }

    async fn run<T: DeserializeOwned>(&self, url: String) -> Result<T, ProviderError> {
        tracing::debug!("Querying content provider: {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: QueryResponse<T> = serde_json::from_str(&body)?;
        Ok(envelope.result)
    }
}

impl ContentProvider for SanityProvider {
    async fn fetch_all(&self) -> Result<Vec<PostDocument>, ProviderError> {
        let url = self.query_url(&all_posts_query(), &[])?;
        let posts: Option<Vec<PostDocument>> = self.run(url).await?;
        Ok(posts.unwrap_or_default())
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<PostDocument>, ProviderError> {
        let url = self.query_url(&post_by_slug_query(), &[("slug", slug)])?;
        self.run(url).await
    }
}

/// Base query endpoint for a project and dataset
fn endpoint(config: &ProviderConfig) -> Result<String, ProviderError> {
    let project_id = config.project_id.trim();
    let valid_name = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    };

    if !valid_name(project_id) {
        return Err(ProviderError::InvalidUrl(format!(
            "bad project id {:?}",
            config.project_id
        )));
    }
    if !valid_name(&config.dataset) {
        return Err(ProviderError::InvalidUrl(format!(
            "bad dataset {:?}",
            config.dataset
        )));
    }

    // Authenticated requests bypass the CDN
    let host = if config.use_cdn && config.token.is_none() {
        "apicdn"
    } else {
        "api"
    };
    let version = config.api_version.trim_start_matches('v');

    let base = match config.endpoint.as_deref().map(str::trim) {
        Some(base) if base.starts_with("http://") || base.starts_with("https://") => {
            base.trim_end_matches('/').to_string()
        }
        Some(base) => {
            return Err(ProviderError::InvalidUrl(format!("bad endpoint {:?}", base)));
        }
        None => format!("https://{}.{}.sanity.io", project_id, host),
    };

    Ok(format!("{}/v{}/data/query/{}", base, version, config.dataset))
}
