//! Headless content provider access
//!
//! The provider is an external, read-only query service. Failures here are
//! reported as [`ProviderError`]; deciding what to serve instead is left to
//! [`crate::store::ContentStore`].

mod document;
mod image;
mod sanity;

use std::future::Future;

pub use document::{AssetRef, ImageRef, PostDocument, Slug};
pub use image::ImageUrlBuilder;
pub use sanity::SanityProvider;

/// Fields projected for every post query
const POST_PROJECTION: &str = r#"{
  _id,
  title,
  "slug": slug.current,
  excerpt,
  body,
  "author": author->name,
  publishedAt,
  readTime,
  "category": categories[0]->title,
  mainImage
}"#;

/// Query for all posts, newest first
pub fn all_posts_query() -> String {
    format!(
        r#"*[_type == "post"] | order(publishedAt desc) {}"#,
        POST_PROJECTION
    )
}

/// Query for a single post, parameterized by `$slug`
///
/// Matches the document id as well, since that is the post id of documents
/// without a slug.
pub fn post_by_slug_query() -> String {
    format!(
        r#"*[_type == "post" && (slug.current == $slug || _id == $slug)][0] {}"#,
        POST_PROJECTION
    )
}

/// Errors from talking to the content provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid provider url: {0}")]
    InvalidUrl(String),
}

/// A source of post documents
pub trait ContentProvider: Send + Sync {
    /// Fetch every post ordered by publish date, newest first
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<PostDocument>, ProviderError>> + Send;

    /// Fetch the post whose slug (or, failing that, document id) is `slug`
    fn fetch_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<PostDocument>, ProviderError>> + Send;
}
