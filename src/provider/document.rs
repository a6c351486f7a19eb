//! Raw post documents as returned by the content provider

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A post document in provider form
///
/// Everything except the document id is optional; [`crate::content::PostNormalizer`]
/// decides what a missing field turns into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub slug: Option<Slug>,

    #[serde(default)]
    pub excerpt: Option<String>,

    /// Rich-text blocks
    #[serde(default)]
    pub body: Option<Vec<Value>>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub published_at: Option<String>,

    #[serde(default)]
    pub read_time: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub main_image: Option<ImageRef>,
}

/// Slug as a projected string or as the provider's `{ current }` object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slug {
    Plain(String),
    Object { current: String },
}

impl Slug {
    pub fn as_str(&self) -> &str {
        match self {
            Slug::Plain(s) => s,
            Slug::Object { current } => current,
        }
    }
}

/// Image field pointing at an uploaded asset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub asset: Option<AssetRef>,
}

/// Asset reference, either unresolved (`_ref`) or dereferenced (`url`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// Response envelope of the query endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse<T> {
    pub result: T,
}
