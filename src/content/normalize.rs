//! Conversion of provider documents into normalized posts

use chrono::{DateTime, NaiveDate, Utc};

use super::portable_text;
use super::post::{estimate_read_time, Post};
use crate::config::{DefaultsConfig, SiteConfig};
use crate::helpers::{format_date, is_valid_post_id, truncate};
use crate::provider::{ImageUrlBuilder, PostDocument};

/// Length of excerpts derived from the post body
const EXCERPT_LENGTH: usize = 160;

/// Turns raw provider documents into [`Post`]s
#[derive(Debug, Clone)]
pub struct PostNormalizer {
    images: ImageUrlBuilder,
    date_format: String,
    defaults: DefaultsConfig,
}

impl PostNormalizer {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            images: ImageUrlBuilder::new(&config.provider),
            date_format: config.date_format.clone(),
            defaults: config.defaults.clone(),
        }
    }

    /// Normalize a single document, filling every missing field
    ///
    /// The post id is the document slug, or the document id when there is no
    /// slug; both are what the by-id query matches on. Documents whose id
    /// cannot be routed (drafts, path-like slugs) are skipped.
    pub fn normalize(&self, doc: PostDocument) -> Option<Post> {
        let id = doc
            .slug
            .as_ref()
            .map(|slug| slug.as_str().trim().to_string())
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| doc.id.clone());
        if !is_valid_post_id(&id) {
            tracing::warn!("Skipping document {:?} with unroutable id {:?}", doc.id, id);
            return None;
        }

        let body = doc.body.unwrap_or_default();
        let plain_text = portable_text::to_plain_text(&body);

        let excerpt = non_empty(doc.excerpt)
            .unwrap_or_else(|| truncate(&plain_text, EXCERPT_LENGTH, None));

        let date = doc
            .published_at
            .as_deref()
            .and_then(parse_published_at)
            .map(|date| format_date(&date, &self.date_format))
            .unwrap_or_else(|| self.defaults.date.clone());

        let image = doc
            .main_image
            .as_ref()
            .and_then(|image| self.images.resolve(image))
            .unwrap_or_else(|| self.defaults.image.clone());

        Some(Post {
            id,
            title: non_empty(doc.title).unwrap_or_else(|| "Untitled".to_string()),
            excerpt,
            content: portable_text::to_html(&body),
            author: non_empty(doc.author).unwrap_or_else(|| self.defaults.author.clone()),
            date,
            read_time: non_empty(doc.read_time).unwrap_or_else(|| estimate_read_time(&plain_text)),
            category: non_empty(doc.category).unwrap_or_else(|| self.defaults.category.clone()),
            image,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date
fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalizer() -> PostNormalizer {
        let mut config = SiteConfig::default();
        config.provider.project_id = "proj".to_string();
        PostNormalizer::new(&config)
    }

    #[test]
    fn test_full_document() {
        let doc: PostDocument = serde_json::from_value(json!({
            "_id": "doc-1",
            "title": "Scaling a Boutique Agency",
            "slug": "scaling-a-boutique-agency",
            "excerpt": "How small teams grow.",
            "body": [
                { "_type": "block", "style": "h2", "children": [{ "_type": "span", "text": "Start" }] }
            ],
            "author": "Dana Ruiz",
            "publishedAt": "2024-03-05T09:00:00Z",
            "readTime": "4 min read",
            "category": "Growth",
            "mainImage": { "asset": { "_ref": "image-abc123-1200x800-jpg" } }
        }))
        .unwrap();

        let post = normalizer().normalize(doc).unwrap();
        assert_eq!(post.id, "scaling-a-boutique-agency");
        assert_eq!(post.title, "Scaling a Boutique Agency");
        assert_eq!(post.excerpt, "How small teams grow.");
        assert_eq!(post.content, "<h2>Start</h2>");
        assert_eq!(post.author, "Dana Ruiz");
        assert_eq!(post.date, "March 05, 2024");
        assert_eq!(post.read_time, "4 min read");
        assert_eq!(post.category, "Growth");
        assert_eq!(
            post.image,
            "https://cdn.sanity.io/images/proj/production/abc123-1200x800.jpg"
        );
    }

    #[test]
    fn test_sparse_document_gets_defaults() {
        let doc: PostDocument = serde_json::from_value(json!({
            "_id": "doc-2",
            "title": "Interview Scorecards 101",
            "body": null,
            "author": "   "
        }))
        .unwrap();

        let post = normalizer().normalize(doc).unwrap();
        let defaults = DefaultsConfig::default();
        assert_eq!(post.id, "doc-2");
        assert_eq!(post.excerpt, "");
        assert_eq!(post.content, "");
        assert_eq!(post.author, defaults.author);
        assert_eq!(post.date, defaults.date);
        assert_eq!(post.read_time, "1 min read");
        assert_eq!(post.category, defaults.category);
        assert_eq!(post.image, defaults.image);
    }

    #[test]
    fn test_untitled_document_falls_back_to_document_id() {
        let doc: PostDocument = serde_json::from_value(json!({ "_id": "doc-3" })).unwrap();
        let post = normalizer().normalize(doc).unwrap();
        assert_eq!(post.id, "doc-3");
        assert_eq!(post.title, "Untitled");
    }

    #[test]
    fn test_excerpt_derived_from_body() {
        let long = "word ".repeat(100);
        let doc: PostDocument = serde_json::from_value(json!({
            "_id": "doc-4",
            "slug": { "current": "derived" },
            "body": [{ "_type": "block", "children": [{ "_type": "span", "text": long }] }]
        }))
        .unwrap();

        let post = normalizer().normalize(doc).unwrap();
        assert_eq!(post.id, "derived");
        assert!(post.excerpt.ends_with("..."));
        assert!(post.excerpt.chars().count() <= EXCERPT_LENGTH);
    }

    #[test]
    fn test_unroutable_ids_are_skipped() {
        for doc in [
            json!({ "_id": "drafts.doc-5", "title": "Draft" }),
            json!({ "_id": "doc-6", "slug": "../../escaped" }),
            json!({ "_id": "doc-7", "slug": "has space" }),
        ] {
            let doc: PostDocument = serde_json::from_value(doc).unwrap();
            assert!(normalizer().normalize(doc).is_none());
        }
    }

    #[test]
    fn test_parse_published_at() {
        assert!(parse_published_at("2024-01-02T03:04:05+02:00").is_some());
        assert!(parse_published_at("2024-01-02").is_some());
        assert!(parse_published_at("last tuesday").is_none());
    }
}
