//! URL helper functions

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::SiteConfig;

lazy_static! {
    /// Shape of a routable post id
    static ref POST_ID: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,199}$").unwrap();
}

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/site/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/") // -> "https://example.com/blog/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Path of the blog listing
pub fn blog_path(config: &SiteConfig) -> String {
    format!("{}/", config.blog_dir.trim_matches('/'))
}

/// Path of a single post
pub fn post_path(config: &SiteConfig, id: &str) -> String {
    format!("{}{}/", blog_path(config), id)
}

/// Whether `id` can name a post
///
/// Anything else is rejected before reaching the content provider.
pub fn is_valid_post_id(id: &str) -> bool {
    POST_ID.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for() {
        let mut config = SiteConfig::default();
        assert_eq!(url_for(&config, "/blog/"), "/blog/");
        config.root = "/site/".to_string();
        assert_eq!(url_for(&config, "blog/a/"), "/site/blog/a/");
        assert_eq!(url_for(&config, ""), "/site/");
    }

    #[test]
    fn test_full_url_for() {
        let mut config = SiteConfig::default();
        config.url = "https://example.com/".to_string();
        assert_eq!(
            full_url_for(&config, "/blog/"),
            "https://example.com/blog/"
        );
    }

    #[test]
    fn test_post_path() {
        let mut config = SiteConfig::default();
        config.blog_dir = "/news/".to_string();
        assert_eq!(blog_path(&config), "news/");
        assert_eq!(post_path(&config, "hello"), "news/hello/");
    }

    #[test]
    fn test_is_valid_post_id() {
        assert!(is_valid_post_id("future-of-recruitment-ai"));
        assert!(is_valid_post_id("Post_2"));
        assert!(!is_valid_post_id(""));
        assert!(!is_valid_post_id("-leading"));
        assert!(!is_valid_post_id("../etc/passwd"));
        assert!(!is_valid_post_id("a b"));
    }
}
