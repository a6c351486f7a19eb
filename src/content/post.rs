//! Post data structures

use serde::{Deserialize, Serialize};

/// A blog post in the shape every view consumes, whatever its origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Slug-like identifier used for routing and lookup
    pub id: String,

    /// Post title
    pub title: String,

    /// Short summary shown in listings
    pub excerpt: String,

    /// Rendered HTML body
    pub content: String,

    /// Author display name
    pub author: String,

    /// Display date
    pub date: String,

    /// Reading time label, e.g. "5 min read"
    pub read_time: String,

    /// Category label
    pub category: String,

    /// Absolute or site-relative image URL
    pub image: String,
}

impl Post {
    /// Get the previous (newer) post in a list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.id == self.id)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// Get the next (older) post in a list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.id == self.id)?;
        posts.get(pos + 1)
    }
}

/// Estimate a reading time label from plain text at 200 words per minute
pub fn estimate_read_time(text: &str) -> String {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(200).max(1);
    format!("{} min read", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: id.to_uppercase(),
            excerpt: String::new(),
            content: String::new(),
            author: String::new(),
            date: String::new(),
            read_time: String::new(),
            category: String::new(),
            image: String::new(),
        }
    }

    #[test]
    fn test_serializes_read_time_in_camel_case() {
        let json = serde_json::to_value(post("a")).unwrap();
        assert!(json.get("readTime").is_some());
        assert!(json.get("read_time").is_none());
    }

    #[test]
    fn test_prev_next() {
        let posts = vec![post("a"), post("b"), post("c")];
        assert_eq!(posts[1].prev(&posts).map(|p| p.id.as_str()), Some("a"));
        assert_eq!(posts[1].next(&posts).map(|p| p.id.as_str()), Some("c"));
        assert!(posts[0].prev(&posts).is_none());
        assert!(posts[2].next(&posts).is_none());
    }

    #[test]
    fn test_estimate_read_time() {
        assert_eq!(estimate_read_time(""), "1 min read");
        assert_eq!(estimate_read_time(&"word ".repeat(200)), "1 min read");
        assert_eq!(estimate_read_time(&"word ".repeat(201)), "2 min read");
    }
}
