//! Bundled static posts
//!
//! Served whenever the content provider is unavailable or has nothing to
//! offer. The collection is compiled into the binary and already in
//! normalized form.

use anyhow::{Context, Result};

use super::Post;

const BUNDLED_POSTS: &str = include_str!("static_posts.yml");

/// Fixed, ordered collection of posts
#[derive(Debug, Clone)]
pub struct StaticPosts {
    posts: Vec<Post>,
}

impl StaticPosts {
    /// Parse the posts bundled with the binary
    pub fn bundled() -> Result<Self> {
        Self::from_yaml(BUNDLED_POSTS).context("Failed to parse bundled posts")
    }

    /// Parse posts from a YAML sequence
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let posts: Vec<Post> = serde_yaml::from_str(yaml)?;
        Ok(Self { posts })
    }

    /// All posts in their original order
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    /// Look up a post by id
    pub fn find(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }
}
