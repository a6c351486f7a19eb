//! Content access layer
//!
//! [`ContentStore`] answers the two questions the site asks about posts (the
//! full list and a single post by id) from the content provider when it can
//! and from the bundled static posts when it cannot. Provider failures are
//! logged and never reach the caller. An empty provider result counts as a
//! failure, so the public blog is never shown without posts.

use std::time::Instant;

use crate::cache::{QueryCache, QueryKey};
use crate::config::SiteConfig;
use crate::content::{Post, PostNormalizer, StaticPosts};
use crate::provider::{ContentProvider, ProviderError};

/// Where a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Provider,
    Fallback,
}

/// Reasons a provider result is not served
#[derive(Debug, thiserror::Error)]
enum Unusable {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("provider returned no usable posts")]
    Empty,
}

/// Read-through access to blog posts
pub struct ContentStore<P> {
    provider: Option<P>,
    fallback: StaticPosts,
    normalizer: PostNormalizer,
    lists: QueryCache<Vec<Post>>,
    posts: QueryCache<Option<Post>>,
}

impl<P: ContentProvider> ContentStore<P> {
    /// Create a store; `provider` is `None` when no provider is configured
    pub fn new(config: &SiteConfig, provider: Option<P>, fallback: StaticPosts) -> Self {
        let ttl = config.cache.ttl();
        let max_entries = config.cache.max_entries;
        Self {
            provider,
            fallback,
            normalizer: PostNormalizer::new(config),
            lists: QueryCache::new(ttl, max_entries),
            posts: QueryCache::new(ttl, max_entries),
        }
    }

    /// All posts, newest first
    pub async fn get_all_posts(&self) -> Vec<Post> {
        let key = QueryKey::AllPosts;
        if let Some(posts) = self.lists.get_fresh(&key).await {
            return posts;
        }

        let started_at = Instant::now();
        let (posts, origin) = self.load_all_posts().await;
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), origin);
        self.lists.insert(key, posts, started_at).await
    }

    /// The post with the given id, or `None` if no source has it
    pub async fn get_post_by_id(&self, id: &str) -> Option<Post> {
        let key = QueryKey::PostById(id.to_string());
        if let Some(post) = self.posts.get_fresh(&key).await {
            return post;
        }

        let started_at = Instant::now();
        let post = match self.load_post(id).await {
            Some((post, origin)) => {
                tracing::debug!("Loaded post {} from {:?}", id, origin);
                Some(post)
            }
            None => {
                tracing::debug!("Post not found: {}", id);
                None
            }
        };
        let post = self.posts.insert(key, post, started_at).await;
        tracing::debug!("{} post lookups cached", self.posts.len().await);
        post
    }

    async fn load_all_posts(&self) -> (Vec<Post>, Origin) {
        let Some(provider) = &self.provider else {
            return (self.fallback.all().to_vec(), Origin::Fallback);
        };

        provider
            .fetch_all()
            .await
            .map_err(Unusable::from)
            .map(|docs| {
                docs.into_iter()
                    .filter_map(|doc| self.normalizer.normalize(doc))
                    .collect::<Vec<_>>()
            })
            .and_then(non_empty)
            .map(|posts| (posts, Origin::Provider))
            .unwrap_or_else(|err| {
                tracing::warn!("Serving static posts: {}", err);
                (self.fallback.all().to_vec(), Origin::Fallback)
            })
    }

    async fn load_post(&self, id: &str) -> Option<(Post, Origin)> {
        if let Some(provider) = &self.provider {
            match provider.fetch_by_slug(id).await {
                Ok(Some(doc)) => match self.normalizer.normalize(doc) {
                    Some(post) => return Some((post, Origin::Provider)),
                    None => tracing::debug!("Provider post {} is not routable", id),
                },
                Ok(None) => tracing::debug!("Provider has no post {}", id),
                Err(err) => tracing::warn!("Looking up {} in static posts: {}", id, err),
            }
        }

        self.fallback
            .find(id)
            .cloned()
            .map(|post| (post, Origin::Fallback))
    }
}

fn non_empty(posts: Vec<Post>) -> Result<Vec<Post>, Unusable> {
    if posts.is_empty() {
        Err(Unusable::Empty)
    } else {
        Ok(posts)
    }
}
