//! Content module - posts, bundled fallback content and rich-text rendering

mod fallback;
mod normalize;
pub mod portable_text;
mod post;

pub use fallback::StaticPosts;
pub use normalize::PostNormalizer;
pub use post::{estimate_read_time, Post};
