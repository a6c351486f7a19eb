//! Show a single post

use anyhow::Result;

use crate::content::Post;
use crate::Blog;

/// Output format for `show`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Print the post with `id`, failing when no source has it
pub async fn run(blog: &Blog, id: &str, format: Format) -> Result<()> {
    let Some(post) = blog.store.get_post_by_id(id).await else {
        anyhow::bail!("Post not found: {}", id);
    };

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&post)?),
        Format::Text => println!("{}", describe(&post)),
    }

    Ok(())
}

/// Human-readable summary of a post
fn describe(post: &Post) -> String {
    format!(
        "{}\n{} · {} · {} · {}\n\n{}\n\n{}",
        post.title, post.author, post.date, post.read_time, post.category, post.excerpt, post.content
    )
}
