//! List blog posts

use anyhow::Result;

use crate::Blog;

/// Print every post, newest first
pub async fn run(blog: &Blog) -> Result<()> {
    let posts = blog.store.get_all_posts().await;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!("  {} - {} [{}]", post.date, post.title, post.id);
    }

    Ok(())
}
