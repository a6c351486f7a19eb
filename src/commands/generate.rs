//! Export the blog as static HTML

use anyhow::{bail, Result};
use std::fs;
use std::path::{Component, Path};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{blog_path, is_valid_post_id, post_path};
use crate::templates;
use crate::Blog;

/// Write the listing and every post page under the public directory
///
/// Returns the number of post pages written.
pub async fn run(blog: &Blog) -> Result<usize> {
    let start = std::time::Instant::now();

    let posts = blog.store.get_all_posts().await;
    tracing::info!("Loaded {} posts", posts.len());

    let written = write_site(&blog.public_dir, &blog.config, &posts)?;

    tracing::info!(
        "Generated {} post pages in {:.2?}",
        written,
        start.elapsed()
    );
    Ok(written)
}

/// Render `posts` into `public_dir`, skipping posts whose id is not a
/// single path segment
fn write_site(public_dir: &Path, config: &SiteConfig, posts: &[Post]) -> Result<usize> {
    write_page(
        public_dir,
        &blog_path(config),
        &templates::render_post_list(config, posts),
    )?;

    let mut written = 0;
    for post in posts {
        if !is_valid_post_id(&post.id) {
            tracing::warn!("Skipping post with unroutable id {:?}", post.id);
            continue;
        }
        write_page(
            public_dir,
            &post_path(config, &post.id),
            &templates::render_post_detail(config, post, posts),
        )?;
        written += 1;
    }
    Ok(written)
}

/// Write `html` to `<public_dir>/<path>/index.html`
fn write_page(public_dir: &Path, path: &str, html: &str) -> Result<()> {
    let relative = Path::new(path.trim_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        bail!("Refusing to write outside {:?}: {}", public_dir, path);
    }

    let dir = public_dir.join(relative);
    fs::create_dir_all(&dir)?;
    let file = dir.join("index.html");
    fs::write(&file, html)?;
    tracing::debug!("Wrote {:?}", file);
    Ok(())
}
