//! Blog page templates
//!
//! Minimal HTML for the listing and detail routes. Every display string is
//! escaped; post `content` is already HTML and is inserted as-is.

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{
    blog_path, full_url_for, html_escape, image_tag, link_to, open_graph, post_path, strip_html,
};

/// Wrap a page body in the shared document layout
fn layout(config: &SiteConfig, title: &str, head: &str, body: &str) -> String {
    let page_title = if title.is_empty() {
        config.title.clone()
    } else {
        format!("{} | {}", title, config.title)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
{}
</head>
<body>
<main class="blog">
{}
</main>
</body>
</html>
"#,
        html_escape(&page_title),
        head,
        body
    )
}

/// Post metadata line: author, date, reading time
fn byline(post: &Post) -> String {
    format!(
        r#"<p class="post-meta"><span class="author">{}</span> · <time>{}</time> · <span class="read-time">{}</span></p>"#,
        html_escape(&post.author),
        html_escape(&post.date),
        html_escape(&post.read_time)
    )
}

/// Render the blog listing page
pub fn render_post_list(config: &SiteConfig, posts: &[Post]) -> String {
    let mut body = format!("<h1>{}</h1>\n", html_escape(&config.title));
    if !config.description.is_empty() {
        body.push_str(&format!(
            "<p class=\"description\">{}</p>\n",
            html_escape(&config.description)
        ));
    }

    body.push_str("<ul class=\"post-list\">\n");
    for post in posts {
        body.push_str(&format!(
            r#"<li class="post-card">
{}
<span class="category">{}</span>
<h2>{}</h2>
<p class="excerpt">{}</p>
{}
</li>
"#,
            image_tag(config, &post.image, &post.title),
            html_escape(&post.category),
            link_to(config, &post_path(config, &post.id), &post.title),
            html_escape(&strip_html(&post.excerpt)),
            byline(post)
        ));
    }
    body.push_str("</ul>");

    let head = format!(
        r#"<meta name="description" content="{}">"#,
        html_escape(&config.description)
    );
    layout(config, "", &head, &body)
}

/// Render a single post page
///
/// `posts` is the full listing, used for previous/next links.
pub fn render_post_detail(config: &SiteConfig, post: &Post, posts: &[Post]) -> String {
    let mut body = format!(
        r#"<article class="post">
<p>{}</p>
<span class="category">{}</span>
<h1>{}</h1>
{}
{}
<div class="post-content">
{}
</div>
</article>
"#,
        link_to(config, &blog_path(config), "Back to blog"),
        html_escape(&post.category),
        html_escape(&post.title),
        byline(post),
        image_tag(config, &post.image, &post.title),
        post.content
    );

    let prev = post.prev(posts);
    let next = post.next(posts);
    if prev.is_some() || next.is_some() {
        body.push_str("<nav class=\"pager\">\n");
        if let Some(newer) = prev {
            body.push_str(&format!(
                "<span class=\"newer\">{}</span>\n",
                link_to(config, &post_path(config, &newer.id), &newer.title)
            ));
        }
        if let Some(older) = next {
            body.push_str(&format!(
                "<span class=\"older\">{}</span>\n",
                link_to(config, &post_path(config, &older.id), &older.title)
            ));
        }
        body.push_str("</nav>");
    }

    let image = if post.image.starts_with("http://") || post.image.starts_with("https://") {
        post.image.clone()
    } else {
        full_url_for(config, &post.image)
    };
    let head = open_graph(
        &post.title,
        &strip_html(&post.excerpt),
        &full_url_for(config, &post_path(config, &post.id)),
        Some(&image),
        &config.title,
    );

    layout(config, &post.title, &head, &body)
}

/// Render the page shown for an unknown post id
pub fn render_not_found(config: &SiteConfig) -> String {
    let body = format!(
        "<h1>Post not found</h1>\n<p>{}</p>",
        link_to(config, &blog_path(config), "Back to blog")
    );
    layout(config, "Not found", "", &body)
}
