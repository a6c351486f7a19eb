//! HTML helper functions

use super::url::url_for;
use crate::config::SiteConfig;

/// Generate an anchor tag
///
/// # Examples
/// ```ignore
/// link_to(&config, "/blog/", "Blog") // -> <a href="/blog/">Blog</a>
/// ```
pub fn link_to(config: &SiteConfig, path: &str, text: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            html_escape(path),
            html_escape(text)
        )
    } else {
        format!(
            r#"<a href="{}">{}</a>"#,
            html_escape(&url_for(config, path)),
            html_escape(text)
        )
    }
}

/// Generate an image tag
///
/// # Examples
/// ```ignore
/// image_tag(&config, "/images/photo.jpg", "My Photo")
/// ```
pub fn image_tag(config: &SiteConfig, path: &str, alt: &str) -> String {
    let src = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        url_for(config, path)
    };

    format!(
        r#"<img src="{}" alt="{}" loading="lazy">"#,
        html_escape(&src),
        html_escape(alt)
    )
}

/// Generate Open Graph meta tags
pub fn open_graph(
    title: &str,
    description: &str,
    url: &str,
    image: Option<&str>,
    site_name: &str,
) -> String {
    let mut tags = vec![
        r#"<meta property="og:type" content="article">"#.to_string(),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, html_escape(url)),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(site_name)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ));
    }

    if let Some(img) = image {
        tags.push(format!(
            r#"<meta property="og:image" content="{}">"#,
            html_escape(img)
        ));
    }

    tags.join("\n")
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}
