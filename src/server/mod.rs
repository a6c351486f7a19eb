//! HTTP server for the blog routes
//!
//! Serves the listing and detail pages, a JSON view of the same data, and
//! falls back to static files in the public directory for everything else.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::helpers::{blog_path, is_valid_post_id, url_for};
use crate::provider::ContentProvider;
use crate::store::ContentStore;
use crate::templates;
use crate::Blog;

/// Server state
struct ServerState<P> {
    config: SiteConfig,
    store: Arc<ContentStore<P>>,
}

/// Route paths for the listing and a single post
fn route_paths(config: &SiteConfig) -> (String, String) {
    let list = format!("/{}", blog_path(config));
    let detail = format!("{}:id", list);
    (list, detail)
}

/// Build the application router
pub fn router<P>(config: SiteConfig, store: Arc<ContentStore<P>>, public_dir: PathBuf) -> Router
where
    P: ContentProvider + 'static,
{
    let (list_path, detail_path) = route_paths(&config);
    let list_path_bare = list_path.trim_end_matches('/').to_string();
    let state = Arc::new(ServerState { config, store });

    Router::new()
        .route("/", get(index_redirect::<P>))
        .route(&list_path, get(list_page::<P>))
        .route(&list_path_bare, get(list_page::<P>))
        .route(&detail_path, get(post_page::<P>))
        .route(&format!("{}/", detail_path), get(post_page::<P>))
        .route("/api/posts", get(list_json::<P>))
        .route("/api/posts/:id", get(post_json::<P>))
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let app = router(
        blog.config.clone(),
        blog.store.clone(),
        blog.public_dir.clone(),
    );

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!(
        "Server running at http://{}:{}{}",
        ip,
        port,
        url_for(&blog.config, &blog_path(&blog.config))
    );
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn index_redirect<P>(State(state): State<Arc<ServerState<P>>>) -> Redirect
where
    P: ContentProvider + 'static,
{
    Redirect::temporary(&url_for(&state.config, &blog_path(&state.config)))
}

async fn list_page<P>(State(state): State<Arc<ServerState<P>>>) -> Html<String>
where
    P: ContentProvider + 'static,
{
    let posts = state.store.get_all_posts().await;
    Html(templates::render_post_list(&state.config, &posts))
}

async fn post_page<P>(
    State(state): State<Arc<ServerState<P>>>,
    Path(id): Path<String>,
) -> Response
where
    P: ContentProvider + 'static,
{
    let post = if is_valid_post_id(&id) {
        state.store.get_post_by_id(&id).await
    } else {
        None
    };

    match post {
        Some(post) => {
            let posts = state.store.get_all_posts().await;
            Html(templates::render_post_detail(&state.config, &post, &posts)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Html(templates::render_not_found(&state.config)),
        )
            .into_response(),
    }
}

async fn list_json<P>(State(state): State<Arc<ServerState<P>>>) -> Response
where
    P: ContentProvider + 'static,
{
    Json(state.store.get_all_posts().await).into_response()
}

async fn post_json<P>(
    State(state): State<Arc<ServerState<P>>>,
    Path(id): Path<String>,
) -> Response
where
    P: ContentProvider + 'static,
{
    let post = if is_valid_post_id(&id) {
        state.store.get_post_by_id(&id).await
    } else {
        None
    };

    match post {
        Some(post) => Json(post).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not found", "id": id })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        let mut config = SiteConfig::default();
        assert_eq!(
            route_paths(&config),
            ("/blog/".to_string(), "/blog/:id".to_string())
        );

        config.blog_dir = "insights".to_string();
        assert_eq!(
            route_paths(&config),
            ("/insights/".to_string(), "/insights/:id".to_string())
        );
    }

    #[test]
    fn test_router_builds() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let _app = router(blog.config.clone(), blog.store.clone(), blog.public_dir.clone());
    }
}
