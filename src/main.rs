use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Json, Redirect},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hengste_core::config::SiteConfig;
use hengste_core::{CdnStorySource, ResolveError, resolve_story};
use hengste_types::{Locale, SlugPath};

mod render;

/// Application state shared across page handlers.
///
/// Holds the story source every page render resolves through.
#[derive(Clone)]
struct AppState {
    source: CdnStorySource,
}

/// Main entry point for the site server.
///
/// Serves the CMS-backed marketing pages under `/{locale}/{slug}`.
///
/// # Environment Variables
/// - `HENGSTE_ADDR`: HTTP bind address (default: "0.0.0.0:3000")
/// - `HENGSTE_CDN_BASE_URL`: content-delivery endpoint override
/// - `HENGSTE_CDN_TOKEN`: content-delivery access token (missing token is
///   a startup warning; requests fail until it is set)
/// - `HENGSTE_CONTENT_VERSION`: `draft` (default) or `published`
/// - `HENGSTE_HTTP_TIMEOUT_SECS`: per-request timeout for CMS calls
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hengste=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("HENGSTE_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let config = SiteConfig::from_env()?;
    let client = config.cdn_client()?;
    let source = CdnStorySource::new(client, config.version());

    tracing::info!("++ Starting hengste-web on {}", addr);

    let app = Router::new()
        .route("/health", get(health))
        .route("/", get(index))
        .route("/:locale", get(locale_home))
        .route("/:locale/*slug", get(page))
        .layer(CorsLayer::permissive())
        .with_state(AppState { source });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index() -> Redirect {
    Redirect::temporary("/en/home")
}

async fn locale_home(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> (StatusCode, Html<String>) {
    render_page(&state, &locale, "home").await
}

async fn page(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
) -> (StatusCode, Html<String>) {
    render_page(&state, &locale, &slug).await
}

/// Resolve and render one page.
///
/// An unknown locale segment falls back to English rather than failing:
/// resolution would end up serving baseline content for it anyway, so the
/// fallback just makes that explicit.
async fn render_page(state: &AppState, locale: &str, slug: &str) -> (StatusCode, Html<String>) {
    let locale = locale.parse::<Locale>().unwrap_or(Locale::FALLBACK);

    let slug = match SlugPath::new(slug) {
        Ok(slug) => slug,
        Err(_) => {
            return (
                StatusCode::NOT_FOUND,
                Html(render::missing_page(locale, slug)),
            );
        }
    };

    match resolve_story(&state.source, &slug, locale).await {
        Ok(resolved) => (
            StatusCode::OK,
            Html(render::story_page(&resolved.story, locale)),
        ),
        Err(error @ ResolveError::NotFound { .. }) => {
            tracing::warn!(%error, "page resolution failed");
            (
                StatusCode::NOT_FOUND,
                Html(render::missing_page(locale, slug.as_str())),
            )
        }
    }
}
