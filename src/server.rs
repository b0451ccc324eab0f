use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::kv::KeyValueStore;
use crate::model::{AppSettings, LandingPage};
use crate::render::{PageView, render_not_available, render_public_page};
use crate::storage::StorageAccessor;

pub struct AppState<S> {
    storage: Arc<StorageAccessor<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub slug: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

pub fn router<S: KeyValueStore + 'static>(storage: Arc<StorageAccessor<S>>) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/p/:slug", get(public_page::<S>))
        .route("/api/pages", get(list_pages::<S>))
        .route("/api/pages/:slug", get(page_json::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { storage })
}

async fn public_page<S: KeyValueStore + 'static>(
    State(state): State<AppState<S>>,
    Path(slug): Path<String>,
) -> Response {
    let (pages, settings) = match load(&state).await {
        Ok(loaded) => loaded,
        Err(status) => return status.into_response(),
    };

    let view = pages
        .iter()
        .find(|p| p.slug == slug)
        .map(|page| render_public_page(page, &settings))
        .unwrap_or(PageView::NotAvailable);

    match view {
        PageView::Rendered(html) => Html(html).into_response(),
        PageView::NotAvailable => {
            (StatusCode::NOT_FOUND, Html(render_not_available())).into_response()
        }
    }
}

async fn list_pages<S: KeyValueStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<PageSummary>>, StatusCode> {
    let (pages, _) = load(&state).await?;
    let summaries = pages
        .into_iter()
        .filter(|p| p.published)
        .map(|p| PageSummary {
            slug: p.slug,
            title: p.title,
            updated_at: p.updated_at,
        })
        .collect();
    Ok(Json(summaries))
}

async fn page_json<S: KeyValueStore + 'static>(
    State(state): State<AppState<S>>,
    Path(slug): Path<String>,
) -> Result<Json<LandingPage>, StatusCode> {
    let (pages, _) = load(&state).await?;
    pages
        .into_iter()
        .find(|p| p.published && p.slug == slug)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn load<S: KeyValueStore + 'static>(
    state: &AppState<S>,
) -> Result<(Vec<LandingPage>, AppSettings), StatusCode> {
    let storage = Arc::clone(&state.storage);
    let loaded = tokio::task::spawn_blocking(move || {
        let pages = storage.get_pages()?;
        let settings = storage.get_settings()?;
        anyhow::Ok((pages, settings))
    })
    .await
    .map_err(|err| {
        tracing::error!(error = %err, "storage task failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    loaded.map_err(|err| {
        tracing::error!("read storage: {err:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
