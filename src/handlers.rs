use crate::chart::render_chart_document;
use crate::clock::Clock;
use crate::errors::AppError;
use crate::export::render_chart_pdf;
use crate::models::{Entry, EntryDraft, SummaryResponse};
use crate::offline::{service_worker_js, MANIFEST_JSON};
use crate::state::{AppState, CalorieStore};
use crate::summary::build_summary;
use crate::ui::render_index;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use std::sync::Arc;
use tokio::task;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    let summary = build_summary(store.entries());
    Html(render_index(&store.clock().today(), &summary))
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<Entry>> {
    let store = state.store.lock().await;
    Json(store.entries().to_vec())
}

pub async fn append_entry(
    State(state): State<AppState>,
    Json(draft): Json<EntryDraft>,
) -> Result<Json<Vec<Entry>>, AppError> {
    let entries = mutate(&state, move |store| Ok(store.append(draft)?.to_vec())).await?;
    Ok(Json(entries))
}

pub async fn reset_entries(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, AppError> {
    let entries = mutate(&state, |store| Ok(store.reset()?.to_vec())).await?;
    info!("entries reset");
    Ok(Json(entries))
}

pub async fn form_append(
    State(state): State<AppState>,
    Form(draft): Form<EntryDraft>,
) -> Result<Redirect, AppError> {
    mutate(&state, move |store| {
        store.append(draft)?;
        Ok(())
    })
    .await?;
    Ok(Redirect::to("/"))
}

pub async fn form_reset(State(state): State<AppState>) -> Result<Redirect, AppError> {
    mutate(&state, |store| {
        store.reset()?;
        Ok(())
    })
    .await?;
    info!("entries reset");
    Ok(Redirect::to("/"))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let store = state.store.lock().await;
    Json(build_summary(store.entries()))
}

pub async fn export_chart(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().await;
    let document = render_chart_document(&build_summary(store.entries()).by_category);
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"calories-by-category.svg\"",
            ),
        ],
        document,
    )
}

pub async fn export_pdf(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let totals = build_summary(state.store.lock().await.entries()).by_category;
    let document = task::spawn_blocking(move || render_chart_pdf(&totals)).await??;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"calorie-overview.pdf\"",
            ),
        ],
        document,
    ))
}

pub async fn manifest() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/manifest+json")], MANIFEST_JSON)
}

pub async fn service_worker() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        service_worker_js(),
    )
}

/// Runs a store mutation on the blocking pool; persisting touches the filesystem.
async fn mutate<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    F: FnOnce(&mut CalorieStore) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let mut store = Arc::clone(&state.store).lock_owned().await;
    task::spawn_blocking(move || op(&mut *store)).await?
}
