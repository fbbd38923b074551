use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entries", post(handlers::form_append))
        .route("/reset", post(handlers::form_reset))
        .route(
            "/api/entries",
            get(handlers::list_entries)
                .post(handlers::append_entry)
                .delete(handlers::reset_entries),
        )
        .route("/api/summary", get(handlers::get_summary))
        .route("/export/chart.svg", get(handlers::export_chart))
        .route("/export/chart.pdf", get(handlers::export_pdf))
        .route("/manifest.json", get(handlers::manifest))
        .route("/service-worker.js", get(handlers::service_worker))
        .with_state(state)
}
