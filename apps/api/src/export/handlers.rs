use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{ExportControl, ExportReceipt};
use crate::state::AppState;

/// POST /api/v1/export
pub async fn handle_export(State(state): State<AppState>) -> Result<Json<ExportReceipt>, AppError> {
    // Render under the lock, print outside it so edits are not blocked by the host.
    let (surface, filename) = {
        let editor = state.editor.lock().await;
        (editor.render_surface(), editor.export_filename())
    };
    let receipt = state
        .exporter
        .export_to_printable(&surface, &filename)
        .await?;
    Ok(Json(receipt))
}

/// GET /api/v1/export/:job_id
///
/// The printable page of a recent export. The editor opens it in a new window, where it
/// raises the print dialog on load.
pub async fn handle_export_artifact(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    state
        .exporter
        .artifact(job_id)
        .map(Html)
        .ok_or_else(|| AppError::NotFound(format!("No export with id {job_id}")))
}

#[derive(Serialize)]
pub struct ExportStatus {
    #[serde(flatten)]
    pub control: ExportControl,
    /// Document title offered to the print dialog.
    pub title: String,
}

/// GET /api/v1/export/status
pub async fn handle_export_status(State(state): State<AppState>) -> Json<ExportStatus> {
    Json(ExportStatus {
        control: state.exporter.control(),
        title: state.exporter.title(),
    })
}
