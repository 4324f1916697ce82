use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::editor::avatar::AvatarOutcome;
use crate::editor::Workspace;
use crate::errors::AppError;
use crate::models::document::{FieldValue, PersonalField, RemoveOutcome, Section};
use crate::models::template::{AccentColor, TemplateId};
use crate::state::AppState;

const EDITOR_PAGE: &str = include_str!("../../assets/index.html");

#[derive(Serialize)]
pub struct WorkspaceResponse {
    #[serde(flatten)]
    pub workspace: Workspace,
    /// Accent of the selected template.
    pub accent: AccentColor,
}

impl From<&Workspace> for WorkspaceResponse {
    fn from(workspace: &Workspace) -> Self {
        Self {
            accent: workspace.accent().clone(),
            workspace: workspace.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct PersonalUpdate {
    pub field: PersonalField,
    pub value: String,
}

#[derive(Deserialize)]
pub struct ObjectiveUpdate {
    pub value: String,
}

#[derive(Deserialize)]
pub struct ItemUpdate {
    pub field: String,
    pub value: FieldValue,
}

#[derive(Serialize)]
pub struct AddedItem {
    pub index: usize,
}

#[derive(Serialize)]
pub struct RemovedItem {
    pub outcome: RemoveOutcome,
    pub len: usize,
}

#[derive(Deserialize)]
pub struct TemplateSelection {
    pub template_id: TemplateId,
}

#[derive(Deserialize)]
pub struct ColorUpdate {
    pub color: String,
    /// Swatch picks render at once; picker drags are debounced.
    #[serde(default)]
    pub immediate: bool,
}

#[derive(Serialize)]
pub struct AvatarResponse {
    pub outcome: AvatarOutcome,
}

#[derive(Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub confirm: bool,
}

/// GET /
pub async fn handle_editor_page() -> Html<&'static str> {
    Html(EDITOR_PAGE)
}

/// GET /api/v1/cv
pub async fn handle_get_cv(State(state): State<AppState>) -> Json<WorkspaceResponse> {
    let editor = state.editor.lock().await;
    Json(WorkspaceResponse::from(editor.workspace()))
}

/// PUT /api/v1/cv/personal
pub async fn handle_set_personal(
    State(state): State<AppState>,
    Json(req): Json<PersonalUpdate>,
) -> StatusCode {
    state.editor.lock().await.set_personal(req.field, req.value).await;
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/cv/objective
pub async fn handle_set_objective(
    State(state): State<AppState>,
    Json(req): Json<ObjectiveUpdate>,
) -> StatusCode {
    state.editor.lock().await.set_objective(req.value).await;
    StatusCode::NO_CONTENT
}

/// POST /api/v1/cv/sections/:section
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path(section): Path<Section>,
) -> (StatusCode, Json<AddedItem>) {
    let index = state.editor.lock().await.add_item(section).await;
    (StatusCode::CREATED, Json(AddedItem { index }))
}

/// PATCH /api/v1/cv/sections/:section/:index
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path((section, index)): Path<(Section, usize)>,
    Json(req): Json<ItemUpdate>,
) -> Result<StatusCode, AppError> {
    state
        .editor
        .lock()
        .await
        .set_item_field(section, index, &req.field, req.value)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cv/sections/:section/:index
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((section, index)): Path<(Section, usize)>,
) -> Result<Json<RemovedItem>, AppError> {
    let mut editor = state.editor.lock().await;
    let outcome = editor.remove_item(section, index).await;
    if outcome == RemoveOutcome::OutOfRange {
        return Err(AppError::NotFound(format!(
            "{} has no item at index {index}",
            section.as_str()
        )));
    }
    Ok(Json(RemovedItem {
        outcome,
        len: editor.workspace().document.len(section),
    }))
}

/// PUT /api/v1/template
pub async fn handle_select_template(
    State(state): State<AppState>,
    Json(req): Json<TemplateSelection>,
) -> Json<WorkspaceResponse> {
    let mut editor = state.editor.lock().await;
    editor.select_template(req.template_id).await;
    Json(WorkspaceResponse::from(editor.workspace()))
}

/// PUT /api/v1/color
pub async fn handle_set_color(
    State(state): State<AppState>,
    Json(req): Json<ColorUpdate>,
) -> Result<Json<WorkspaceResponse>, AppError> {
    let color = AccentColor::parse(&req.color)?;
    let mut editor = state.editor.lock().await;
    editor.set_color(color, req.immediate).await;
    Ok(Json(WorkspaceResponse::from(editor.workspace())))
}

/// POST /api/v1/color/reset
pub async fn handle_reset_color(State(state): State<AppState>) -> Json<WorkspaceResponse> {
    let mut editor = state.editor.lock().await;
    editor.reset_color().await;
    Json(WorkspaceResponse::from(editor.workspace()))
}

/// POST /api/v1/avatar
///
/// The ticket is taken before the body is read and the upload is applied afterwards, so the
/// controller is never locked while bytes are still arriving.
pub async fn handle_upload_avatar(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>, AppError> {
    let ticket = state.editor.lock().await.begin_avatar();

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
        .ok_or_else(|| AppError::Validation("Upload contains no file".to_string()))?;
    let content_type = field.content_type().map(str::to_string);
    let file_name = field.file_name().map(str::to_string);
    let bytes: Bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

    let outcome = state
        .editor
        .lock()
        .await
        .complete_avatar(ticket, content_type.as_deref(), file_name.as_deref(), &bytes)
        .await;
    Ok(Json(AvatarResponse { outcome }))
}

/// DELETE /api/v1/avatar
pub async fn handle_remove_avatar(State(state): State<AppState>) -> StatusCode {
    state.editor.lock().await.remove_avatar().await;
    StatusCode::NO_CONTENT
}

/// GET /api/v1/preview
pub async fn handle_preview(State(state): State<AppState>) -> Html<String> {
    Html(state.preview.borrow().html.clone())
}

/// POST /api/v1/clear
pub async fn handle_clear(
    State(state): State<AppState>,
    Json(req): Json<ClearRequest>,
) -> Result<Json<WorkspaceResponse>, AppError> {
    let mut editor = state.editor.lock().await;
    editor.clear(req.confirm).await?;
    Ok(Json(WorkspaceResponse::from(editor.workspace())))
}
