use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, IntoApiResponse};
use crate::project::{Project, ProjectAttributes, ProjectError, ProjectStore};

use super::AppState;

/// Run a store operation off the async executor
async fn blocking<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ProjectStore) -> Result<T, ProjectError> + Send + 'static,
{
    let store = state.store.clone();
    let result = tokio::task::spawn_blocking(move || op(store.as_ref())).await?;
    Ok(result?)
}

/// GET /api/projects - List all live projects
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    let projects = blocking(&state, |store| store.all()).await?;
    Ok(projects.into_api_response())
}

/// POST /api/projects - Create a project
pub async fn create(
    State(state): State<AppState>,
    Json(attrs): Json<ProjectAttributes>,
) -> ApiResult<Project> {
    let project = blocking(&state, move |store| store.create(attrs)).await?;
    Ok(ApiResponse::created(project))
}

/// GET /api/projects/:id - Show a single project
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Project> {
    let project = blocking(&state, move |store| store.find(&id)).await?;
    Ok(project.into_api_response())
}

/// PUT/PATCH /api/projects/:id - Update name, icon and description
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(attrs): Json<ProjectAttributes>,
) -> ApiResult<Project> {
    let project = blocking(&state, move |store| {
        let mut project = store.find(&id)?;
        store.update(&mut project, attrs)?;
        Ok(project)
    })
    .await?;
    Ok(project.into_api_response())
}

/// DELETE /api/projects/:id - Destroy a project's identity, keeping its files
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    blocking(&state, move |store| {
        let project = store.find(&id)?;
        store.destroy(&project)
    })
    .await?;
    Ok(ApiResponse::no_content())
}
