use axum::extract::{Path, State};
use std::io;
use std::path::PathBuf;

use crate::error::ApiError;
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::permissions::{self, Permissions};

use super::AppState;

/// GET /api/permissions/*filepath - Mode and ACLs of an absolute path
pub async fn show(State(state): State<AppState>, Path(filepath): Path<String>) -> ApiResult<Permissions> {
    let path = PathBuf::from(format!("/{}", filepath.trim_start_matches('/')));
    let acl = state.acl.clone();

    let result = tokio::task::spawn_blocking(move || match permissions::describe(&path, acl.as_ref()) {
        Ok(permissions) => Ok(permissions),
        Err(e) => Err((path, e)),
    })
    .await?;
    match result {
        Ok(permissions) => Ok(permissions.into_api_response()),
        Err((path, e)) if e.kind() == io::ErrorKind::NotFound => {
            Err(ApiError::not_found(format!("{} not found", path.display())))
        }
        Err((path, e)) => {
            tracing::error!("Failed to describe permissions of {}: {}", path.display(), e);
            Err(ApiError::internal_server_error("Failed to read permissions"))
        }
    }
}
