//! Admin handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    services::{CurriculumService, ModuleAccessService},
    state::AppState,
};

use super::{
    request::{ModuleAccessQuery, UpdateModuleParentRequest},
    response::{ModuleAccessResponse, ModulePlacementResponse},
};

/// Inspect one learner's access to a module
pub async fn get_module_access(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ModuleAccessQuery>,
) -> AppResult<Json<ModuleAccessResponse>> {
    query.validate()?;

    let now = query.at.unwrap_or_else(Utc::now);
    let access = ModuleAccessService::check_module_access_at(state.store(), &query.user_id, &id, now).await?;

    Ok(Json(access))
}

/// Move a module under another parent
pub async fn update_module_parent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateModuleParentRequest>,
) -> AppResult<Json<ModulePlacementResponse>> {
    payload.validate()?;

    let module = CurriculumService::reparent_module(state.store(), &id, payload.parent_id.as_ref()).await?;

    Ok(Json(module.into()))
}
