//! Course handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::lessons::LearnerQuery,
    middleware::auth::AuthenticatedUser,
    services::CurriculumService,
    state::AppState,
};

use super::response::OutlineResponse;

/// Course outline with per-lesson availability
pub async fn get_outline(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<LearnerQuery>,
) -> AppResult<Json<OutlineResponse>> {
    let (user_id, now) = query.resolve(&auth_user)?;

    let outline =
        CurriculumService::course_outline(state.store(), state.evaluator(), &user_id, &id, now).await?;

    Ok(Json(outline))
}
