//! Lesson handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::{AvailabilityService, HomeworkService, PrerequisiteService},
    state::AppState,
};

use super::{
    request::LearnerQuery,
    response::{AvailabilityResponse, HomeworkEligibilityResponse, PrerequisitesResponse},
};

/// Whether the lesson is open, and why not
pub async fn get_availability(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<LearnerQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let (user_id, now) = query.resolve(&auth_user)?;

    let availability = AvailabilityService::check_lesson_availability_at(
        state.store(),
        state.evaluator(),
        &user_id,
        &id,
        now,
    )
    .await?;

    Ok(Json(availability))
}

/// Stop-lesson gate in front of the lesson
pub async fn get_prerequisites(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<LearnerQuery>,
) -> AppResult<Json<PrerequisitesResponse>> {
    let (user_id, _) = query.resolve(&auth_user)?;

    let check = PrerequisiteService::check_prerequisites(state.store(), &user_id, &id).await?;

    Ok(Json(check))
}

/// Whether homework can be submitted for the lesson
pub async fn get_homework_eligibility(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<LearnerQuery>,
) -> AppResult<Json<HomeworkEligibilityResponse>> {
    let (user_id, now) = query.resolve(&auth_user)?;

    let eligibility =
        HomeworkService::can_submit_homework_at(state.store(), state.evaluator(), &user_id, &id, now).await?;

    Ok(Json(eligibility))
}
