//! Curator view of a learner's access to one module

use chrono::{DateTime, Utc};
use coursegate_common::{ModuleId, UserId};
use coursegate_rules::module_access::{check_module_access, ModuleAccess, ModuleAccessContext};

use crate::{
    error::{AppError, AppResult},
    services::AvailabilityService,
    store::Store,
};

/// Module access service
pub struct ModuleAccessService;

impl ModuleAccessService {
    pub async fn check_module_access(
        store: &dyn Store,
        user_id: &UserId,
        module_id: &ModuleId,
    ) -> AppResult<ModuleAccess> {
        Self::check_module_access_at(store, user_id, module_id, Utc::now()).await
    }

    /// Learners without an enrollment are checked with no manual overrides
    pub async fn check_module_access_at(
        store: &dyn Store,
        user_id: &UserId,
        module_id: &ModuleId,
        now: DateTime<Utc>,
    ) -> AppResult<ModuleAccess> {
        let module = store
            .module(module_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Module {module_id}")))?;
        let learner = store
            .learner(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Learner {user_id}")))?;
        let overrides = store
            .enrollment(user_id, &module.course_id)
            .await?
            .map(|e| e.overrides())
            .unwrap_or_default();

        let audience = module.audience();
        let schedule = module.schedule();
        let track_settings = AvailabilityService::track_settings(&module);

        Ok(check_module_access(&ModuleAccessContext {
            module_id: module.id,
            audience: &audience,
            schedule: &schedule,
            track_settings: &track_settings,
            learner: &learner.profile,
            overrides: &overrides,
            track_definition_completed_at: learner.track_definition_completed_at,
            now,
        }))
    }
}
