//! Admin request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Module access inspection query
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAccessQuery {
    #[validate(custom(function = "validate_not_nil"))]
    pub user_id: Uuid,
    /// Evaluation instant, defaults to now
    pub at: Option<DateTime<Utc>>,
}

/// Move a module; `null` makes it top-level
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModuleParentRequest {
    #[validate(custom(function = "validate_not_nil"))]
    pub parent_id: Option<Uuid>,
}

fn validate_not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("nil_uuid"));
    }
    Ok(())
}
