//! Admin response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Module;

pub use coursegate_rules::module_access::ModuleAccess as ModuleAccessResponse;

/// Module placement after a move
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePlacementResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub order_index: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<Module> for ModulePlacementResponse {
    fn from(module: Module) -> Self {
        Self {
            id: module.id,
            course_id: module.course_id,
            parent_id: module.parent_id,
            order_index: module.order_index,
            updated_at: module.updated_at,
        }
    }
}
