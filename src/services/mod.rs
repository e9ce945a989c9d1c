//! Business logic services

pub mod availability_service;
pub mod curriculum_service;
pub mod homework_service;
pub mod module_access_service;
pub mod prerequisite_service;

pub use availability_service::AvailabilityService;
pub use curriculum_service::CurriculumService;
pub use homework_service::HomeworkService;
pub use module_access_service::ModuleAccessService;
pub use prerequisite_service::PrerequisiteService;
