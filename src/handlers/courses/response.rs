//! Course response DTOs

pub use crate::services::curriculum_service::{
    CourseOutline as OutlineResponse, OutlineLesson, OutlineModule,
};
