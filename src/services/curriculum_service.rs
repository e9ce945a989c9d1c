//! Curriculum structure: outline rendering and the re-parenting guard

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use coursegate_common::{CourseId, LessonId, ModuleId, UserId};
use coursegate_rules::availability::LessonAvailability;
use coursegate_rules::curriculum::CurriculumTree;
use coursegate_rules::drip::RuleEvaluator;
use futures::future::try_join_all;
use serde::Serialize;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::{Lesson, Module},
    services::AvailabilityService,
    store::Store,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineLesson {
    pub id: LessonId,
    pub title: String,
    pub lesson_type: String,
    pub is_stop_lesson: bool,
    pub availability: LessonAvailability,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineModule {
    pub id: ModuleId,
    pub parent_id: Option<ModuleId>,
    pub title: String,
    pub depth: usize,
    pub lessons: Vec<OutlineLesson>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOutline {
    pub course_id: CourseId,
    pub title: String,
    pub modules: Vec<OutlineModule>,
}

/// Curriculum service
pub struct CurriculumService;

impl CurriculumService {
    /// Modules depth-first with each lesson's availability for the learner
    pub async fn course_outline(
        store: &dyn Store,
        evaluator: &RuleEvaluator,
        user_id: &UserId,
        course_id: &CourseId,
        now: DateTime<Utc>,
    ) -> AppResult<CourseOutline> {
        let course = store
            .course(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course {course_id}")))?;

        let modules = store.course_modules(course_id).await?;
        let tree = CurriculumTree::build(modules.iter().map(Module::node))?;

        let mut lessons_by_module: HashMap<ModuleId, Vec<Lesson>> = HashMap::new();
        for lesson in store.course_lessons(course_id).await? {
            lessons_by_module.entry(lesson.module_id).or_default().push(lesson);
        }
        for lessons in lessons_by_module.values_mut() {
            lessons.sort_by_key(|l| (l.order_index, l.id));
        }

        let by_id: HashMap<ModuleId, &Module> = modules.iter().map(|m| (m.id, m)).collect();
        let mut outline = Vec::with_capacity(modules.len());

        for module_id in tree.display_order() {
            let Some(module) = by_id.get(&module_id) else {
                continue;
            };
            let lessons = lessons_by_module.remove(&module_id).unwrap_or_default();

            let verdicts = try_join_all(lessons.iter().map(|lesson| {
                AvailabilityService::check_lesson_availability_at(store, evaluator, user_id, &lesson.id, now)
            }))
            .await?;

            outline.push(OutlineModule {
                id: module.id,
                parent_id: module.parent_id,
                title: module.title.clone(),
                depth: tree.ancestors(&module.id).len(),
                lessons: lessons
                    .into_iter()
                    .zip(verdicts)
                    .map(|(lesson, availability)| OutlineLesson {
                        id: lesson.id,
                        title: lesson.title,
                        lesson_type: lesson.lesson_type,
                        is_stop_lesson: lesson.is_stop_lesson,
                        availability,
                    })
                    .collect(),
            });
        }

        Ok(CourseOutline {
            course_id: course.id,
            title: course.title,
            modules: outline,
        })
    }

    /// Move a module, rejecting moves that would create a parent cycle
    pub async fn reparent_module(
        store: &dyn Store,
        module_id: &ModuleId,
        new_parent: Option<&ModuleId>,
    ) -> AppResult<Module> {
        let updated = store
            .move_module(module_id, new_parent, &|modules: &[Module]| {
                validate_move(modules, module_id, new_parent)
            })
            .await?;
        info!(
            module_id = %module_id,
            parent_id = ?new_parent,
            "Module re-parented"
        );

        Ok(updated)
    }
}

fn validate_move(modules: &[Module], module_id: &ModuleId, new_parent: Option<&ModuleId>) -> AppResult<()> {
    let module = modules
        .iter()
        .find(|m| &m.id == module_id)
        .ok_or_else(|| AppError::NotFound(format!("Module {module_id}")))?;

    if let Some(parent) = new_parent {
        if !modules.iter().any(|m| &m.id == parent) {
            return Err(AppError::InvalidInput(format!(
                "Parent module {parent} does not belong to course {}",
                module.course_id
            )));
        }
    }

    let tree = CurriculumTree::build(modules.iter().map(Module::node))?;
    tree.check_reparent(module_id, new_parent)?;
    Ok(())
}
