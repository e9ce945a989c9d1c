//! In-memory store and fixtures for service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use coursegate_common::{CourseId, LessonId, ModuleId, UserId};
use coursegate_rules::context::LearnerProfile;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Course, Enrollment, HomeworkSubmission, Learner, Lesson, LessonProgress, Module},
    store::{CurriculumStore, LearnerStore, MoveCheck},
};

pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

#[derive(Default)]
struct Data {
    courses: Vec<Course>,
    modules: Vec<Module>,
    lessons: Vec<Lesson>,
    enrollments: Vec<Enrollment>,
    learners: Vec<Learner>,
    progress: Vec<LessonProgress>,
    submissions: Vec<HomeworkSubmission>,
}

#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Data>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_course(&self) -> Course {
        let course = Course {
            id: Uuid::new_v4(),
            title: "Course".to_string(),
            created_at: utc(2024, 1, 1, 0),
        };
        self.data.lock().unwrap().courses.push(course.clone());
        course
    }

    pub fn add_module(&self, course_id: CourseId, parent_id: Option<ModuleId>, order_index: i32) -> Module {
        let module = Module {
            id: Uuid::new_v4(),
            course_id,
            parent_id,
            title: format!("Module {order_index}"),
            order_index,
            allowed_tariffs: vec![],
            allowed_tracks: vec![],
            allowed_group_ids: vec![],
            open_at: None,
            open_after_event: None,
            open_after_amount: None,
            open_after_unit: None,
            track_settings: None,
            updated_at: utc(2024, 1, 1, 0),
        };
        self.data.lock().unwrap().modules.push(module.clone());
        module
    }

    pub fn add_lesson(&self, module_id: ModuleId, order_index: i32) -> Lesson {
        let lesson = Lesson {
            id: Uuid::new_v4(),
            module_id,
            title: format!("Lesson {order_index}"),
            order_index,
            is_stop_lesson: false,
            lesson_type: "video".to_string(),
            drip_rule: None,
            updated_at: utc(2024, 1, 1, 0),
        };
        self.data.lock().unwrap().lessons.push(lesson.clone());
        lesson
    }

    pub fn update_module(&self, id: ModuleId, f: impl FnOnce(&mut Module)) {
        let mut data = self.data.lock().unwrap();
        let module = data.modules.iter_mut().find(|m| m.id == id).unwrap();
        f(module);
    }

    pub fn update_lesson(&self, id: LessonId, f: impl FnOnce(&mut Lesson)) {
        let mut data = self.data.lock().unwrap();
        let lesson = data.lessons.iter_mut().find(|l| l.id == id).unwrap();
        f(lesson);
    }

    pub fn enroll(&self, user_id: UserId, course_id: CourseId, start_date: DateTime<Utc>) -> Enrollment {
        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            user_id,
            course_id,
            status: "active".to_string(),
            start_date,
            expires_at: None,
            restricted_module_ids: vec![],
            restricted_lesson_ids: vec![],
            forced_module_ids: vec![],
            created_at: start_date,
            updated_at: start_date,
        };
        self.data.lock().unwrap().enrollments.push(enrollment.clone());
        enrollment
    }

    pub fn update_enrollment(&self, user_id: UserId, course_id: CourseId, f: impl FnOnce(&mut Enrollment)) {
        let mut data = self.data.lock().unwrap();
        let enrollment = data
            .enrollments
            .iter_mut()
            .find(|e| e.user_id == user_id && e.course_id == course_id)
            .unwrap();
        f(enrollment);
    }

    pub fn add_learner(&self, profile: LearnerProfile) {
        self.add_learner_with_track_date(profile, None);
    }

    pub fn add_learner_with_track_date(&self, profile: LearnerProfile, track_defined_at: Option<DateTime<Utc>>) {
        self.data.lock().unwrap().learners.push(Learner {
            profile,
            track_definition_completed_at: track_defined_at,
        });
    }

    /// Enrolled learner with an empty profile
    pub fn add_student(&self, course_id: CourseId, start_date: DateTime<Utc>) -> UserId {
        let user_id = Uuid::new_v4();
        self.add_learner(LearnerProfile::new(user_id));
        self.enroll(user_id, course_id, start_date);
        user_id
    }

    pub fn complete_lesson(&self, user_id: UserId, lesson_id: LessonId, at: DateTime<Utc>) {
        self.data.lock().unwrap().progress.push(LessonProgress {
            user_id,
            lesson_id,
            status: "completed".to_string(),
            completed_at: Some(at),
        });
    }

    pub fn submit_homework(&self, user_id: UserId, lesson_id: LessonId, status: &str, at: DateTime<Utc>) {
        self.data.lock().unwrap().submissions.push(HomeworkSubmission {
            id: Uuid::new_v4(),
            user_id,
            lesson_id,
            status: status.to_string(),
            submitted_at: at,
            reviewed_at: None,
        });
    }
}

#[async_trait]
impl CurriculumStore for MemoryStore {
    async fn course(&self, id: &CourseId) -> AppResult<Option<Course>> {
        Ok(self.data.lock().unwrap().courses.iter().find(|c| &c.id == id).cloned())
    }

    async fn module(&self, id: &ModuleId) -> AppResult<Option<Module>> {
        Ok(self.data.lock().unwrap().modules.iter().find(|m| &m.id == id).cloned())
    }

    async fn course_modules(&self, course_id: &CourseId) -> AppResult<Vec<Module>> {
        let data = self.data.lock().unwrap();
        Ok(data.modules.iter().filter(|m| &m.course_id == course_id).cloned().collect())
    }

    async fn lesson(&self, id: &LessonId) -> AppResult<Option<Lesson>> {
        Ok(self.data.lock().unwrap().lessons.iter().find(|l| &l.id == id).cloned())
    }

    async fn module_lessons(&self, module_id: &ModuleId) -> AppResult<Vec<Lesson>> {
        let data = self.data.lock().unwrap();
        Ok(data.lessons.iter().filter(|l| &l.module_id == module_id).cloned().collect())
    }

    async fn course_lessons(&self, course_id: &CourseId) -> AppResult<Vec<Lesson>> {
        let data = self.data.lock().unwrap();
        let modules: Vec<ModuleId> = data
            .modules
            .iter()
            .filter(|m| &m.course_id == course_id)
            .map(|m| m.id)
            .collect();
        Ok(data
            .lessons
            .iter()
            .filter(|l| modules.contains(&l.module_id))
            .cloned()
            .collect())
    }

    async fn move_module(
        &self,
        id: &ModuleId,
        parent_id: Option<&ModuleId>,
        check: &MoveCheck<'_>,
    ) -> AppResult<Module> {
        // Let concurrent callers interleave up to the write, as a pool checkout would.
        tokio::task::yield_now().await;

        let mut data = self.data.lock().unwrap();
        let course_id = data.modules.iter().find(|m| &m.id == id).map(|m| m.course_id);
        let course_modules: Vec<Module> = data
            .modules
            .iter()
            .filter(|m| Some(m.course_id) == course_id)
            .cloned()
            .collect();
        check(&course_modules)?;

        let module = data.modules.iter_mut().find(|m| &m.id == id).unwrap();
        module.parent_id = parent_id.copied();
        Ok(module.clone())
    }
}

#[async_trait]
impl LearnerStore for MemoryStore {
    async fn enrollment(&self, user_id: &UserId, course_id: &CourseId) -> AppResult<Option<Enrollment>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .enrollments
            .iter()
            .find(|e| &e.user_id == user_id && &e.course_id == course_id)
            .cloned())
    }

    async fn learner(&self, user_id: &UserId) -> AppResult<Option<Learner>> {
        let data = self.data.lock().unwrap();
        Ok(data.learners.iter().find(|l| &l.profile.user_id == user_id).cloned())
    }

    async fn progress(&self, user_id: &UserId, lesson_id: &LessonId) -> AppResult<Option<LessonProgress>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .progress
            .iter()
            .find(|p| &p.user_id == user_id && &p.lesson_id == lesson_id)
            .cloned())
    }

    async fn latest_submission(
        &self,
        user_id: &UserId,
        lesson_id: &LessonId,
    ) -> AppResult<Option<HomeworkSubmission>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .submissions
            .iter()
            .filter(|s| &s.user_id == user_id && &s.lesson_id == lesson_id)
            .max_by_key(|s| s.submitted_at)
            .cloned())
    }
}
