//! Curriculum repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Course, Lesson, Module},
};

/// Repository for courses, modules and lessons
pub struct CurriculumRepository;

impl CurriculumRepository {
    /// Find course by ID
    pub async fn find_course(pool: &PgPool, id: &Uuid) -> AppResult<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(r#"SELECT * FROM courses WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(course)
    }

    /// Find module by ID
    pub async fn find_module(pool: &PgPool, id: &Uuid) -> AppResult<Option<Module>> {
        let module = sqlx::query_as::<_, Module>(r#"SELECT * FROM modules WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(module)
    }

    /// All modules of a course
    pub async fn list_modules(pool: &PgPool, course_id: &Uuid) -> AppResult<Vec<Module>> {
        let modules = sqlx::query_as::<_, Module>(
            r#"SELECT * FROM modules WHERE course_id = $1 ORDER BY order_index, id"#,
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;

        Ok(modules)
    }

    /// Find lesson by ID
    pub async fn find_lesson(pool: &PgPool, id: &Uuid) -> AppResult<Option<Lesson>> {
        let lesson = sqlx::query_as::<_, Lesson>(r#"SELECT * FROM lessons WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(lesson)
    }

    /// Lessons of one module in order
    pub async fn list_lessons(pool: &PgPool, module_id: &Uuid) -> AppResult<Vec<Lesson>> {
        let lessons = sqlx::query_as::<_, Lesson>(
            r#"SELECT * FROM lessons WHERE module_id = $1 ORDER BY order_index, id"#,
        )
        .bind(module_id)
        .fetch_all(pool)
        .await?;

        Ok(lessons)
    }

    /// Lessons of every module in a course
    pub async fn list_course_lessons(pool: &PgPool, course_id: &Uuid) -> AppResult<Vec<Lesson>> {
        let lessons = sqlx::query_as::<_, Lesson>(
            r#"
            SELECT l.*
            FROM lessons l
            JOIN modules m ON m.id = l.module_id
            WHERE m.course_id = $1
            ORDER BY l.module_id, l.order_index, l.id
            "#,
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;

        Ok(lessons)
    }

    /// Move a module under a new parent (or to the top level).
    ///
    /// The course's module rows stay locked from the read that `check` sees
    /// until the update commits, so concurrent moves in one course serialize.
    pub async fn move_module<F>(
        pool: &PgPool,
        id: &Uuid,
        parent_id: Option<&Uuid>,
        check: F,
    ) -> AppResult<Module>
    where
        F: FnOnce(&[Module]) -> AppResult<()>,
    {
        let mut tx = pool.begin().await?;

        let modules = sqlx::query_as::<_, Module>(
            r#"
            SELECT * FROM modules
            WHERE course_id = (SELECT course_id FROM modules WHERE id = $1)
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        check(&modules)?;

        let module = sqlx::query_as::<_, Module>(
            r#"
            UPDATE modules
            SET parent_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(parent_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(module)
    }
}
