//! Lesson request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
};

/// Optional subject and evaluation time.
///
/// Students always see their own state at the current time; staff may ask on
/// behalf of a learner and replay a past or future instant.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerQuery {
    pub user_id: Option<Uuid>,
    pub at: Option<DateTime<Utc>>,
}

impl LearnerQuery {
    /// Resolve the learner and instant for this request
    pub fn resolve(&self, caller: &AuthenticatedUser) -> AppResult<(Uuid, DateTime<Utc>)> {
        let on_behalf = self.user_id.is_some_and(|id| id != caller.id);
        if (on_behalf || self.at.is_some()) && !caller.is_staff() {
            return Err(AppError::Forbidden(
                "Only staff can query other learners or other instants".to_string(),
            ));
        }

        Ok((self.user_id.unwrap_or(caller.id), self.at.unwrap_or_else(Utc::now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursegate_common::UserRole;

    fn caller(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn test_student_sees_only_self() {
        let student = caller(UserRole::Student);
        let (id, _) = LearnerQuery::default().resolve(&student).unwrap();
        assert_eq!(id, student.id);

        let own = LearnerQuery {
            user_id: Some(student.id),
            at: None,
        };
        assert!(own.resolve(&student).is_ok());

        let other = LearnerQuery {
            user_id: Some(Uuid::new_v4()),
            at: None,
        };
        assert!(matches!(other.resolve(&student), Err(AppError::Forbidden(_))));

        let replay = LearnerQuery {
            user_id: None,
            at: Some(Utc::now()),
        };
        assert!(matches!(replay.resolve(&student), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_staff_may_replay_for_learner() {
        let curator = caller(UserRole::Curator);
        let learner = Uuid::new_v4();
        let at = Utc::now();
        let query = LearnerQuery {
            user_id: Some(learner),
            at: Some(at),
        };
        assert_eq!(query.resolve(&curator).unwrap(), (learner, at));
    }
}
