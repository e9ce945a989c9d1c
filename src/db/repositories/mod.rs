//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod curriculum_repo;
pub mod enrollment_repo;
pub mod homework_repo;
pub mod learner_repo;
pub mod progress_repo;

pub use curriculum_repo::CurriculumRepository;
pub use enrollment_repo::EnrollmentRepository;
pub use homework_repo::HomeworkRepository;
pub use learner_repo::LearnerRepository;
pub use progress_repo::ProgressRepository;
