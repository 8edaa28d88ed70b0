use domain::*;
use infrastructure::*;
use std::sync::Arc;
use tracing::info;

/// Reference rows written by [`CommentsApp::seed_demo_data`] into an empty store.
const DEMO_USERS: &[&str] = &["testuser", "ana.perez", "luis.gomez"];
const DEMO_COURSES: &[&str] = &["Curso de Mockito", "Fundamentos de Rust", "Bases de Datos"];

/// Comments Application - wires the persistence adapters into the domain service
pub struct CommentsApp {
    pub comment_service: CommentService,
    pub user_repository: Arc<dyn UserRepository>,
    pub course_repository: Arc<dyn CourseRepository>,
}

/// Number of reference rows inserted by a seeding run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub users: usize,
    pub courses: usize,
}

impl CommentsApp {
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        // Infrastructure layer - database setup
        let database = Database::new(database_path)?;
        let pool = database.get_pool().clone();

        // Create repository implementations
        let comment_repository: Arc<dyn CommentRepository> =
            Arc::new(SqliteCommentRepository::new(pool.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(pool.clone()));
        let course_repository: Arc<dyn CourseRepository> =
            Arc::new(SqliteCourseRepository::new(pool));

        Ok(Self::with_repositories(
            comment_repository,
            user_repository,
            course_repository,
        ))
    }

    /// Build the app around already constructed repositories.
    pub fn with_repositories(
        comment_repository: Arc<dyn CommentRepository>,
        user_repository: Arc<dyn UserRepository>,
        course_repository: Arc<dyn CourseRepository>,
    ) -> Self {
        let comment_service = CommentService::new(
            comment_repository,
            user_repository.clone(),
            course_repository.clone(),
        );

        Self {
            comment_service,
            user_repository,
            course_repository,
        }
    }

    /// Insert the demo users and courses, each table only when it is empty.
    pub async fn seed_demo_data(&self) -> Result<SeedReport, DomainError> {
        let mut report = SeedReport::default();

        if self.user_repository.find_all().await?.is_empty() {
            for username in DEMO_USERS {
                self.user_repository.save(&User::new(*username)).await?;
                report.users += 1;
            }
        }

        if self.course_repository.find_all().await?.is_empty() {
            for name in DEMO_COURSES {
                self.course_repository.save(&Course::new(*name)).await?;
                report.courses += 1;
            }
        }

        info!(users = report.users, courses = report.courses, "demo data seeded");
        Ok(report)
    }
}
