pub mod sqlite_comment_repository;
pub mod sqlite_course_repository;
pub mod sqlite_user_repository;

pub use sqlite_comment_repository::SqliteCommentRepository;
pub use sqlite_course_repository::SqliteCourseRepository;
pub use sqlite_user_repository::SqliteUserRepository;
