pub mod comment_repository;
pub mod course_repository;
pub mod user_repository;

pub use comment_repository::CommentRepository;
pub use course_repository::CourseRepository;
pub use user_repository::UserRepository;
