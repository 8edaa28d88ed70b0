use crate::entities::Comment;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Persistence port for comments.
///
/// Every returned `Comment` carries the user and course rows as they are at
/// read time.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Comment>, DomainError>;
    /// Inserts when `comment.id` is `None` (the store assigns the id),
    /// otherwise overwrites the stored row in place.
    async fn save(&self, comment: &Comment) -> Result<Comment, DomainError>;
    async fn exists_by_id(&self, id: i32) -> Result<bool, DomainError>;
    async fn delete_by_id(&self, id: i32) -> Result<(), DomainError>;
    async fn find_by_course_id(&self, course_id: i32) -> Result<Vec<Comment>, DomainError>;
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Comment>, DomainError>;
}
