use crate::dto::CommentView;
use crate::entities::{Course, User};
use crate::errors::DomainError;
use crate::repositories::{CommentRepository, CourseRepository, UserRepository};
use std::sync::Arc;
use tracing::{debug, warn};

/// Comment Service - maps between stored comments and their transport view,
/// checking that referenced users and courses exist before any write.
pub struct CommentService {
    comment_repository: Arc<dyn CommentRepository>,
    user_repository: Arc<dyn UserRepository>,
    course_repository: Arc<dyn CourseRepository>,
}

impl CommentService {
    pub fn new(
        comment_repository: Arc<dyn CommentRepository>,
        user_repository: Arc<dyn UserRepository>,
        course_repository: Arc<dyn CourseRepository>,
    ) -> Self {
        Self {
            comment_repository,
            user_repository,
            course_repository,
        }
    }

    /// Create a new comment. Any id present in the view is ignored.
    pub async fn create(&self, view: CommentView) -> Result<CommentView, DomainError> {
        let (user, course) = self.resolve_references(&view).await?;
        let comment = view.into_comment(user, course);

        let saved = self.comment_repository.save(&comment).await?;
        debug!(id = ?saved.id, "comment created");
        Ok(saved.into())
    }

    /// Get all comments, in store order
    pub async fn list_all(&self) -> Result<Vec<CommentView>, DomainError> {
        let comments = self.comment_repository.find_all().await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }

    /// Get comment by ID. `None` when it does not exist.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<CommentView>, DomainError> {
        let comment = self.comment_repository.find_by_id(id).await?;
        Ok(comment.map(Into::into))
    }

    /// Overwrite the scalar fields and references of an existing comment.
    ///
    /// Returns `Ok(None)` when no comment has `id`. The stored id never changes,
    /// whatever the view carries in `id_comentario`.
    pub async fn update(
        &self,
        id: i32,
        view: CommentView,
    ) -> Result<Option<CommentView>, DomainError> {
        let Some(existing) = self.comment_repository.find_by_id(id).await? else {
            debug!(id, "update skipped, comment not found");
            return Ok(None);
        };

        let (user, course) = self.resolve_references(&view).await?;
        let mut comment = view.into_comment(user, course);
        comment.id = existing.id;

        let saved = self.comment_repository.save(&comment).await?;
        debug!(id, "comment updated");
        Ok(Some(saved.into()))
    }

    /// Delete a comment. Returns false when there was nothing to delete.
    pub async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        if !self.comment_repository.exists_by_id(id).await? {
            return Ok(false);
        }

        self.comment_repository.delete_by_id(id).await?;
        debug!(id, "comment deleted");
        Ok(true)
    }

    pub async fn list_by_course(&self, course_id: i32) -> Result<Vec<CommentView>, DomainError> {
        let comments = self.comment_repository.find_by_course_id(course_id).await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<CommentView>, DomainError> {
        let comments = self.comment_repository.find_by_user_id(user_id).await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }

    // Only the ids of the embedded views are trusted; names are re-read.
    async fn resolve_references(&self, view: &CommentView) -> Result<(User, Course), DomainError> {
        let user_id = view.usuario.id_user;
        let user = match self.user_repository.find_by_id(user_id).await? {
            Some(user) => user,
            None => {
                warn!(user_id, "rejecting comment write, unknown user");
                return Err(DomainError::UserNotFound(user_id));
            }
        };

        let course_id = view.curso.id_curso;
        let course = match self.course_repository.find_by_id(course_id).await? {
            Some(course) => course,
            None => {
                warn!(course_id, "rejecting comment write, unknown course");
                return Err(DomainError::CourseNotFound(course_id));
            }
        };

        Ok((user, course))
    }
}
