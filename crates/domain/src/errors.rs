use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Usuario no encontrado (id {0})")]
    UserNotFound(i32),

    #[error("Curso no encontrado (id {0})")]
    CourseNotFound(i32),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl DomainError {
    /// True for errors raised because a referenced user or course is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::UserNotFound(_) | DomainError::CourseNotFound(_))
    }
}
