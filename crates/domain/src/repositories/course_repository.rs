use crate::entities::Course;
use crate::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Course>, DomainError>;
    async fn save(&self, course: &Course) -> Result<Course, DomainError>;
    async fn exists_by_id(&self, id: i32) -> Result<bool, DomainError>;
    async fn delete_by_id(&self, id: i32) -> Result<(), DomainError>;
}
