use crate::entities::User;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Repository trait - defines what we need from persistence layer
/// This is a PORT in hexagonal architecture
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    /// Inserts when `user.id` is `None`, otherwise overwrites the stored row.
    async fn save(&self, user: &User) -> Result<User, DomainError>;
    async fn exists_by_id(&self, id: i32) -> Result<bool, DomainError>;
    async fn delete_by_id(&self, id: i32) -> Result<(), DomainError>;
}
