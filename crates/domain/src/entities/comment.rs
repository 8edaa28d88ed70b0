use crate::entities::{Course, User};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted comment entity.
///
/// `user` and `course` hold the resolved records the comment points at; the
/// store only keeps their ids and re-reads them on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Option<i32>, // assigned by the store on first save
    pub rating: i32,
    pub body: String,
    pub date: NaiveDate,
    pub user: User,
    pub course: Course,
}

impl Comment {
    pub fn new(rating: i32, body: String, date: NaiveDate, user: User, course: Course) -> Self {
        Self {
            id: None,
            rating,
            body,
            date,
            user,
            course,
        }
    }

    /// Id of the referenced user, required before the comment can be stored.
    pub fn user_id(&self) -> Result<i32, crate::DomainError> {
        self.user.id.ok_or_else(|| {
            crate::DomainError::ValidationError("Comment user has no id".to_string())
        })
    }

    pub fn course_id(&self) -> Result<i32, crate::DomainError> {
        self.course.id.ok_or_else(|| {
            crate::DomainError::ValidationError("Comment course has no id".to_string())
        })
    }
}
