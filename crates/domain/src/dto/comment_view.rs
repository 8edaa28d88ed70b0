use crate::entities::{Comment, Course, User};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reduced user projection embedded in comment payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id_user: i32,
    #[serde(default)]
    pub username: String,
}

/// Reduced course projection embedded in comment payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInfo {
    pub id_curso: i32,
    #[serde(default)]
    pub nombre_curso: String,
}

/// Transport shape of a comment, as exchanged over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(default)]
    pub id_comentario: Option<i32>,
    #[serde(default)]
    pub calificacion: i32,
    #[serde(default)]
    pub comentario: String,
    pub fecha: NaiveDate,
    pub usuario: UserInfo,
    pub curso: CourseInfo,
}

// Only store-loaded records, which always carry an id, reach these conversions.
impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id_user: user.id.unwrap_or_default(),
            username: user.username.clone(),
        }
    }
}

impl From<&Course> for CourseInfo {
    fn from(course: &Course) -> Self {
        Self {
            id_curso: course.id.unwrap_or_default(),
            nombre_curso: course.name.clone(),
        }
    }
}

// Entity -> view. Names come from the resolved records, never from a payload.
impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id_comentario: comment.id,
            calificacion: comment.rating,
            usuario: UserInfo::from(&comment.user),
            curso: CourseInfo::from(&comment.course),
            comentario: comment.body,
            fecha: comment.date,
        }
    }
}

impl CommentView {
    /// View -> entity. Only the scalar fields are taken from the view; the
    /// references are the records resolved from `usuario.id_user` and
    /// `curso.id_curso`. The resulting comment carries no id.
    pub fn into_comment(self, user: User, course: Course) -> Comment {
        Comment::new(self.calificacion, self.comentario, self.fecha, user, course)
    }
}
