use crate::database::{comments, courses, repository_error, run_blocking, users, SqlitePool};
use crate::repositories::sqlite_course_repository::CourseModel;
use crate::repositories::sqlite_user_repository::UserModel;
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use domain::{Comment, CommentRepository, DomainError};

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct CommentModel {
    id: i32,
    rating: i32,
    body: String,
    posted_on: NaiveDate,
}

// Column values written on both insert and update
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = comments)]
struct CommentRow {
    rating: i32,
    body: String,
    posted_on: NaiveDate,
    user_id: i32,
    course_id: i32,
}

impl CommentRow {
    fn from_comment(comment: &Comment) -> Result<Self, DomainError> {
        Ok(Self {
            rating: comment.rating,
            body: comment.body.clone(),
            posted_on: comment.date,
            user_id: comment.user_id()?,
            course_id: comment.course_id()?,
        })
    }
}

type JoinedRow = (CommentModel, UserModel, CourseModel);

fn into_comment((model, user, course): JoinedRow) -> Comment {
    Comment {
        id: Some(model.id),
        rating: model.rating,
        body: model.body,
        date: model.posted_on,
        user: user.into(),
        course: course.into(),
    }
}

enum CommentFilter {
    All,
    Id(i32),
    Course(i32),
    User(i32),
}

// Comments joined with their user and course rows, ordered by id.
fn load_comments(
    conn: &mut SqliteConnection,
    filter: CommentFilter,
) -> QueryResult<Vec<JoinedRow>> {
    let mut query = comments::table
        .inner_join(users::table)
        .inner_join(courses::table)
        .select((
            CommentModel::as_select(),
            UserModel::as_select(),
            CourseModel::as_select(),
        ))
        .order(comments::id.asc())
        .into_boxed();

    query = match filter {
        CommentFilter::All => query,
        CommentFilter::Id(id) => query.filter(comments::id.eq(id)),
        CommentFilter::Course(course_id) => query.filter(comments::course_id.eq(course_id)),
        CommentFilter::User(user_id) => query.filter(comments::user_id.eq(user_id)),
    };

    query.load::<JoinedRow>(conn)
}

fn load_comment(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<JoinedRow>> {
    Ok(load_comments(conn, CommentFilter::Id(id))?.into_iter().next())
}

pub struct SqliteCommentRepository {
    pool: SqlitePool,
}

impl SqliteCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, filter: CommentFilter) -> Result<Vec<Comment>, DomainError> {
        let rows = run_blocking(&self.pool, move |conn| load_comments(conn, filter)).await?;
        Ok(rows.into_iter().map(into_comment).collect())
    }
}

#[async_trait]
impl CommentRepository for SqliteCommentRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, DomainError> {
        let row = run_blocking(&self.pool, move |conn| load_comment(conn, id)).await?;
        Ok(row.map(into_comment))
    }

    async fn find_all(&self) -> Result<Vec<Comment>, DomainError> {
        self.find_where(CommentFilter::All).await
    }

    async fn save(&self, comment: &Comment) -> Result<Comment, DomainError> {
        let row = CommentRow::from_comment(comment)?;

        let saved = match comment.id {
            Some(id) => {
                run_blocking(&self.pool, move |conn| {
                    diesel::update(comments::table.find(id))
                        .set(&row)
                        .execute(conn)?;
                    load_comment(conn, id)
                })
                .await?
                .ok_or_else(|| repository_error(format!("Comment {} does not exist", id)))?
            }
            None => {
                run_blocking(&self.pool, move |conn| {
                    conn.transaction::<_, diesel::result::Error, _>(|conn| {
                        diesel::insert_into(comments::table)
                            .values(&row)
                            .execute(conn)?;

                        let id = comments::table
                            .select(comments::id)
                            .order(comments::id.desc())
                            .first::<i32>(conn)?;
                        load_comment(conn, id)
                    })
                })
                .await?
                .ok_or_else(|| repository_error("Inserted comment could not be read back"))?
            }
        };

        Ok(into_comment(saved))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, DomainError> {
        run_blocking(&self.pool, move |conn| {
            diesel::select(diesel::dsl::exists(comments::table.find(id))).get_result::<bool>(conn)
        })
        .await
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), DomainError> {
        run_blocking(&self.pool, move |conn| {
            diesel::delete(comments::table.find(id)).execute(conn)
        })
        .await?;
        Ok(())
    }

    async fn find_by_course_id(&self, course_id: i32) -> Result<Vec<Comment>, DomainError> {
        self.find_where(CommentFilter::Course(course_id)).await
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Comment>, DomainError> {
        self.find_where(CommentFilter::User(user_id)).await
    }
}
