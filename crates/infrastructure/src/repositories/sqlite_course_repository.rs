use crate::database::{courses, run_blocking, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::{Course, CourseRepository, DomainError};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CourseModel {
    pub(crate) id: i32,
    pub(crate) name: String,
}

#[derive(Insertable)]
#[diesel(table_name = courses)]
struct NewCourseModel {
    name: String,
}

impl From<CourseModel> for Course {
    fn from(model: CourseModel) -> Self {
        Course::with_id(model.id, model.name)
    }
}

pub struct SqliteCourseRepository {
    pool: SqlitePool,
}

impl SqliteCourseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for SqliteCourseRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, DomainError> {
        let result = run_blocking(&self.pool, move |conn| {
            courses::table
                .find(id)
                .select(CourseModel::as_select())
                .first::<CourseModel>(conn)
                .optional()
        })
        .await?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Course>, DomainError> {
        let result = run_blocking(&self.pool, |conn| {
            courses::table
                .order(courses::id.asc())
                .select(CourseModel::as_select())
                .load::<CourseModel>(conn)
        })
        .await?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn save(&self, course: &Course) -> Result<Course, DomainError> {
        let name = course.name.clone();
        let result = match course.id {
            Some(id) => {
                run_blocking(&self.pool, move |conn| {
                    diesel::update(courses::table.find(id))
                        .set(courses::name.eq(name))
                        .execute(conn)?;
                    courses::table
                        .find(id)
                        .select(CourseModel::as_select())
                        .first::<CourseModel>(conn)
                })
                .await?
            }
            None => {
                run_blocking(&self.pool, move |conn| {
                    conn.transaction::<_, diesel::result::Error, _>(|conn| {
                        diesel::insert_into(courses::table)
                            .values(&NewCourseModel { name })
                            .execute(conn)?;

                        // SQLite has no RETURNING here, fetch the last inserted row
                        courses::table
                            .order(courses::id.desc())
                            .select(CourseModel::as_select())
                            .first::<CourseModel>(conn)
                    })
                })
                .await?
            }
        };

        Ok(result.into())
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, DomainError> {
        run_blocking(&self.pool, move |conn| {
            diesel::select(diesel::dsl::exists(courses::table.find(id))).get_result::<bool>(conn)
        })
        .await
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), DomainError> {
        run_blocking(&self.pool, move |conn| {
            diesel::delete(courses::table.find(id)).execute(conn)
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::temp_database;

    #[tokio::test]
    async fn saves_and_lists_courses() {
        let (_dir, database) = temp_database();
        let repository = SqliteCourseRepository::new(database.get_pool().clone());

        let rust = repository.save(&Course::new("Curso de Rust")).await.unwrap();
        repository.save(&Course::new("Curso de SQL")).await.unwrap();

        assert_eq!(rust, Course::with_id(1, "Curso de Rust"));
        let names: Vec<String> = repository
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Curso de Rust", "Curso de SQL"]);
    }

    #[tokio::test]
    async fn missing_course_is_absent() {
        let (_dir, database) = temp_database();
        let repository = SqliteCourseRepository::new(database.get_pool().clone());

        assert_eq!(repository.find_by_id(101).await.unwrap(), None);
        assert!(!repository.exists_by_id(101).await.unwrap());
        // Deleting an unknown id is a no-op
        repository.delete_by_id(101).await.unwrap();
    }
}
