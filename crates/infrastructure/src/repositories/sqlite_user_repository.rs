use crate::database::{run_blocking, users, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::{DomainError, User, UserRepository};

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserModel {
    pub(crate) id: i32,
    pub(crate) username: String,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUserModel {
    username: String,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User::with_id(model.id, model.username)
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let result = run_blocking(&self.pool, move |conn| {
            users::table
                .find(id)
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
                .optional()
        })
        .await?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let result = run_blocking(&self.pool, |conn| {
            users::table
                .order(users::id.asc())
                .select(UserModel::as_select())
                .load::<UserModel>(conn)
        })
        .await?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let username = user.username.clone();
        let result = match user.id {
            Some(id) => {
                run_blocking(&self.pool, move |conn| {
                    diesel::update(users::table.find(id))
                        .set(users::username.eq(username))
                        .execute(conn)?;
                    users::table
                        .find(id)
                        .select(UserModel::as_select())
                        .first::<UserModel>(conn)
                })
                .await?
            }
            None => {
                run_blocking(&self.pool, move |conn| {
                    conn.transaction::<_, diesel::result::Error, _>(|conn| {
                        diesel::insert_into(users::table)
                            .values(&NewUserModel { username })
                            .execute(conn)?;

                        // SQLite has no RETURNING here, fetch the last inserted row
                        users::table
                            .order(users::id.desc())
                            .select(UserModel::as_select())
                            .first::<UserModel>(conn)
                    })
                })
                .await?
            }
        };

        Ok(result.into())
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, DomainError> {
        run_blocking(&self.pool, move |conn| {
            diesel::select(diesel::dsl::exists(users::table.find(id))).get_result::<bool>(conn)
        })
        .await
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), DomainError> {
        run_blocking(&self.pool, move |conn| {
            diesel::delete(users::table.find(id)).execute(conn)
        })
        .await?;
        Ok(())
    }
}
