// Database schema for the comments service
diesel::table! {
    users (id) {
        id -> Integer,
        username -> Text,
    }
}

diesel::table! {
    courses (id) {
        id -> Integer,
        name -> Text,
    }
}

diesel::table! {
    comments (id) {
        id -> Integer,
        rating -> Integer,
        body -> Text,
        posted_on -> Date,       // calendar date, no time component
        user_id -> Integer,
        course_id -> Integer,
    }
}

diesel::joinable!(comments -> users (user_id));
diesel::joinable!(comments -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(comments, users, courses,);

/// DDL matching the `table!` declarations above.
pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    username TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    rating INTEGER NOT NULL,
    body TEXT NOT NULL,
    posted_on DATE NOT NULL,
    user_id INTEGER NOT NULL REFERENCES users (id),
    course_id INTEGER NOT NULL REFERENCES courses (id)
);
CREATE INDEX IF NOT EXISTS comments_user_id_idx ON comments (user_id);
CREATE INDEX IF NOT EXISTS comments_course_id_idx ON comments (course_id);
";
