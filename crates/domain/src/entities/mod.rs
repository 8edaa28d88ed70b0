pub mod comment;
pub mod course;
pub mod user;

pub use comment::*;
pub use course::*;
pub use user::*;
