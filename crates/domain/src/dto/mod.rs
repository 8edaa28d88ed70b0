pub mod comment_view;

pub use comment_view::*;
