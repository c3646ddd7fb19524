pub mod sql;
pub mod validate;

pub use sql::escape_like_pattern;
