pub mod pagination;
pub mod todo;
pub mod user;
