// Course catalog: file-backed store and its CRUD-lite handlers.

pub mod handlers;
pub mod store;
