//! Database initialization, schema maintenance, models, and queries

pub mod anthology;
pub mod authors;
pub mod init;
pub mod models;
pub mod poems;
pub mod schema;

pub use init::*;
pub use models::*;
pub use schema::*;
