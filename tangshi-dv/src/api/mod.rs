//! HTTP API handlers for tangshi-dv

pub mod authors;
pub mod error;
pub mod health;
pub mod poems;
pub mod search;
pub mod stats;

pub use authors::{get_author, get_author_poems, list_authors};
pub use error::ApiError;
pub use health::health_routes;
pub use poems::{get_poem, list_poems};
pub use search::{search_authors, search_poems};
pub use stats::{get_author_stats, get_stats};
