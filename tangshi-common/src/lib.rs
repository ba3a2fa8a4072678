//! # Tangshi Common Library
//!
//! Shared code for the tangshi services including:
//! - Database initialization, schema maintenance, and queries
//! - Row models for authors, poems, and the curated anthology
//! - Configuration loading and root folder resolution
//! - Common error types

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
