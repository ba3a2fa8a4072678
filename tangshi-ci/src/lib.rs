//! tangshi-ci library - Corpus Import module
//!
//! Loads the JSON poetry corpus (authors, poem shards, and the curated
//! anthology) into the shared SQLite store. Re-runnable: author rows are
//! never duplicated.

pub mod corpus;
pub mod import;
