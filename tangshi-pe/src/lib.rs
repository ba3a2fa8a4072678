//! tangshi-pe library - Portrait Enrichment module
//!
//! Attaches a best-effort portrait URL to each author by querying an image
//! search endpoint and extracting the first marker-class image from the
//! returned markup. Per-author failures are logged and skipped; the loop is
//! strictly sequential with a fixed delay between requests.

pub mod bing;
pub mod enrich;
pub mod extract;
