//! `recipebook` - static site builder for Kubernetes recipe collections
//!
//! Command-line front end over `recipebook-core` (documents, store,
//! configuration) and `recipebook-site` (rendering, catalog, validation).

pub mod cli;
pub mod error;
pub mod observability;
