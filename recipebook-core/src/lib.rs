//! `recipebook` core: the recipe document model and its sources
//!
//! This crate provides the types shared across `recipebook` (CLI) and
//! `recipebook-site` (rendering and catalog generation): front-matter
//! parsing, the on-disk content store, site configuration and the core
//! error types.

pub mod config;
pub mod document;
pub mod error;
pub mod store;
pub mod suggest;
