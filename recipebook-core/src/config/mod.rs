//! Site configuration: schema and loader.

pub mod loader;
pub mod schema;

pub use loader::{DEFAULT_CONFIG_FILE, load_config, parse_config};
pub use schema::{CategoryConfig, SiteConfig, SiteInfo};
