//! Shared types, error model, and configuration for filingdigest.
//!
//! This crate is the foundation depended on by all other filingdigest crates.
//! It provides:
//! - [`FilingDigestError`]: the unified error type
//! - Domain types ([`PrimaryIssuer`], [`RelatedPerson`], [`FilingRecord`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, HttpConfig, TableConfig, config_dir, config_file_path,
    load_config, load_config_from,
};
pub use error::{FilingDigestError, Result};
pub use types::{
    FilingRecord, OUTPUT_COLUMNS, PrimaryIssuer, RelatedPerson, join_related_persons,
};
