//! # asterix-schema
//!
//! Loads the ASTERIX category catalogue -- one XML file per category
//! plus `asterix_bds.xml` for Mode-S registers -- into an
//! [`asterix_core::Catalogue`]. This crate owns no parsing or rendering
//! logic of its own; it is purely a consumer of `asterix-core`'s builder
//! API (`Category::new_uap`, `Category::new_item_description`).

pub mod error;
pub mod loader;
pub mod xml_model;

pub use error::SchemaError;
pub use loader::{load_catalogue, resolve_catalogue_path, CategoriesToLoad, CATALOGUE_PATH_ENV};
