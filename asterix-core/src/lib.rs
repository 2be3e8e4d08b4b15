//! # asterix-core
//!
//! Runtime engine for decoding ASTERIX surveillance messages: bit-range
//! extraction, the six polymorphic format primitives, the FSPEC-driven
//! record/block walk, and the seven textual output shapes.
//!
//! This crate knows nothing about XML; it exposes a builder API
//! ([`Category::new_uap`], [`Category::new_item_description`]) that
//! [`asterix-schema`](../asterix_schema/index.html) populates from a
//! category catalogue at load time.
//!
//! ## Key components
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`bitfield::extract_bits`] | 1-based, MSB-first bit-range extraction |
//! | [`descriptor::BitsDescriptor`] | named bit span + encoding, the format tree's leaf |
//! | [`format::FormatNode`] | the six format primitives (Fixed/Variable/Compound/Repetitive/Explicit/BDS) |
//! | [`catalogue::Catalogue`] | the process-scoped category map |
//! | [`record::DataRecord`] | the FSPEC engine |
//! | [`block::DataBlock`] | one category-tagged block of records |
//! | [`error::DecodeError`] | unified wire-error taxonomy |
//! | [`diagnostics::Diagnostics`] | injected logging sink |

pub mod bitfield;
pub mod block;
pub mod catalogue;
pub mod category;
pub mod descriptor;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod filter;
pub mod format;
pub mod fspec;
pub mod item;
pub mod record;
pub mod uap;

pub use block::DataBlock;
pub use catalogue::Catalogue;
pub use category::Category;
pub use descriptor::BitsDescriptor;
pub use diagnostics::{Diagnostics, LogCrateDiagnostics, LogLevel};
pub use emit::OutputFormat;
pub use error::DecodeError;
pub use filter::FilterSpec;
pub use format::FormatNode;
pub use fspec::Fspec;
pub use item::ItemDescription;
pub use record::{DataItem, DataRecord};
pub use uap::{Guard, Uap, UapItem};

#[cfg(test)]
mod tests {}
