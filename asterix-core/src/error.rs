//! Unified error taxonomy for record- and block-level decode failures.
//!
//! Per the decoder's failure budget, these are never surfaced across a
//! `render` boundary: they abort the affected [`crate::record::DataRecord`]
//! (setting `format_ok = false`) or the affected
//! [`crate::block::DataBlock`], without unwinding the caller. Converters
//! never return `DecodeError` at all -- see [`crate::bitfield::ConversionError`].

use thiserror::Error;

/// Wire-level failure recoverable at the record or block granularity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("need at least {needed} bytes, only {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("FSPEC references undefined FRN {frn} in category {category}")]
    UndefinedFrn { category: u16, frn: u32 },

    #[error("item description {id} has no registered format")]
    MissingFormat { id: String },

    #[error("item {id} length {length} exceeds {available} remaining bytes")]
    ItemOverrun {
        id: String,
        length: usize,
        available: usize,
    },

    #[error("repetitive item: {count} * {element_len} overflows or exceeds the 64 KiB item cap")]
    RepetitiveOverflow { count: usize, element_len: usize },

    #[error("explicit item: sub-node count is zero or payload isn't a whole multiple of its size")]
    ExplicitMismatch,

    #[error("BDS selector 0x{selector:02X} has no matching register and no catch-all")]
    UnknownBdsRegister { selector: u8 },

    #[error("compound item has zero secondaries")]
    EmptyCompound,

    #[error("category {0} is not present in the catalogue")]
    UnknownCategory(u16),

    #[error("no UAP in category {category} matched the record's guard conditions")]
    NoMatchingUap { category: u16 },

    #[error("data block length {declared} is inconsistent with {available} available bytes")]
    InconsistentBlockLength { declared: usize, available: usize },
}
