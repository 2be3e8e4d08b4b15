//! Load-time failures: malformed XML and the structural rule violations
//! caught while lowering it into `asterix-core` types. Schema errors
//! abort only the offending category file; the loader continues with
//! the rest.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("malformed XML in category file: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("unknown encoding {encoding:?} on item {item_id}")]
    UnknownEncoding { item_id: String, encoding: String },

    #[error("Bits element on item {item_id} is missing both `bit` and `from`/`to`")]
    MissingBitsRange { item_id: String },

    #[error("Bits range on item {item_id} falls outside the item's declared length")]
    BitsRangeOutsideItem { item_id: String },

    #[error("Compound item {item_id} does not start with a Variable primary")]
    CompoundMissingPrimaryVariable { item_id: String },

    #[error("duplicate data item id {item_id} in category {category}")]
    DuplicateFormat { category: String, item_id: String },

    #[error("category id {0:?} is not a valid category number or \"BDS\"")]
    UnknownCategoryId(String),

    #[error("I/O error reading catalogue file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
