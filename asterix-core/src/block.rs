//! [`DataBlock`]: one category byte + 16-bit big-endian length, followed
//! by a sequence of records consumed until that length is exhausted.

use std::sync::Arc;

use crate::catalogue::Catalogue;
use crate::diagnostics::{Diagnostics, LogLevel};
use crate::emit::{block_error, item_separator, OutputFormat};
use crate::record::DataRecord;

#[derive(Debug, Clone)]
pub struct DataBlock {
    pub category: u16,
    pub declared_length: usize,
    pub format_ok: bool,
    pub records: Vec<DataRecord>,
}

impl DataBlock {
    /// Parses one block from the head of `data`. Returns the block and
    /// the number of bytes consumed (the declared length when it fits,
    /// otherwise whatever is actually available).
    ///
    /// `included_in_filter` decides whether a present-but-filtered-out
    /// category still gets its records decoded: when `false` and the
    /// category is excluded, only the header is kept (`records` stays
    /// empty) and the full declared length is skipped.
    pub fn parse(
        catalogue: &Catalogue,
        data: &[u8],
        included_in_filter: impl Fn(u16) -> bool,
        diagnostics: &dyn Diagnostics,
    ) -> Option<(Self, usize)> {
        if data.len() < 3 {
            return None;
        }
        let category = data[0] as u16;
        let declared_length = u16::from_be_bytes([data[1], data[2]]) as usize;
        let available = declared_length.min(data.len());

        let Some(category_def) = catalogue.get(category) else {
            diagnostics.log(LogLevel::Warning, &crate::error::DecodeError::UnknownCategory(category).to_string());
            return Some((
                DataBlock {
                    category,
                    declared_length,
                    format_ok: false,
                    records: Vec::new(),
                },
                available,
            ));
        };

        if !included_in_filter(category) {
            return Some((
                DataBlock {
                    category,
                    declared_length,
                    format_ok: true,
                    records: Vec::new(),
                },
                available,
            ));
        }

        let category_def = Arc::new(category_def.clone());
        let mut records = Vec::new();
        let mut cursor = 3usize;
        let mut seq = 1u32;
        while cursor < available {
            let record = DataRecord::parse(Arc::clone(&category_def), seq, &data[cursor..available], 0.0, diagnostics);
            if record.total_length == 0 {
                diagnostics.log(
                    LogLevel::Warning,
                    &format!("category {category}: record {seq} made no progress, stopping block early"),
                );
                break;
            }
            cursor += record.total_length;
            records.push(record);
            seq += 1;
        }

        Some((
            DataBlock {
                category,
                declared_length,
                format_ok: true,
                records,
            },
            available,
        ))
    }

    pub fn render(&self, out: &mut String, format: OutputFormat) {
        if !self.format_ok {
            out.push_str(&block_error(format, self.category));
            return;
        }
        let json = format.is_json();
        if json && self.records.len() > 1 {
            out.push('[');
        }
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                out.push_str(item_separator(format));
            }
            record.render(out, format);
        }
        if json && self.records.len() > 1 {
            out.push(']');
        }
    }
}
