//! [`DataRecord`]: the FSPEC engine. Decodes one record's presence
//! bitmap, selects a UAP, and walks the declared FRN order to produce
//! owned [`DataItem`]s.

use std::sync::Arc;

use crate::category::Category;
use crate::diagnostics::{Diagnostics, LogLevel};
use crate::emit::{item_separator, OutputFormat, RecordHeader};
use crate::error::DecodeError;
use crate::fspec::Fspec;

/// One decoded item, identified by its FRN and catalogue id, owning the
/// bytes the item's `length()` claimed.
#[derive(Debug, Clone)]
pub struct DataItem {
    pub frn: u32,
    pub id: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct DataRecord {
    pub category: Arc<Category>,
    pub sequence_number: u32,
    pub timestamp: f64,
    pub total_length: usize,
    pub format_ok: bool,
    pub items: Vec<DataItem>,
    pub hex_dump: String,
    pub crc: u32,
}

impl DataRecord {
    /// Parses one record starting at the head of `raw_bytes` (which may
    /// extend beyond this record into the rest of the block). Never
    /// fails: unrecoverable conditions set `format_ok = false` and stop
    /// item iteration rather than returning an `Err`, so a malformed
    /// record can still report how many bytes it consumed.
    pub fn parse(category: Arc<Category>, sequence_number: u32, raw_bytes: &[u8], timestamp: f64, diagnostics: &dyn Diagnostics) -> Self {
        let mut record = DataRecord {
            category: Arc::clone(&category),
            sequence_number,
            timestamp,
            total_length: 0,
            format_ok: true,
            items: Vec::new(),
            hex_dump: String::new(),
            crc: 0,
        };

        let fspec = match Fspec::parse(raw_bytes) {
            Ok((fspec, _)) => fspec,
            Err(e) => {
                diagnostics.log(LogLevel::Warning, &format!("record {sequence_number}: {e}"));
                record.format_ok = false;
                record.total_length = raw_bytes.len();
                return record;
            }
        };
        let fspec_length = fspec.len();

        let uap = match category.select_uap(&raw_bytes[fspec_length..]) {
            Some(uap) => uap,
            None => {
                diagnostics.log(
                    LogLevel::Warning,
                    &DecodeError::NoMatchingUap { category: category.number }.to_string(),
                );
                record.format_ok = false;
                record.total_length = fspec_length;
                record.finish_hex_and_crc(raw_bytes);
                return record;
            }
        };

        let mut cursor = fspec_length;
        for frn in fspec.present_frns() {
            let Some(item_id) = uap.item_id_for(frn) else {
                diagnostics.log(
                    LogLevel::Warning,
                    &DecodeError::UndefinedFrn { category: category.number, frn }.to_string(),
                );
                record.format_ok = false;
                break;
            };
            if item_id == "-" {
                continue;
            }
            let Some(description) = category.description_for(item_id) else {
                diagnostics.log(
                    LogLevel::Warning,
                    &format!("record {sequence_number}: item description {item_id} missing from catalogue"),
                );
                record.format_ok = false;
                break;
            };
            let available = raw_bytes.len() - cursor;
            let Some(length) = description.length(&raw_bytes[cursor..]) else {
                diagnostics.log(
                    LogLevel::Warning,
                    &DecodeError::MissingFormat { id: item_id.to_string() }.to_string(),
                );
                record.format_ok = false;
                break;
            };
            if length > available {
                diagnostics.log(
                    LogLevel::Warning,
                    &DecodeError::ItemOverrun { id: item_id.to_string(), length, available }.to_string(),
                );
                record.format_ok = false;
                break;
            }
            record.items.push(DataItem {
                frn,
                id: item_id.to_string(),
                data: raw_bytes[cursor..cursor + length].to_vec(),
            });
            cursor += length;
        }

        // Tail handling: trailing padding after the last item is accepted
        // silently, some radars emit block-level padding.
        record.total_length = cursor;
        record.finish_hex_and_crc(raw_bytes);
        record
    }

    fn finish_hex_and_crc(&mut self, raw_bytes: &[u8]) {
        let consumed = &raw_bytes[..self.total_length.min(raw_bytes.len())];
        self.hex_dump = consumed.iter().map(|b| format!("{b:02X}")).collect();
        self.crc = crc32fast::hash(consumed);
    }

    pub fn render(&self, out: &mut String, format: OutputFormat) -> bool {
        let header = RecordHeader {
            sequence_number: self.sequence_number,
            category: self.category.number,
            length: self.total_length,
            crc: self.crc,
            hex_dump: &self.hex_dump,
            timestamp: self.timestamp,
        };

        if !self.format_ok {
            out.push_str(&header.render_error(format));
            return true;
        }

        out.push_str(&header.render(format));
        let path = format!("{:03}", self.category.number);
        let mut first = true;
        for item in &self.items {
            let Some(description) = self.category.description_for(&item.id) else {
                continue;
            };
            let mut item_out = String::new();
            if description.render(&mut item_out, format, &item.data, false, &path) {
                if !first {
                    out.push_str(item_separator(format));
                }
                out.push_str(&item_out);
                first = false;
            }
        }
        out.push_str(crate::emit::record_footer(format));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitfield::Encoding;
    use crate::descriptor::BitsDescriptor;
    use crate::diagnostics::LogCrateDiagnostics;
    use crate::format::{Fixed, FormatNode};
    use crate::item::ItemDescription;
    use crate::uap::{Guard, UapItem};

    fn sac_sic_category() -> Arc<Category> {
        let mut cat = Category::new(48);
        cat.new_item_description(ItemDescription::new(
            "I048/010",
            "Data Source Identifier",
            FormatNode::Fixed(Fixed {
                length: 2,
                bits: vec![
                    BitsDescriptor::new("SAC", "System Area Code", 16, 9, Encoding::Unsigned),
                    BitsDescriptor::new("SIC", "System Identification Code", 8, 1, Encoding::Unsigned),
                ],
            }),
        ));
        cat.new_uap("default", Guard::Always).items.push(UapItem {
            frn: 1,
            item_id: "I048/010".into(),
        });
        Arc::new(cat)
    }

    #[test]
    fn parses_single_item_record() {
        let cat = sac_sic_category();
        // FSPEC: FRN1 set, FX=0 -> 0x80; then SAC=0x0A, SIC=0x14
        let data = [0x80u8, 0x0A, 0x14];
        let record = DataRecord::parse(cat, 1, &data, 0.0, &LogCrateDiagnostics);
        assert!(record.format_ok);
        assert_eq!(record.total_length, 3);
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].id, "I048/010");
    }

    #[test]
    fn unknown_frn_marks_format_not_ok() {
        let cat = sac_sic_category();
        // FRN2 set instead of FRN1 -> no such slot in the UAP
        let data = [0x40u8, 0x0A, 0x14];
        let record = DataRecord::parse(cat, 1, &data, 0.0, &LogCrateDiagnostics);
        assert!(!record.format_ok);
    }

    #[test]
    fn render_emits_error_marker_when_not_format_ok() {
        let cat = sac_sic_category();
        let data = [0x40u8];
        let record = DataRecord::parse(cat, 7, &data, 0.0, &LogCrateDiagnostics);
        let mut out = String::new();
        assert!(record.render(&mut out, OutputFormat::JsonCompact));
        assert!(out.contains("malformed record 7"));
    }

    #[test]
    fn render_json_contains_item_fields() {
        let cat = sac_sic_category();
        let data = [0x80u8, 0x0A, 0x14];
        let record = DataRecord::parse(cat, 1, &data, 0.0, &LogCrateDiagnostics);
        let mut out = String::new();
        assert!(record.render(&mut out, OutputFormat::JsonCompact));
        assert!(out.contains("\"SAC\":\"10\""));
        assert!(out.ends_with("}}"));
    }

    #[test]
    fn crc_is_deterministic_for_identical_bytes() {
        let cat = sac_sic_category();
        let data = [0x80u8, 0x0A, 0x14];
        let a = DataRecord::parse(Arc::clone(&cat), 1, &data, 0.0, &LogCrateDiagnostics);
        let b = DataRecord::parse(cat, 2, &data, 0.0, &LogCrateDiagnostics);
        assert_eq!(a.crc, b.crc);
    }

    #[test]
    fn truncated_fspec_marks_format_not_ok() {
        let cat = sac_sic_category();
        let data = [0x01u8];
        let record = DataRecord::parse(cat, 1, &data, 0.0, &LogCrateDiagnostics);
        assert!(!record.format_ok);
    }
}
