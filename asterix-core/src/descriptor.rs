//! [`BitsDescriptor`]: the leaf node of a format tree.

use crate::bitfield::{self, Encoding};
use crate::emit::OutputFormat;

/// One (numeric value, human description) pair in a [`BitsDescriptor`]'s
/// enumerated-meaning table. Lookup compares the extracted numeric value;
/// the first match wins.
#[derive(Debug, Clone)]
pub struct ValueEntry {
    pub value: i64,
    pub description: String,
}

/// Leaf node of a format tree: a named bit span with an encoding and
/// optional scale/unit/range/enumeration metadata.
#[derive(Debug, Clone)]
pub struct BitsDescriptor {
    pub short_name: String,
    pub full_name: String,
    pub from: usize,
    pub to: usize,
    pub encoding: Encoding,
    /// 0.0 means "no scaling".
    pub scale: f64,
    pub unit: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub const_value: Option<i64>,
    pub value_table: Vec<ValueEntry>,
    /// True iff this is the FX continuation bit of a Variable item.
    pub is_extension: bool,
    /// For bits inside a Compound primary: the 1-based index of the
    /// secondary sub-item this bit gates.
    pub presence_of_field: Option<usize>,
    /// Runtime flag set by the filter mechanism (see `crate::filter`).
    pub filtered: bool,
}

impl BitsDescriptor {
    /// Constructs a descriptor, defaulting an empty `short_name` to
    /// `full_name` and vice versa (both must not end up empty for a
    /// well-formed schema, but the decoder tolerates it per §4.C).
    pub fn new(short_name: impl Into<String>, full_name: impl Into<String>, from: usize, to: usize, encoding: Encoding) -> Self {
        let short_name = short_name.into();
        let full_name = full_name.into();
        let (short_name, full_name) = match (short_name.is_empty(), full_name.is_empty()) {
            (true, false) => (full_name.clone(), full_name),
            (false, true) => (short_name.clone(), short_name),
            _ => (short_name, full_name),
        };
        Self {
            short_name,
            full_name,
            from,
            to,
            encoding,
            scale: 0.0,
            unit: String::new(),
            min: None,
            max: None,
            const_value: None,
            value_table: Vec::new(),
            is_extension: false,
            presence_of_field: None,
            filtered: false,
        }
    }

    /// Normalized `(from, to)`, swapped if the schema declared them inverted.
    pub fn range(&self) -> (usize, usize) {
        bitfield::normalize_range(self.from, self.to)
    }

    /// Extracted raw numeric value, when the encoding is numeric
    /// (`Unsigned`/`Signed`). Returns `None` for string encodings or an
    /// out-of-range span.
    fn numeric_value(&self, data: &[u8]) -> Option<i64> {
        let (from, to) = self.range();
        match self.encoding {
            Encoding::Unsigned => bitfield::read_unsigned(data, from, to).map(|v| v as i64),
            Encoding::Signed => bitfield::read_signed(data, from, to),
            _ => None,
        }
    }

    fn value_table_meaning(&self, raw: i64) -> Option<&str> {
        self.value_table
            .iter()
            .find(|e| e.value == raw)
            .map(|e| e.description.as_str())
    }

    /// Renders this field into `out` per `format`. `path` is the
    /// dotted category/item path accumulated by the caller, used only by
    /// [`OutputFormat::Eout`]'s `<category>.<short>` shape. Returns `false`
    /// (emitting nothing) when the global filter is active and this
    /// descriptor was not selected by `apply_filter`.
    pub fn render(&self, out: &mut String, format: OutputFormat, data: &[u8], filter_active: bool, path: &str) -> bool {
        if filter_active && !self.filtered {
            return false;
        }

        let (from, to) = self.range();
        let total_bits = data.len() * 8;
        if from < 1 || to > total_bits {
            push_field(out, format, path, &self.short_name, "???");
            return true;
        }

        let mut warning: Option<String> = None;
        let value_str = match self.encoding {
            Encoding::Unsigned | Encoding::Signed => {
                let Some(raw) = self.numeric_value(data) else {
                    push_field(out, format, path, &self.short_name, "???");
                    return true;
                };
                if let Some(cv) = self.const_value {
                    if raw != cv {
                        warning = Some(format!("constant mismatch: expected {cv}, got {raw}"));
                    }
                }
                let mut s = raw.to_string();
                if self.scale != 0.0 {
                    let scaled = raw as f64 * self.scale;
                    if let Some(min) = self.min {
                        if scaled < min {
                            warning = Some(format!("{scaled} below min {min}"));
                        }
                    }
                    if let Some(max) = self.max {
                        if scaled > max {
                            warning = Some(format!("{scaled} above max {max}"));
                        }
                    }
                    s.push_str(&format!(" ({scaled} {unit})", unit = self.unit));
                } else if !self.unit.is_empty() {
                    s.push_str(&format!(" ({})", self.unit));
                }
                if let Some(meaning) = self.value_table_meaning(raw) {
                    s.push_str(&format!(" ({meaning})"));
                }
                s
            }
            Encoding::SixBitChar => bitfield::decode_six_bit_char(data, from, to).unwrap_or_else(|_| "???".into()),
            Encoding::HexBitChar => bitfield::decode_hex_bit_char(data, from, to).unwrap_or_else(|_| "???".into()),
            Encoding::Octal => bitfield::decode_octal(data, from, to).unwrap_or_else(|_| "???".into()),
            Encoding::Ascii => bitfield::decode_ascii(data, from, to).unwrap_or_else(|_| "???".into()),
        };

        let value_str = match warning {
            Some(w) => format!("{value_str} (Warning: {w})"),
            None => value_str,
        };

        push_field(out, format, path, &self.short_name, &value_str);
        true
    }

    /// Diagnostic dump of this leaf, for `print_descriptors`.
    pub fn print_descriptor(&self, header_prefix: &str) -> String {
        format!(
            "{header_prefix}{short} [{from}..{to}] {enc:?}",
            short = self.short_name,
            from = self.from,
            to = self.to,
            enc = self.encoding
        )
    }

    /// Marks this descriptor as selected by the global filter when `name`
    /// is a case-sensitive prefix of the short name, length-bounded by the
    /// short name itself (so a filter longer than the field name never
    /// matches).
    pub fn apply_filter(&mut self, name: &str) -> bool {
        if name.len() <= self.short_name.len() && self.short_name.starts_with(name) {
            self.filtered = true;
            true
        } else {
            false
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Resolves `field` (matched against either name) to a human
    /// description, optionally for a specific numeric `value`.
    pub fn describe(&self, field: &str, value: Option<i64>) -> Option<String> {
        if field != self.short_name && field != self.full_name {
            return None;
        }
        match value {
            Some(v) => self.value_table_meaning(v).map(|s| s.to_string()),
            None => Some(self.full_name.clone()),
        }
    }
}

fn push_field(out: &mut String, format: OutputFormat, path: &str, short_name: &str, value: &str) {
    use OutputFormat::*;
    match format {
        Text => out.push_str(&format!("\n\t{short_name}: {value}")),
        Eout => out.push_str(&format!("\n{path}.{short_name} {value}")),
        JsonCompact => out.push_str(&format!("\"{short_name}\":\"{value}\"")),
        JsonHuman => out.push_str(&format!("\n\t\t\"{short_name}\":\"{value}\"")),
        JsonExtensive => out.push_str(&format!(
            "\n\t\t\"{short_name}\":{{\"val\":\"{value}\",\"name\":\"{short_name}\"}}"
        )),
        XmlCompact => out.push_str(&format!("<{short_name}>{value}</{short_name}>")),
        XmlHuman => out.push_str(&format!("\n<{short_name}>{value}</{short_name}>")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(from: usize, to: usize, encoding: Encoding) -> BitsDescriptor {
        BitsDescriptor::new("SAC", "System Area Code", from, to, encoding)
    }

    #[test]
    fn empty_short_name_defaults_to_full() {
        let d = BitsDescriptor::new("", "System Area Code", 1, 8, Encoding::Unsigned);
        assert_eq!(d.short_name, "System Area Code");
    }

    #[test]
    fn empty_full_name_defaults_to_short() {
        let d = BitsDescriptor::new("SAC", "", 1, 8, Encoding::Unsigned);
        assert_eq!(d.full_name, "SAC");
    }

    #[test]
    fn render_unsigned_json_compact() {
        let d = descriptor(9, 16, Encoding::Unsigned);
        let data = [0x0Au8, 0x14];
        let mut out = String::new();
        assert!(d.render(&mut out, OutputFormat::JsonCompact, &data, false, "048"));
        assert_eq!(out, "\"SAC\":\"10\"");
    }

    #[test]
    fn render_applies_scale_and_unit() {
        let mut d = descriptor(1, 16, Encoding::Unsigned);
        d.scale = 0.25;
        d.unit = "NM".into();
        let data = [0x00u8, 0x04]; // raw = 4 -> scaled = 1.0
        let mut out = String::new();
        d.render(&mut out, OutputFormat::JsonCompact, &data, false, "048");
        assert!(out.contains("1 NM"));
    }

    #[test]
    fn render_const_mismatch_warns() {
        let mut d = descriptor(1, 8, Encoding::Unsigned);
        d.const_value = Some(0xAA);
        let data = [0x01u8];
        let mut out = String::new();
        d.render(&mut out, OutputFormat::JsonCompact, &data, false, "048");
        assert!(out.contains("Warning"));
    }

    #[test]
    fn render_value_table_meaning() {
        let mut d = descriptor(1, 2, Encoding::Unsigned);
        d.value_table.push(ValueEntry { value: 0, description: "No detection".into() });
        d.value_table.push(ValueEntry { value: 1, description: "Single".into() });
        let data = [0b01000000u8];
        let mut out = String::new();
        d.render(&mut out, OutputFormat::JsonCompact, &data, false, "048");
        assert!(out.contains("Single"));
    }

    #[test]
    fn render_out_of_range_yields_error_marker() {
        let d = descriptor(1, 32, Encoding::Unsigned);
        let data = [0x00u8];
        let mut out = String::new();
        d.render(&mut out, OutputFormat::JsonCompact, &data, false, "048");
        assert_eq!(out, "\"SAC\":\"???\"");
    }

    #[test]
    fn filter_suppresses_unselected_fields() {
        let d = descriptor(1, 8, Encoding::Unsigned);
        let data = [0xAAu8];
        let mut out = String::new();
        assert!(!d.render(&mut out, OutputFormat::JsonCompact, &data, true, "048"));
        assert!(out.is_empty());
    }

    #[test]
    fn filter_allows_selected_fields() {
        let mut d = descriptor(1, 8, Encoding::Unsigned);
        d.filtered = true;
        let data = [0xAAu8];
        let mut out = String::new();
        assert!(d.render(&mut out, OutputFormat::JsonCompact, &data, true, "048"));
        assert!(!out.is_empty());
    }

    #[test]
    fn apply_filter_matches_prefix() {
        let mut d = descriptor(1, 8, Encoding::Unsigned);
        assert!(d.apply_filter("SA"));
        assert!(d.is_filtered());
    }

    #[test]
    fn apply_filter_rejects_too_long_prefix() {
        let mut d = descriptor(1, 8, Encoding::Unsigned);
        assert!(!d.apply_filter("SACSIC"));
        assert!(!d.is_filtered());
    }

    #[test]
    fn apply_filter_is_idempotent() {
        let mut d = descriptor(1, 8, Encoding::Unsigned);
        assert!(d.apply_filter("SAC"));
        assert!(d.apply_filter("SAC"));
        assert!(d.is_filtered());
    }

    #[test]
    fn describe_resolves_by_either_name() {
        let d = descriptor(1, 8, Encoding::Unsigned);
        assert_eq!(d.describe("SAC", None), Some("System Area Code".into()));
        assert_eq!(d.describe("System Area Code", None), Some("System Area Code".into()));
        assert_eq!(d.describe("other", None), None);
    }

    #[test]
    fn describe_resolves_enumerated_value() {
        let mut d = descriptor(1, 2, Encoding::Unsigned);
        d.value_table.push(ValueEntry { value: 3, description: "Both".into() });
        assert_eq!(d.describe("SAC", Some(3)), Some("Both".into()));
        assert_eq!(d.describe("SAC", Some(1)), None);
    }
}
