//! Output-format selection and the per-record/per-block header and
//! footer shapes shared by every [`crate::format::FormatNode`] and
//! [`crate::descriptor::BitsDescriptor`] when they render.

/// The seven output shapes a decoded record can be re-emitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per field, `\n\t<name>: <value>`.
    Text,
    /// Legacy one-line-per-field form, `\n<category>.<short> <value>`.
    Eout,
    /// `{"<short>":<value>}`, no extra whitespace.
    JsonCompact,
    /// As `JsonCompact`, with `\n\t\t` indentation between fields.
    JsonHuman,
    /// As `JsonHuman`, each field expanded to `{"val":...,"name":...}`.
    JsonExtensive,
    /// `<short>value</short>`, no extra whitespace.
    XmlCompact,
    /// As `XmlCompact`, with newlines and four-space indentation per level.
    XmlHuman,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, Self::JsonCompact | Self::JsonHuman | Self::JsonExtensive)
    }

    pub fn is_xml(self) -> bool {
        matches!(self, Self::XmlCompact | Self::XmlHuman)
    }

    pub fn is_human(self) -> bool {
        matches!(self, Self::JsonHuman | Self::JsonExtensive | Self::XmlHuman)
    }
}

/// Record-level header fragment, written before the record's items.
pub struct RecordHeader<'a> {
    pub sequence_number: u32,
    pub category: u16,
    pub length: usize,
    pub crc: u32,
    pub hex_dump: &'a str,
    pub timestamp: f64,
}

impl RecordHeader<'_> {
    pub fn render(&self, format: OutputFormat) -> String {
        use OutputFormat::*;
        match format {
            Text => format!(
                "\nData Record {n}\nLen: {len}\nCRC: {crc:08X}\nHexData: {hex}\nTimestamp: {ts}",
                n = self.sequence_number,
                len = self.length,
                crc = self.crc,
                hex = self.hex_dump,
                ts = self.timestamp
            ),
            Eout => String::new(),
            JsonCompact | JsonHuman | JsonExtensive => format!(
                "{{\"id\":{n},\"cat\":{cat},\"length\":{len},\"timestamp\":{ts},\"CAT{cat:03}\":{{",
                n = self.sequence_number,
                cat = self.category,
                len = self.length,
                ts = self.timestamp
            ),
            XmlCompact => format!(
                "<ASTERIX cat=\"{cat}\" length=\"{len}\" crc=\"{crc:08X}\" timestamp=\"{ts}\">",
                cat = self.category,
                len = self.length,
                crc = self.crc,
                ts = self.timestamp
            ),
            XmlHuman => format!(
                "\n<ASTERIX cat=\"{cat}\" length=\"{len}\" crc=\"{crc:08X}\" timestamp=\"{ts}\">",
                cat = self.category,
                len = self.length,
                crc = self.crc,
                ts = self.timestamp
            ),
        }
    }

    pub fn render_error(&self, format: OutputFormat) -> String {
        use OutputFormat::*;
        match format {
            JsonCompact | JsonHuman | JsonExtensive => {
                format!("{{\"error\":\"malformed record {n}\"}}", n = self.sequence_number)
            }
            XmlCompact | XmlHuman => format!("<error>malformed record {n}</error>", n = self.sequence_number),
            _ => format!("\n; malformed record {n}", n = self.sequence_number),
        }
    }
}

/// Block-level error marker, written in place of a block's records when
/// the category byte has no matching catalogue entry.
pub fn block_error(format: OutputFormat, category: u16) -> String {
    use OutputFormat::*;
    match format {
        JsonCompact | JsonHuman | JsonExtensive => {
            format!("{{\"error\":\"malformed block, category {category}\"}}")
        }
        XmlCompact | XmlHuman => format!("<error>malformed block, category {category}</error>"),
        _ => format!("\n; malformed block, category {category}"),
    }
}

/// Separator written between two consecutive items (or records).
pub fn item_separator(format: OutputFormat) -> &'static str {
    use OutputFormat::*;
    match format {
        Text | Eout | XmlCompact => "",
        JsonCompact => ",",
        JsonHuman | JsonExtensive => ",\n",
        XmlHuman => "\n",
    }
}

/// Record-level footer fragment, written after the record's items.
///
/// The JSON header opens two braces -- the outer record object and the
/// nested `"CATnnn":{` -- so the footer closes both.
pub fn record_footer(format: OutputFormat) -> &'static str {
    use OutputFormat::*;
    match format {
        JsonCompact | JsonHuman | JsonExtensive => "}}",
        XmlCompact | XmlHuman => "</ASTERIX>",
        Text | Eout => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_header_has_category_block() {
        let h = RecordHeader {
            sequence_number: 1,
            category: 48,
            length: 6,
            crc: 0,
            hex_dump: "300006",
            timestamp: 0.0,
        };
        let rendered = h.render(OutputFormat::JsonCompact);
        assert!(rendered.contains("\"CAT048\":{"));
    }

    #[test]
    fn xml_header_contains_cat_attribute() {
        let h = RecordHeader {
            sequence_number: 1,
            category: 48,
            length: 6,
            crc: 0xDEADBEEF,
            hex_dump: "300006",
            timestamp: 0.0,
        };
        let rendered = h.render(OutputFormat::XmlCompact);
        assert!(rendered.starts_with("<ASTERIX cat=\"48\""));
    }

    #[test]
    fn json_formats_identified() {
        assert!(OutputFormat::JsonExtensive.is_json());
        assert!(!OutputFormat::XmlCompact.is_json());
    }

    #[test]
    fn block_error_names_the_category() {
        let rendered = block_error(OutputFormat::JsonCompact, 48);
        assert!(rendered.contains("48"));
        assert!(rendered.contains("error"));
    }
}
