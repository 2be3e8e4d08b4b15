//! Item descriptions: the named, catalogued wrapper around a
//! [`FormatNode`] tree that a UAP's FRN slots point to.

use crate::emit::OutputFormat;
use crate::format::FormatNode;

/// Whether a catalogued item is expected to appear in every record of its
/// category, may or may not appear, or its presence rule isn't known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rule {
    #[default]
    Unknown,
    Optional,
    Mandatory,
}

/// A single catalogued item definition (e.g. "I048/010", "SAC/SIC").
#[derive(Debug, Clone)]
pub struct ItemDescription {
    /// Three hex digits, or `"RE"`/`"SP"` for the reserved/special items.
    pub id: String,
    /// Hex parse of `id`; `None` for the non-numeric `"RE"`/`"SP"` ids.
    pub id_numeric: Option<u16>,
    pub name: String,
    pub definition: String,
    pub note: String,
    pub rule: Rule,
    pub format: FormatNode,
}

impl ItemDescription {
    pub fn new(id: impl Into<String>, name: impl Into<String>, format: FormatNode) -> Self {
        let id = id.into();
        let id_numeric = u16::from_str_radix(&id, 16).ok();
        Self {
            id,
            id_numeric,
            name: name.into(),
            definition: String::new(),
            note: String::new(),
            rule: Rule::Unknown,
            format,
        }
    }

    pub fn length(&self, data: &[u8]) -> Option<usize> {
        self.format.length(data)
    }

    /// Forwards directly to the owned [`FormatNode`]; an item description
    /// carries no rendering behaviour of its own.
    pub fn render(&self, out: &mut String, format: OutputFormat, data: &[u8], filter_active: bool, path: &str) -> bool {
        self.format.render(out, format, data, filter_active, path)
    }

    pub fn print_descriptors(&self, header_prefix: &str) -> String {
        format!("{header_prefix}{} ({})\n{}", self.id, self.name, self.format.print_descriptors(&format!("{header_prefix}\t")))
    }

    pub fn apply_filter(&mut self, name: &str) -> bool {
        self.format.apply_filter(name)
    }

    pub fn is_filtered(&self, name: &str) -> bool {
        self.format.is_filtered(name)
    }

    pub fn describe(&self, field: &str, value: Option<i64>) -> Option<String> {
        self.format.describe(field, value)
    }

    pub fn deep_clone(&self) -> Self {
        self.clone()
    }
}
