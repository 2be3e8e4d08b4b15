//! Filter configuration: `CATnnn/itemID[:FIELD]` strings, parsed once at
//! configuration time and applied to a freshly loaded [`Catalogue`] by
//! walking every category, item and format node and calling
//! `apply_filter`. This replaces the legacy sentinel `gFiltering` global
//! with ordinary configuration state owned by the caller.

use crate::catalogue::Catalogue;

/// One parsed `CATnnn/itemID[:FIELD]` entry.
#[derive(Debug, Clone)]
pub struct FilterEntry {
    pub category: u16,
    pub item_id: String,
    /// `FIELD` when present; applied as the leaf-level filter name inside
    /// the item's format tree (e.g. a BDS-qualified `BDS20:CALLSIGN`).
    pub field: Option<String>,
}

impl FilterEntry {
    pub fn parse(spec: &str) -> Option<Self> {
        let (cat_part, rest) = spec.split_once('/')?;
        let category = cat_part.strip_prefix("CAT")?.parse().ok()?;
        let (item_id, field) = match rest.split_once(':') {
            Some((id, field)) => (id.to_string(), Some(field.to_string())),
            None => (rest.to_string(), None),
        };
        Some(Self { category, item_id, field })
    }
}

/// The parsed, immutable set of filter entries built from a
/// `filter_spec` configuration list.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    entries: Vec<FilterEntry>,
}

impl FilterSpec {
    pub fn parse(filter_spec: &[String]) -> Self {
        Self {
            entries: filter_spec.iter().filter_map(|s| FilterEntry::parse(s)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry names `category` -- used by [`crate::block::DataBlock`]
    /// to decide if a present category should still be decoded while the
    /// global filter is active.
    pub fn includes_category(&self, category: u16) -> bool {
        self.entries.iter().any(|e| e.category == category)
    }

    /// Walks `catalogue`'s categories/items/format-trees, marking the
    /// descriptors named by each entry. Mutates in place since this runs
    /// once, right after load, before the catalogue is shared read-only.
    pub fn apply(&self, catalogue: &mut Catalogue) {
        for entry in &self.entries {
            let Some(category) = catalogue_category_mut(catalogue, entry.category) else {
                continue;
            };
            let Some(item) = category.items.get_mut(&entry.item_id) else {
                continue;
            };
            let name = entry.field.as_deref().unwrap_or(entry.item_id.as_str());
            item.apply_filter(name);
        }
    }
}

fn catalogue_category_mut(catalogue: &mut Catalogue, number: u16) -> Option<&mut crate::category::Category> {
    catalogue.category_mut(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_item_and_field() {
        let e = FilterEntry::parse("CAT048/I048/010:SAC").unwrap();
        assert_eq!(e.category, 48);
        assert_eq!(e.item_id, "I048/010");
        assert_eq!(e.field.as_deref(), Some("SAC"));
    }

    #[test]
    fn parses_without_field() {
        let e = FilterEntry::parse("CAT048/I048/010").unwrap();
        assert_eq!(e.field, None);
    }

    #[test]
    fn rejects_malformed_spec() {
        assert!(FilterEntry::parse("not-a-filter").is_none());
    }

    #[test]
    fn empty_spec_list_yields_empty_filter() {
        let spec = FilterSpec::parse(&[]);
        assert!(spec.is_empty());
    }

    #[test]
    fn includes_category_checks_entry_membership() {
        let spec = FilterSpec::parse(&["CAT048/I048/010".to_string()]);
        assert!(spec.includes_category(48));
        assert!(!spec.includes_category(34));
    }
}
