//! User Application Profile: the ordered FRN-to-item mapping a category
//! selects among, gated by an optional guard condition on record content
//! beyond the FSPEC.

/// A guard deciding whether a [`Uap`] applies to a given record.
#[derive(Debug, Clone)]
pub enum Guard {
    /// Matches unconditionally; used by a category's default/fallback UAP.
    Always,
    /// Matches iff `(record_bytes[byte_index] & bit_mask) == expected_value`.
    BitTest {
        byte_index: usize,
        bit_mask: u8,
        expected_value: u8,
    },
}

impl Guard {
    pub fn matches(&self, record_bytes: &[u8]) -> bool {
        match *self {
            Guard::Always => true,
            Guard::BitTest {
                byte_index,
                bit_mask,
                expected_value,
            } => record_bytes
                .get(byte_index)
                .map(|&b| (b & bit_mask) == expected_value)
                .unwrap_or(false),
        }
    }
}

/// One FRN slot in a [`Uap`]: the item id it resolves to, or `"-"` for a
/// spare (unallocated) slot.
#[derive(Debug, Clone)]
pub struct UapItem {
    pub frn: u32,
    pub item_id: String,
}

impl UapItem {
    pub fn is_spare(&self) -> bool {
        self.item_id == "-"
    }
}

/// An ordered FRN table plus the [`Guard`] selecting it.
#[derive(Debug, Clone)]
pub struct Uap {
    pub name: String,
    pub guard: Guard,
    pub items: Vec<UapItem>,
}

impl Uap {
    pub fn new(name: impl Into<String>, guard: Guard) -> Self {
        Self {
            name: name.into(),
            guard,
            items: Vec::new(),
        }
    }

    /// Resolves `frn` to its declared item id, if any slot declares it.
    pub fn item_id_for(&self, frn: u32) -> Option<&str> {
        self.items.iter().find(|i| i.frn == frn).map(|i| i.item_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_guard_matches_empty_record() {
        assert!(Guard::Always.matches(&[]));
    }

    #[test]
    fn bit_test_guard_checks_masked_byte() {
        let g = Guard::BitTest {
            byte_index: 0,
            bit_mask: 0x80,
            expected_value: 0x80,
        };
        assert!(g.matches(&[0x80]));
        assert!(!g.matches(&[0x00]));
    }

    #[test]
    fn bit_test_guard_out_of_range_is_no_match() {
        let g = Guard::BitTest {
            byte_index: 5,
            bit_mask: 0x01,
            expected_value: 0x01,
        };
        assert!(!g.matches(&[0x00]));
    }

    #[test]
    fn spare_slot_is_identified() {
        let item = UapItem {
            frn: 3,
            item_id: "-".into(),
        };
        assert!(item.is_spare());
    }

    #[test]
    fn uap_resolves_frn_to_item_id() {
        let mut uap = Uap::new("default", Guard::Always);
        uap.items.push(UapItem {
            frn: 1,
            item_id: "I048/010".into(),
        });
        assert_eq!(uap.item_id_for(1), Some("I048/010"));
        assert_eq!(uap.item_id_for(2), None);
    }
}
