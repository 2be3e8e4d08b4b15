//! A category: its catalogue of [`ItemDescription`]s plus the ordered list
//! of [`Uap`]s a record's guard selects among.

use std::collections::HashMap;

use crate::item::ItemDescription;
use crate::uap::{Guard, Uap};

#[derive(Debug, Clone)]
pub struct Category {
    pub number: u16,
    pub items: HashMap<String, ItemDescription>,
    /// Tried in order; the first whose guard matches wins.
    pub uaps: Vec<Uap>,
}

impl Category {
    pub fn new(number: u16) -> Self {
        Self {
            number,
            items: HashMap::new(),
            uaps: Vec::new(),
        }
    }

    pub fn description_for(&self, id: &str) -> Option<&ItemDescription> {
        self.items.get(id)
    }

    /// Returns the first UAP whose guard matches `record_bytes` (the
    /// record's bytes following the FSPEC; some guards read past it).
    pub fn select_uap(&self, record_bytes: &[u8]) -> Option<&Uap> {
        self.uaps.iter().find(|u| u.guard.matches(record_bytes))
    }

    /// Used only by the schema loader while assembling a category.
    pub fn new_uap(&mut self, name: impl Into<String>, guard: Guard) -> &mut Uap {
        self.uaps.push(Uap::new(name, guard));
        self.uaps.last_mut().unwrap()
    }

    pub fn new_item_description(&mut self, item: ItemDescription) {
        self.items.insert(item.id.clone(), item);
    }
}
