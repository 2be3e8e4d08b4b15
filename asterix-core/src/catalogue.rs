//! The process-scoped map of category number to [`Category`], populated
//! once by the schema loader and immutable thereafter.

use std::collections::HashMap;

use crate::category::Category;
use crate::format::Bds;

/// Sentinel slot number holding the shared BDS register catalogue, kept
/// alongside the 1..255 category range rather than in a separate map so a
/// single immutable structure covers both lookups.
pub const BDS_SENTINEL: u16 = 256;

#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    categories: HashMap<u16, Category>,
    bds_registers: Option<Bds>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category) {
        self.categories.insert(category.number, category);
    }

    pub fn get(&self, number: u16) -> Option<&Category> {
        self.categories.get(&number)
    }

    pub fn category_mut(&mut self, number: u16) -> Option<&mut Category> {
        self.categories.get_mut(&number)
    }

    pub fn set_bds_registers(&mut self, bds: Bds) {
        self.bds_registers = Some(bds);
    }

    pub fn bds_registers(&self) -> Option<&Bds> {
        self.bds_registers.as_ref()
    }

    pub fn category_numbers(&self) -> impl Iterator<Item = u16> + '_ {
        self.categories.keys().copied()
    }
}
