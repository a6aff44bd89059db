//! SKU alias table: superseded codes mapped to their canonical replacement.
//!
//! Aliases are resolved in a single lookup. A code that is both an alias and
//! the target of another alias is not followed further.

use std::collections::HashMap;

use stockcast_core::Sku;
use stockcast_inventory::ConsumptionRecord;

/// Production alias list (superseded inverter, panel and battery codes).
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    // 1P 5kW hybrid inverters
    ("EXI-008656", "EXI-009231"),
    ("EXI-008391", "EXI-009231"),
    ("EXI-009287", "EXI-009231"),
    // black panels
    ("EXI-008842", "EXI-008805"),
    ("EXI-008844", "EXI-008805"),
    ("EXI-008805", "EXI-009545"),
    // 650 W bifacial panel
    ("EXI-009168", "EXI-009392"),
    ("EXI-009275", "EXI-009392"),
    ("EXI-008870", "EXI-009392"),
    ("EXI-009158", "EXI-009392"),
    ("EXI-009477", "EXI-009392"),
    ("EXI-008853", "EXI-009392"),
    // black 595 W panels
    ("EXI-008854", "EXI-009216"),
    // on-grid 1P 5kW inverter
    ("EXI-007037", "EXI-008660"),
    // 5 kWh battery
    ("EXI-009496", "EXI-006594"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkuAliasTable {
    aliases: HashMap<Sku, Sku>,
}

impl SkuAliasTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The alias list used in production exports.
    pub fn production() -> Self {
        Self::from_pairs(DEFAULT_ALIASES.iter().copied())
    }

    pub fn from_pairs<I, A, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<Sku>,
        C: Into<Sku>,
    {
        Self {
            aliases: pairs
                .into_iter()
                .map(|(alias, canonical)| (alias.into(), canonical.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Canonical code for `sku` (itself when it is not an alias).
    pub fn canonical<'a>(&'a self, sku: &'a Sku) -> &'a Sku {
        self.aliases.get(sku).unwrap_or(sku)
    }

    /// Rewrite consumption SKUs in place. Returns how many rows changed.
    pub fn apply_to_consumption(&self, records: &mut [ConsumptionRecord]) -> usize {
        let mut rewritten = 0;
        for record in records.iter_mut() {
            if let Some(canonical) = self.aliases.get(&record.sku) {
                record.sku = canonical.clone();
                rewritten += 1;
            }
        }
        rewritten
    }
}
