use serde::{Deserialize, Serialize};

use stockcast_core::Sku;
use stockcast_inventory::{ConsumptionRecord, StockRecord};
use stockcast_purchasing::PurchaseOrderLine;

/// The three raw tables a projection reads.
///
/// Immutable once loaded; runs borrow it and never write back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputTables {
    pub stock: Vec<StockRecord>,
    pub consumption: Vec<ConsumptionRecord>,
    pub purchase_orders: Vec<PurchaseOrderLine>,
}

impl InputTables {
    pub fn new(
        stock: Vec<StockRecord>,
        consumption: Vec<ConsumptionRecord>,
        purchase_orders: Vec<PurchaseOrderLine>,
    ) -> Self {
        Self {
            stock,
            consumption,
            purchase_orders,
        }
    }

    /// Display name of `sku` from the stock table, if any row carries one.
    pub fn item_name(&self, sku: &Sku) -> Option<&str> {
        self.stock
            .iter()
            .filter(|r| &r.sku == sku)
            .find_map(|r| r.item_name.as_deref())
    }

    /// Every SKU present in the stock or consumption tables, sorted, deduplicated.
    pub fn known_skus(&self) -> Vec<Sku> {
        let mut skus: Vec<Sku> = self
            .stock
            .iter()
            .map(|r| r.sku.clone())
            .chain(self.consumption.iter().map(|r| r.sku.clone()))
            .collect();
        skus.sort();
        skus.dedup();
        skus
    }
}
