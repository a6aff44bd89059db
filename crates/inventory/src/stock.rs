use serde::{Deserialize, Serialize};

use stockcast_core::{Sku, WarehouseCode, coerce_quantity};

/// One row of the stock snapshot (`Stock` table).
///
/// A SKU may have several rows per warehouse (lots, bins); they are summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(rename = "CodigoArticulo")]
    pub sku: Sku,
    #[serde(rename = "CodigoBodega")]
    pub warehouse_code: WarehouseCode,
    /// Raw cell; coerced when summed.
    #[serde(rename = "DisponibleParaPrometer", default)]
    pub available_quantity: String,
    #[serde(rename = "NombreArticulo", default)]
    pub item_name: Option<String>,
}

impl StockRecord {
    pub fn new(
        sku: impl Into<Sku>,
        warehouse_code: impl Into<WarehouseCode>,
        available_quantity: impl Into<String>,
    ) -> Self {
        Self {
            sku: sku.into(),
            warehouse_code: warehouse_code.into(),
            available_quantity: available_quantity.into(),
            item_name: None,
        }
    }

    pub fn with_item_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self
    }

    pub fn matches(&self, sku: &Sku, warehouse_code: &WarehouseCode) -> bool {
        &self.sku == sku && &self.warehouse_code == warehouse_code
    }
}

/// Initial on-hand stock for `sku` at `warehouse_code`.
///
/// Unreadable quantities are skipped; no matching rows means zero stock.
pub fn initial_stock(records: &[StockRecord], sku: &Sku, warehouse_code: &WarehouseCode) -> f64 {
    records
        .iter()
        .filter(|r| r.matches(sku, warehouse_code))
        .filter_map(|r| coerce_quantity(&r.available_quantity))
        .sum()
}
