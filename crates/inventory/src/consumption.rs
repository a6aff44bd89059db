use serde::{Deserialize, Serialize};

use stockcast_core::{Sku, WarehouseCode};

/// One transfer request from the consumption log (`ST_OWTR` table).
///
/// Date and quantity stay raw; the demand estimator coerces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    #[serde(rename = "CodigoArticulo")]
    pub sku: Sku,
    #[serde(rename = "BodegaDestino_Requerida")]
    pub destination_warehouse: WarehouseCode,
    #[serde(rename = "FechaSolicitud", default)]
    pub request_date: String,
    #[serde(rename = "CantidadSolicitada", default)]
    pub quantity: String,
}

impl ConsumptionRecord {
    pub fn new(
        sku: impl Into<Sku>,
        destination_warehouse: impl Into<WarehouseCode>,
        request_date: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            sku: sku.into(),
            destination_warehouse: destination_warehouse.into(),
            request_date: request_date.into(),
            quantity: quantity.into(),
        }
    }
}

/// Records consumed by `sku` into `consumption_warehouse`.
pub fn consumption_for<'a>(
    records: &'a [ConsumptionRecord],
    sku: &'a Sku,
    consumption_warehouse: &'a WarehouseCode,
) -> impl Iterator<Item = &'a ConsumptionRecord> + 'a {
    records
        .iter()
        .filter(move |r| &r.sku == sku && &r.destination_warehouse == consumption_warehouse)
}
