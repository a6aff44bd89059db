use serde::{Deserialize, Serialize};

use stockcast_core::Sku;

/// One line of the purchase-order export (`OPOR` table).
///
/// Date and quantity stay raw; the arrival schedule builder coerces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    #[serde(rename = "Número de artículo")]
    pub sku: Sku,
    #[serde(rename = "Número de documento", default)]
    pub document_number: String,
    #[serde(rename = "Fecha de entrega de la línea", default)]
    pub delivery_date: String,
    #[serde(rename = "Cantidad", default)]
    pub quantity: String,
    #[serde(rename = "Comentarios", default)]
    pub comments: String,
    /// Posting date of the order; only the loader's history window reads it.
    #[serde(rename = "Fecha de contabilización", default)]
    pub posting_date: Option<String>,
}

impl PurchaseOrderLine {
    pub fn new(
        sku: impl Into<Sku>,
        document_number: impl Into<String>,
        delivery_date: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            sku: sku.into(),
            document_number: document_number.into(),
            delivery_date: delivery_date.into(),
            quantity: quantity.into(),
            comments: String::new(),
            posting_date: None,
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn with_posting_date(mut self, posting_date: impl Into<String>) -> Self {
        self.posting_date = Some(posting_date.into());
        self
    }
}
