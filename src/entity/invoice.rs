use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    entity::{to_map, NewEntity, Reference},
    error::Result,
    gateway::Resource,
};

pub const SALES_ITEM_LINE_DETAIL: &str = "SalesItemLineDetail";

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub line_items: Vec<LineItem>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct LineItem {
    pub item_id: String,
    pub amount: f64,
    /// Defaults to 1.
    pub quantity: Option<f64>,
    /// Defaults to `amount`.
    pub unit_price: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InvoiceRecord {
    customer_ref: Reference,
    line: Vec<LineRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LineRecord {
    id: String,
    line_num: usize,
    amount: f64,
    detail_type: &'static str,
    sales_item_line_detail: SalesItemLineDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SalesItemLineDetail {
    item_ref: Reference,
    qty: f64,
    unit_price: f64,
}

impl NewEntity for NewInvoice {
    const RESOURCE: Resource = Resource::INVOICE;

    fn to_record(&self) -> Result<Map<String, Value>> {
        let line = self
            .line_items
            .iter()
            .enumerate()
            .map(|(index, item)| LineRecord {
                id: (index + 1).to_string(),
                line_num: index + 1,
                amount: item.amount,
                detail_type: SALES_ITEM_LINE_DETAIL,
                sales_item_line_detail: SalesItemLineDetail {
                    item_ref: Reference::new(item.item_id.as_str()),
                    qty: item.quantity.unwrap_or(1.0),
                    unit_price: item.unit_price.unwrap_or(item.amount),
                },
            })
            .collect();
        to_map(&InvoiceRecord {
            customer_ref: Reference::new(self.customer_id.as_str()),
            line,
        })
    }
}
