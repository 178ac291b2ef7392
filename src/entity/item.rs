use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    entity::{to_map, NewEntity, Reference},
    error::Result,
    gateway::Resource,
};

pub const DEFAULT_ITEM_TYPE: &str = "Inventory";
pub const DEFAULT_INCOME_ACCOUNT: &str = "1";
pub const DEFAULT_EXPENSE_ACCOUNT: &str = "2";
pub const DEFAULT_ASSET_ACCOUNT: &str = "3";

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub price: Option<f64>,
    pub income_account_id: Option<String>,
    pub expense_account_id: Option<String>,
    pub asset_account_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ItemRecord<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "Type")]
    item_type: &'a str,
    unit_price: f64,
    income_account_ref: Reference,
    expense_account_ref: Reference,
    asset_account_ref: Reference,
}

impl NewItem {
    pub fn new(name: impl Into<String>) -> Self {
        NewItem {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl NewEntity for NewItem {
    const RESOURCE: Resource = Resource::ITEM;

    fn to_record(&self) -> Result<Map<String, Value>> {
        let account = |id: &Option<String>, default: &str| {
            Reference::new(id.as_deref().unwrap_or(default))
        };
        to_map(&ItemRecord {
            name: &self.name,
            description: self.description.as_deref(),
            item_type: self.item_type.as_deref().unwrap_or(DEFAULT_ITEM_TYPE),
            unit_price: self.price.unwrap_or(0.0),
            income_account_ref: account(&self.income_account_id, DEFAULT_INCOME_ACCOUNT),
            expense_account_ref: account(&self.expense_account_id, DEFAULT_EXPENSE_ACCOUNT),
            asset_account_ref: account(&self.asset_account_id, DEFAULT_ASSET_ACCOUNT),
        })
    }
}
