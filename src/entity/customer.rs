use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    entity::{lookup, to_map, MergeFields, NewEntity},
    error::Result,
    gateway::Resource,
};

pub const DEFAULT_COUNTRY: &str = "US";

/// Flat customer record as a caller supplies it.
///
/// Every field is optional so the same type serves as create input and as
/// update overrides.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CustomerFields {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CustomerRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_name: Option<String>,
    bill_addr: BillAddr,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_phone: Option<PrimaryPhone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_email_addr: Option<PrimaryEmailAddr>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct BillAddr {
    #[serde(skip_serializing_if = "Option::is_none")]
    line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_sub_division_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PrimaryPhone {
    free_form_number: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PrimaryEmailAddr {
    address: String,
}

impl CustomerFields {
    pub fn new(name: impl Into<String>) -> Self {
        CustomerFields {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn record(&self, current: &Map<String, Value>) -> CustomerRecord {
        let pick =
            |own: &Option<String>, path: &[&str]| own.clone().or_else(|| lookup(current, path));
        CustomerRecord {
            name: pick(&self.name, &["Name"]),
            company_name: pick(&self.company, &["CompanyName"]),
            bill_addr: BillAddr {
                line1: pick(&self.address, &["BillAddr", "Line1"]),
                city: pick(&self.city, &["BillAddr", "City"]),
                country: pick(&self.country, &["BillAddr", "Country"])
                    .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
                country_sub_division_code: pick(
                    &self.state,
                    &["BillAddr", "CountrySubDivisionCode"],
                ),
                postal_code: pick(&self.zip, &["BillAddr", "PostalCode"]),
            },
            primary_phone: pick(&self.phone, &["PrimaryPhone", "FreeFormNumber"])
                .map(|free_form_number| PrimaryPhone { free_form_number }),
            primary_email_addr: pick(&self.email, &["PrimaryEmailAddr", "Address"])
                .map(|address| PrimaryEmailAddr { address }),
        }
    }
}

impl NewEntity for CustomerFields {
    const RESOURCE: Resource = Resource::CUSTOMER;

    fn to_record(&self) -> Result<Map<String, Value>> {
        to_map(&self.record(&Map::new()))
    }
}

impl MergeFields for CustomerFields {
    fn merge(&self, current: &Map<String, Value>) -> Result<Map<String, Value>> {
        to_map(&self.record(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fetched() -> Map<String, Value> {
        json!({
            "Id": "42",
            "SyncToken": "3",
            "Name": "John Doe",
            "CompanyName": "Acme Corp",
            "BillAddr": {
                "Id": "7",
                "Line1": "123 Main St",
                "City": "Charlotte",
                "Country": "CA",
                "CountrySubDivisionCode": "NC",
                "PostalCode": "28202"
            },
            "PrimaryPhone": {"FreeFormNumber": "555-1234"},
            "PrimaryEmailAddr": {"Address": "john@acme.com"},
            "Balance": 0
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn create_maps_fields_and_defaults_country() {
        let fields = CustomerFields {
            email: Some("john@acme.com".into()),
            ..CustomerFields::new("John Doe")
        };
        let record = Value::Object(fields.to_record().unwrap());
        assert_eq!(record["Name"], "John Doe");
        assert_eq!(record["PrimaryEmailAddr"]["Address"], "john@acme.com");
        assert_eq!(record["BillAddr"]["Country"], "US");
        assert!(record.get("PrimaryPhone").is_none());
        assert!(record.get("CompanyName").is_none());
        assert!(record["BillAddr"].get("City").is_none());
    }

    #[test]
    fn create_from_snake_case_input() {
        let fields: CustomerFields = serde_json::from_value(json!({
            "name": "John Doe",
            "company": "Acme Corp",
            "email": "john@acme.com",
            "phone": "555-1234",
            "address": "123 Main St",
            "city": "Charlotte",
            "state": "NC",
            "zip": "28202"
        }))
        .unwrap();
        let record = Value::Object(fields.to_record().unwrap());
        assert_eq!(
            record,
            json!({
                "Name": "John Doe",
                "CompanyName": "Acme Corp",
                "BillAddr": {
                    "Line1": "123 Main St",
                    "City": "Charlotte",
                    "Country": "US",
                    "CountrySubDivisionCode": "NC",
                    "PostalCode": "28202"
                },
                "PrimaryPhone": {"FreeFormNumber": "555-1234"},
                "PrimaryEmailAddr": {"Address": "john@acme.com"}
            })
        );
    }

    #[test]
    fn merge_replaces_only_supplied_fields() {
        let overrides = CustomerFields {
            phone: Some("555-5678".into()),
            ..Default::default()
        };
        let merged = Value::Object(overrides.merge(&fetched()).unwrap());
        assert_eq!(merged["Name"], "John Doe");
        assert_eq!(merged["CompanyName"], "Acme Corp");
        assert_eq!(merged["PrimaryPhone"]["FreeFormNumber"], "555-5678");
        assert_eq!(merged["PrimaryEmailAddr"]["Address"], "john@acme.com");
        assert_eq!(merged["BillAddr"]["Country"], "CA");
        assert_eq!(merged["BillAddr"]["City"], "Charlotte");
        // identity and version are the gateway's business
        assert!(merged.get("Id").is_none());
        assert!(merged.get("SyncToken").is_none());
    }

    #[test]
    fn merge_against_sparse_entity_defaults_country() {
        let current = json!({"Id": "1", "SyncToken": "0", "Name": "Bare"})
            .as_object()
            .unwrap()
            .clone();
        let merged = Value::Object(CustomerFields::default().merge(&current).unwrap());
        assert_eq!(merged, json!({"Name": "Bare", "BillAddr": {"Country": "US"}}));
    }
}
