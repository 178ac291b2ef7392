//! Create, fetch, query and read-modify-write over named resources.
//!
//! Mutations follow one protocol:
//!
//! ```text
//! Fetching -> Validating -> Building -> Submitting -> Done
//!     \___________\____________\____________\______-> Failed
//! ```
//!
//! The `SyncToken` sent with an update or soft delete is always the one
//! returned by the fetch made inside that same call. Conflicts are detected
//! by the server; a rejected token surfaces as [`Error::Conflict`].

use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::{
    builder::{OAuthSigner, RequestBuilder},
    entity::{MergeFields, NewEntity},
    envelope::ApiEnvelope,
    error::{Error, Result},
    http::Method,
    transport::{self, Transport},
};

pub const ID_KEY: &str = "Id";
pub const SYNC_TOKEN_KEY: &str = "SyncToken";
pub const ACTIVE_KEY: &str = "Active";
pub const QUERY_PATH: &str = "query";
pub const QUERY_PARAM: &str = "query";
pub const MINOR_VERSION_PARAM: &str = "minorversion";

/// A remote entity type: its JSON type key and its URL path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resource {
    type_name: &'static str,
    path: &'static str,
}

impl Resource {
    pub const CUSTOMER: Resource = Resource::new("Customer", "customer");
    pub const ITEM: Resource = Resource::new("Item", "item");
    pub const INVOICE: Resource = Resource::new("Invoice", "invoice");

    pub const fn new(type_name: &'static str, path: &'static str) -> Self {
        Resource { type_name, path }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn path(&self) -> &'static str {
        self.path
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MutationState {
    Fetching,
    Validating,
    Building,
    Submitting,
    Done,
    Failed,
}

/// Tracks one mutation through its states.
struct Mutation<'a> {
    resource: Resource,
    id: &'a str,
    state: MutationState,
}

impl<'a> Mutation<'a> {
    fn start(resource: Resource, id: &'a str) -> Self {
        debug!(
            entity = resource.type_name,
            id,
            state = ?MutationState::Fetching,
            "mutation started"
        );
        Mutation {
            resource,
            id,
            state: MutationState::Fetching,
        }
    }

    fn enter(&mut self, next: MutationState) {
        debug!(
            entity = self.resource.type_name,
            id = self.id,
            from = ?self.state,
            to = ?next,
            "mutation state"
        );
        self.state = next;
    }

    fn fail(&mut self, err: Error) -> Error {
        warn!(
            entity = self.resource.type_name,
            id = self.id,
            state = ?self.state,
            error = %err,
            "mutation failed"
        );
        self.state = MutationState::Failed;
        err
    }
}

/// Signs and sends entity operations for one company.
pub struct EntityGateway<S, T> {
    signer: S,
    transport: T,
    company_url: Url,
    minor_version: Option<u32>,
}

impl<S, T> EntityGateway<S, T>
where
    S: OAuthSigner,
    T: Transport,
{
    /// `company_url` is `{base}/v3/company/{realm}/`.
    pub fn new(signer: S, transport: T, company_url: Url) -> Self {
        EntityGateway {
            signer,
            transport,
            company_url,
            minor_version: None,
        }
    }

    pub fn minor_version(mut self, minor_version: Option<u32>) -> Self {
        self.minor_version = minor_version;
        self
    }

    pub fn company_url(&self) -> &Url {
        &self.company_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(RequestBuilder::new(method, &self.company_url)?.path(path))
    }

    fn dispatch(&self, builder: RequestBuilder) -> Result<ApiEnvelope> {
        let request = builder
            .query_opt(MINOR_VERSION_PARAM, self.minor_version)
            .sign(&self.signer)?;
        let (_, envelope) = transport::execute(&self.transport, &request)?;
        Ok(envelope)
    }

    /// POST `record` wrapped under the resource's type name to its collection.
    pub fn create(&self, resource: Resource, record: Map<String, Value>) -> Result<ApiEnvelope> {
        let mut body = Map::new();
        body.insert(resource.type_name.to_string(), Value::Object(record));
        self.dispatch(self.request(Method::Post, resource.path)?.json(Value::Object(body)))
    }

    pub fn create_new<E: NewEntity + ?Sized>(&self, entity: &E) -> Result<ApiEnvelope> {
        self.create(E::RESOURCE, entity.to_record()?)
    }

    pub fn fetch(&self, resource: Resource, id: &str) -> Result<ApiEnvelope> {
        self.dispatch(self.request(Method::Get, resource.path)?.path(id))
    }

    /// Runs a query-language statement, e.g. `SELECT * FROM Customer`.
    pub fn query(&self, statement: &str) -> Result<ApiEnvelope> {
        self.dispatch(
            self.request(Method::Get, QUERY_PATH)?
                .query(QUERY_PARAM, statement),
        )
    }

    pub fn query_all(&self, resource: Resource) -> Result<ApiEnvelope> {
        self.query(&format!("SELECT * FROM {}", resource.type_name))
    }

    /// Fetches the entity, merges `overrides` over it and posts the result
    /// with the fetched `SyncToken`.
    pub fn update<F: MergeFields + ?Sized>(
        &self,
        resource: Resource,
        id: &str,
        overrides: &F,
    ) -> Result<ApiEnvelope> {
        self.mutate(resource, id, |current| overrides.merge(current))
    }

    /// Marks the entity inactive. Sends only `Id`, `SyncToken` and `Active`.
    pub fn soft_delete(&self, resource: Resource, id: &str) -> Result<ApiEnvelope> {
        self.mutate(resource, id, |_| {
            let mut record = Map::new();
            record.insert(ACTIVE_KEY.to_string(), Value::Bool(false));
            Ok(record)
        })
    }

    fn mutate<B>(&self, resource: Resource, id: &str, build: B) -> Result<ApiEnvelope>
    where
        B: FnOnce(&Map<String, Value>) -> Result<Map<String, Value>>,
    {
        let mut mutation = Mutation::start(resource, id);

        let fetched = self
            .fetch(resource, id)
            .map_err(|e| mutation.fail(e))?;

        mutation.enter(MutationState::Validating);
        let current = match fetched.into_entity(resource.type_name) {
            Some(current) => current,
            None => {
                return Err(mutation.fail(Error::NotFound {
                    entity: resource.type_name,
                    id: id.to_string(),
                }))
            }
        };
        let sync_token = match current.get(SYNC_TOKEN_KEY) {
            Some(token) if is_version_token(token) => token.clone(),
            _ => {
                return Err(mutation.fail(Error::InvalidState {
                    entity: resource.type_name,
                    id: id.to_string(),
                    reason: "fetched entity carries no SyncToken".to_string(),
                }))
            }
        };

        mutation.enter(MutationState::Building);
        let mut record = build(&current).map_err(|e| mutation.fail(e))?;
        let entity_id = current
            .get(ID_KEY)
            .cloned()
            .unwrap_or_else(|| Value::String(id.to_string()));
        record.insert(ID_KEY.to_string(), entity_id);
        record.insert(SYNC_TOKEN_KEY.to_string(), sync_token);

        mutation.enter(MutationState::Submitting);
        let response = self
            .create(resource, record)
            .map_err(|e| mutation.fail(e))?;

        mutation.enter(MutationState::Done);
        Ok(response)
    }
}

fn is_version_token(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Number(_) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, SignedRequest};
    use serde_json::json;
    use std::{collections::VecDeque, sync::Mutex};

    /// Replays canned responses and keeps every request it was handed.
    #[derive(Default)]
    struct Replay {
        responses: Mutex<VecDeque<HttpResponse>>,
        requests: Mutex<Vec<SignedRequest>>,
    }

    impl Replay {
        fn with(responses: Vec<(u16, Value)>) -> Self {
            Replay {
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|(status, body)| HttpResponse::new(status, body.to_string()))
                        .collect(),
                ),
                requests: Mutex::default(),
            }
        }

        fn requests(&self) -> Vec<SignedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for Replay {
        fn send(&self, request: &SignedRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no canned response left"))
        }
    }

    struct StaticSigner;

    impl OAuthSigner for StaticSigner {
        fn authorization(&self, _: Method, _: &Url) -> Result<String> {
            Ok("OAuth oauth_signature=\"static\"".to_string())
        }
    }

    fn gateway(responses: Vec<(u16, Value)>) -> EntityGateway<StaticSigner, Replay> {
        EntityGateway::new(
            StaticSigner,
            Replay::with(responses),
            Url::parse("https://sandbox-quickbooks.api.intuit.com/v3/company/123/").unwrap(),
        )
    }

    #[test]
    fn fetch_targets_per_id_endpoint() {
        let gw = gateway(vec![(200, json!({"Item": {"Id": "5"}}))]);
        gw.fetch(Resource::ITEM, "5").unwrap();
        let requests = gw.transport().requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(
            requests[0].url.as_str(),
            "https://sandbox-quickbooks.api.intuit.com/v3/company/123/item/5"
        );
    }

    #[test]
    fn query_all_embeds_statement() {
        let gw = gateway(vec![(200, json!({"QueryResponse": {}}))]).minor_version(Some(65));
        gw.query_all(Resource::INVOICE).unwrap();
        assert_eq!(
            gw.transport().requests()[0].url.as_str(),
            "https://sandbox-quickbooks.api.intuit.com/v3/company/123/query?query=SELECT+*+FROM+Invoice&minorversion=65"
        );
    }

    #[test]
    fn soft_delete_sends_only_identity_and_flag() {
        let gw = gateway(vec![
            (200, json!({"Item": {"Id": "5", "SyncToken": "9", "Name": "Widget"}})),
            (200, json!({"Item": {"Id": "5", "SyncToken": "10", "Active": false}})),
        ]);
        gw.soft_delete(Resource::ITEM, "5").unwrap();
        let requests = gw.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(
            requests[1].url.as_str(),
            "https://sandbox-quickbooks.api.intuit.com/v3/company/123/item"
        );
        assert_eq!(
            requests[1].body,
            Some(json!({"Item": {"Id": "5", "SyncToken": "9", "Active": false}}))
        );
    }

    #[test]
    fn override_map_cannot_smuggle_a_token() {
        let gw = gateway(vec![
            (200, json!({"Item": {"Id": "5", "SyncToken": "9", "UnitPrice": 1}})),
            (200, json!({"Item": {"Id": "5", "SyncToken": "10"}})),
        ]);
        let mut overrides = Map::new();
        overrides.insert("SyncToken".into(), json!("0"));
        overrides.insert("Id".into(), json!("999"));
        overrides.insert("UnitPrice".into(), json!(2));
        gw.update(Resource::ITEM, "5", &overrides).unwrap();
        let body = gw.transport().requests()[1].body.clone().unwrap();
        assert_eq!(body["Item"]["SyncToken"], "9");
        assert_eq!(body["Item"]["Id"], "5");
        assert_eq!(body["Item"]["UnitPrice"], 2);
    }

    #[test]
    fn missing_token_is_invalid_state_without_write() {
        for entity in [
            json!({"Id": "5"}),
            json!({"Id": "5", "SyncToken": null}),
            json!({"Id": "5", "SyncToken": ""}),
        ] {
            let gw = gateway(vec![(200, json!({"Item": entity}))]);
            let err = gw.soft_delete(Resource::ITEM, "5").unwrap_err();
            assert!(
                matches!(err, Error::InvalidState { entity: "Item", .. }),
                "{:?}",
                err
            );
            assert_eq!(gw.transport().requests().len(), 1);
        }
    }

    #[test]
    fn numeric_token_is_carried_verbatim() {
        let gw = gateway(vec![
            (200, json!({"Item": {"Id": "5", "SyncToken": 4}})),
            (200, json!({"Item": {"Id": "5", "SyncToken": 5}})),
        ]);
        gw.soft_delete(Resource::ITEM, "5").unwrap();
        let body = gw.transport().requests()[1].body.clone().unwrap();
        assert_eq!(body["Item"]["SyncToken"], json!(4));
    }

    #[test]
    fn resource_descriptors() {
        assert_eq!(Resource::CUSTOMER.type_name(), "Customer");
        assert_eq!(Resource::CUSTOMER.path(), "customer");
        let vendor = Resource::new("Vendor", "vendor");
        assert_eq!(vendor.path(), "vendor");
    }
}
