use serde_json::Value;

use crate::{
    builder::OAuthSigner,
    config::{ClientConfig, Credentials},
    entity::{CustomerFields, NewInvoice, NewItem},
    envelope::ApiEnvelope,
    error::{Error, Result},
    gateway::{EntityGateway, Resource},
    transport::Transport,
    v1::Signer,
};

#[cfg(feature = "reqwest")]
use crate::transport::ReqwestTransport;

/// Customer, item and invoice operations for one company.
///
/// ```no_run
/// use qbsign::{ClientConfig, Credentials, CustomerFields, QuickBooksClient};
///
/// let client = QuickBooksClient::new(Credentials::from_env()?, ClientConfig::default())?;
/// let created = client.create_customer(&CustomerFields {
///     email: Some("john@acme.com".into()),
///     ..CustomerFields::new("John Doe")
/// })?;
/// # Ok::<(), qbsign::Error>(())
/// ```
pub struct QuickBooksClient<T, S = Signer> {
    gateway: EntityGateway<S, T>,
}

#[cfg(feature = "reqwest")]
impl QuickBooksClient<ReqwestTransport> {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        QuickBooksClient::with_transport(credentials, config, transport)
    }
}

impl<T: Transport> QuickBooksClient<T> {
    pub fn with_transport(
        credentials: Credentials,
        config: ClientConfig,
        transport: T,
    ) -> Result<Self> {
        let company_url = config.company_url(&credentials)?;
        let signer = Signer::new(credentials).parameter_order(config.parameter_order);
        let gateway =
            EntityGateway::new(signer, transport, company_url).minor_version(config.minor_version);
        Ok(QuickBooksClient { gateway })
    }
}

impl<T, S> QuickBooksClient<T, S>
where
    T: Transport,
    S: OAuthSigner,
{
    pub fn from_gateway(gateway: EntityGateway<S, T>) -> Self {
        QuickBooksClient { gateway }
    }

    pub fn gateway(&self) -> &EntityGateway<S, T> {
        &self.gateway
    }

    pub fn create_customer(&self, customer: &CustomerFields) -> Result<ApiEnvelope> {
        self.gateway.create_new(customer)
    }

    pub fn get_customer(&self, id: &str) -> Result<ApiEnvelope> {
        self.gateway.fetch(Resource::CUSTOMER, id)
    }

    /// Rows of `SELECT * FROM Customer`.
    pub fn get_all_customers(&self) -> Result<Vec<Value>> {
        let envelope = self.gateway.query_all(Resource::CUSTOMER)?;
        envelope
            .query_rows(Resource::CUSTOMER.type_name())
            .map(<[Value]>::to_vec)
            .ok_or_else(|| Error::MalformedResponse {
                status: 200,
                reason: "response carries no QueryResponse".to_string(),
            })
    }

    pub fn update_customer(&self, id: &str, changes: &CustomerFields) -> Result<ApiEnvelope> {
        self.gateway.update(Resource::CUSTOMER, id, changes)
    }

    /// Marks the customer inactive; the API does not delete customers.
    pub fn delete_customer(&self, id: &str) -> Result<ApiEnvelope> {
        self.gateway.soft_delete(Resource::CUSTOMER, id)
    }

    pub fn create_item(&self, item: &NewItem) -> Result<ApiEnvelope> {
        self.gateway.create_new(item)
    }

    pub fn create_invoice(&self, invoice: &NewInvoice) -> Result<ApiEnvelope> {
        self.gateway.create_new(invoice)
    }
}
