use std::{env, fmt, time::Duration};

use url::Url;

use crate::{
    error::{Error, Result},
    v1::ParameterOrder,
};

pub const SANDBOX_BASE_URL: &str = "https://sandbox-quickbooks.api.intuit.com";
pub const PRODUCTION_BASE_URL: &str = "https://quickbooks.api.intuit.com";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_CONSUMER_KEY: &str = "QBO_CONSUMER_KEY";
const ENV_CONSUMER_SECRET: &str = "QBO_CONSUMER_SECRET";
const ENV_ACCESS_TOKEN: &str = "QBO_ACCESS_TOKEN";
const ENV_ACCESS_TOKEN_SECRET: &str = "QBO_ACCESS_TOKEN_SECRET";
const ENV_REALM_ID: &str = "QBO_REALM_ID";
const ENV_ENVIRONMENT: &str = "QBO_ENVIRONMENT";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(Error::Config(format!("unknown environment `{}`", other))),
        }
    }
}

/// Consumer and access-token credentials for one company (realm).
///
/// Nothing mutates these after construction; clients share them read-only.
#[derive(Clone)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_token_secret: String,
    realm_id: String,
    environment: Environment,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
        realm_id: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
            realm_id: realm_id.into(),
            environment,
        }
    }

    /// Reads credentials from the `QBO_*` environment variables.
    /// `QBO_ENVIRONMENT` is optional and defaults to sandbox.
    pub fn from_env() -> Result<Self> {
        let environment = match env::var(ENV_ENVIRONMENT) {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };
        Ok(Credentials::new(
            required_var(ENV_CONSUMER_KEY)?,
            required_var(ENV_CONSUMER_SECRET)?,
            required_var(ENV_ACCESS_TOKEN)?,
            required_var(ENV_ACCESS_TOKEN_SECRET)?,
            required_var(ENV_REALM_ID)?,
            environment,
        ))
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn access_token_secret(&self) -> &str {
        &self.access_token_secret
    }

    pub fn realm_id(&self) -> &str {
        &self.realm_id
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .field("realm_id", &self.realm_id)
            .field("environment", &self.environment)
            .finish()
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("{} is not set", name)))
}

/// Client-side knobs that are not credentials.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub timeout: Duration,
    /// Sent as `minorversion` on every request when set.
    pub minor_version: Option<u32>,
    pub parameter_order: ParameterOrder,
    /// Overrides the environment's base URL (e.g. a local test server).
    pub base_url: Option<Url>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: DEFAULT_TIMEOUT,
            minor_version: None,
            parameter_order: ParameterOrder::default(),
            base_url: None,
        }
    }
}

impl ClientConfig {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn minor_version(mut self, minor_version: u32) -> Self {
        self.minor_version = Some(minor_version);
        self
    }

    pub fn parameter_order(mut self, order: ParameterOrder) -> Self {
        self.parameter_order = order;
        self
    }

    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// `{base}/v3/company/{realm}/`, the root every resource path hangs off.
    pub fn company_url(&self, credentials: &Credentials) -> Result<Url> {
        let mut url = match &self.base_url {
            Some(url) => url.clone(),
            None => Url::parse(credentials.environment().base_url())?,
        };
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!("{} cannot be a base url", url)));
        }
        url.path_segments_mut()
            .map_err(|_| Error::Config("base url has no path".into()))?
            .pop_if_empty()
            .extend(&["v3", "company", credentials.realm_id(), ""]);
        Ok(url)
    }
}
