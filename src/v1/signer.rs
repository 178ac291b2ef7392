use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode};
use sha1::Sha1;
use url::Url;

use crate::{
    builder::OAuthSigner,
    config::Credentials,
    error::{Error, Result},
    http::Method,
    parameters::AuthorizationParameters,
    util,
    v1::*,
};

type HmacSha1 = Hmac<Sha1>;

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// OAuth 1.0a HMAC-SHA1 signer bound to one set of credentials.
///
/// Every call draws a fresh timestamp from `C` and a fresh nonce from `N`.
pub struct Signer<C = SystemClock, N = OsRandomNonce> {
    credentials: Credentials,
    order: ParameterOrder,
    clock: C,
    nonce: N,
}

impl Signer {
    pub fn new(credentials: Credentials) -> Self {
        Signer {
            credentials,
            order: ParameterOrder::default(),
            clock: SystemClock,
            nonce: OsRandomNonce,
        }
    }
}

impl<C, N> Signer<C, N>
where
    C: Clock,
    N: NonceSource,
{
    /// Replaces the time and randomness sources, e.g. with
    /// [`FixedClock`] and [`FixedNonce`] for golden vectors.
    pub fn with_sources<C2, N2>(self, clock: C2, nonce: N2) -> Signer<C2, N2>
    where
        C2: Clock,
        N2: NonceSource,
    {
        Signer {
            credentials: self.credentials,
            order: self.order,
            clock,
            nonce,
        }
    }

    pub fn parameter_order(mut self, order: ParameterOrder) -> Self {
        self.order = order;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Builds the signed parameter set for `method` + `url`.
    /// `oauth_signature` is always the last entry.
    pub fn authorization_parameters(
        &self,
        method: Method,
        url: &Url,
    ) -> Result<AuthorizationParameters> {
        let nonce = self.nonce.nonce()?;
        let timestamp = self.clock.timestamp();

        let mut params = AuthorizationParameters::new();
        params.push(OAUTH_PARAM_KEY_CONSUMER_KEY, self.credentials.consumer_key());
        params.push(OAUTH_PARAM_KEY_NONCE, nonce);
        params.push(
            OAUTH_PARAM_KEY_SIGNATURE_METHOD,
            OAUTH_VALUE_SIGMETHOD_HMACSHA1,
        );
        params.push(OAUTH_PARAM_KEY_TIMESTAMP, timestamp.to_string());
        params.push(OAUTH_PARAM_KEY_TOKEN, self.credentials.access_token());
        params.push(OAUTH_PARAM_KEY_VERSION, OAUTH_VALUE_VERSION);

        let base_str = signature_base_string(method.as_str(), url, &params, self.order);
        let signature = hmac_sha1_signature(
            self.credentials.consumer_secret(),
            self.credentials.access_token_secret(),
            &base_str,
        )?;
        params.push(OAUTH_PARAM_KEY_SIGNATURE, signature);
        Ok(params)
    }

    /// `Authorization` header value for `method` + `url`. The URL must be
    /// final; the signature covers its exact serialization.
    pub fn sign(&self, method: Method, url: &Url) -> Result<String> {
        Ok(self.authorization_parameters(method, url)?.to_header())
    }
}

impl<C, N> OAuthSigner for Signer<C, N>
where
    C: Clock,
    N: NonceSource,
{
    fn authorization(&self, method: Method, url: &Url) -> Result<String> {
        self.sign(method, url)
    }
}

/// `METHOD&enc(uri)&enc(params)`.
///
/// `oauth_params` must not contain `oauth_signature` yet. See
/// [`ParameterOrder`] for how the query string is treated.
pub fn signature_base_string(
    http_method: &str,
    url: &Url,
    oauth_params: &AuthorizationParameters,
    order: ParameterOrder,
) -> String {
    let (endpoint, params) = match order {
        ParameterOrder::Sorted => {
            let (endpoint, queries) = util::url_to_endpoint_and_queries(url);
            let query_params = queries
                .iter()
                .map(|(k, v)| (percent_encode(k).to_string(), percent_encode(v).to_string()))
                .collect::<Vec<(String, String)>>();
            // join oauth and query parameters, then sort by key and value
            let mut params = [oauth_params.encoded(), query_params].concat();
            params.sort();
            (endpoint, params)
        }
        ParameterOrder::Insertion => (url.as_str().to_string(), oauth_params.encoded()),
    };

    let param_str = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&");

    let http_method = http_method.to_ascii_uppercase();
    format!(
        "{}&{}&{}",
        percent_encode(&http_method),
        percent_encode(&endpoint),
        percent_encode(&param_str)
    )
}

/// Base64 of HMAC-SHA1 over `base_str`, keyed by
/// `enc(consumer_secret)&enc(token_secret)`.
pub fn hmac_sha1_signature(
    consumer_secret: &str,
    token_secret: &str,
    base_str: &str,
) -> Result<String> {
    let sign_key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(sign_key.as_bytes())
        .map_err(|e| Error::Signing(e.to_string()))?;
    mac.update(base_str.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

pub fn percent_encode(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS)
}
