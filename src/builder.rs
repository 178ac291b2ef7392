use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    error::{Error, Result},
    http::{
        Method, SignedRequest, APPLICATION_JSON, HEADER_ACCEPT, HEADER_AUTHORIZATION,
        HEADER_CONTENT_TYPE,
    },
};

/// Produces an `Authorization` header value bound to `method` + `url`.
pub trait OAuthSigner {
    fn authorization(&self, method: Method, url: &Url) -> Result<String>;
}

/// Assembles the URL and body of one call, then signs it.
///
/// Signing consumes the builder, so the URL cannot change after the
/// signature has been computed over it.
pub struct RequestBuilder {
    method: Method,
    url: Url,
    body: Option<Value>,
}

impl RequestBuilder {
    pub fn new(method: Method, base: &Url) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("{} cannot be a base url", base)));
        }
        Ok(RequestBuilder {
            method,
            url: base.clone(),
            body: None,
        })
    }

    /// Appends one path segment; `/` and other reserved characters in
    /// `segment` are escaped.
    pub fn path(mut self, segment: &str) -> Self {
        if let Ok(mut segments) = self.url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        self
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }

    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, &value.to_string()),
            None => self,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn sign<S: OAuthSigner + ?Sized>(self, signer: &S) -> Result<SignedRequest> {
        let RequestBuilder { method, url, body } = self;
        let body = match body {
            Some(_) if !method.allows_body() => {
                debug!(%method, "dropping body from bodiless request");
                None
            }
            body => body,
        };
        let authorization = signer.authorization(method, &url)?;
        Ok(SignedRequest {
            method,
            url,
            headers: vec![
                (HEADER_ACCEPT.into(), APPLICATION_JSON.into()),
                (HEADER_CONTENT_TYPE.into(), APPLICATION_JSON.into()),
                (HEADER_AUTHORIZATION.into(), authorization),
            ],
            body,
        })
    }
}
