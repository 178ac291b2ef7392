use std::time::Duration;

use ::reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderName, HeaderValue},
};

use crate::{
    error::{Error, Result},
    http::{HttpResponse, Method, SignedRequest},
    transport::Transport,
};

/// Blocking HTTPS transport on top of `reqwest`.
///
/// Certificate verification stays on; there is no switch to disable it.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("qbsign/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Connection(Box::new(e)))?;
        Ok(ReqwestTransport { client })
    }
}

fn to_reqwest_method(method: Method) -> ::reqwest::Method {
    match method {
        Method::Get => ::reqwest::Method::GET,
        Method::Post => ::reqwest::Method::POST,
        Method::Put => ::reqwest::Method::PUT,
    }
}

fn to_header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidHeader(format!("name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeader(format!("value for {}: {}", name, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &SignedRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.url.clone())
            .headers(to_header_map(&request.headers)?);
        if let Some(body) = request.body.as_ref().filter(|_| request.method.allows_body()) {
            builder = builder.body(serde_json::to_vec(body)?);
        }
        let response = builder.send().map_err(|e| Error::Connection(Box::new(e)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| Error::Connection(Box::new(e)))?;
        Ok(HttpResponse { status, body })
    }
}
