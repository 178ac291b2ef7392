//! Executes one [`SignedRequest`] and interprets the answer.
//!
//! A [`Transport`] only moves bytes: it fails with [`Error::Connection`] or
//! hands back the raw status and body. [`execute`] turns that into an
//! [`ApiEnvelope`] or one of the response errors.

use tracing::{debug, warn};

use crate::{
    envelope::ApiEnvelope,
    error::{Error, Result},
    http::{HttpResponse, SignedRequest},
};

#[cfg(feature = "reqwest")]
mod blocking;

#[cfg(feature = "reqwest")]
pub use self::blocking::ReqwestTransport;

pub trait Transport: Send + Sync {
    /// Performs the round trip. No retries.
    fn send(&self, request: &SignedRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &SignedRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &SignedRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

/// Sends `request` and decodes the response.
///
/// * status >= 400: [`Error::Conflict`] for a rejected version token,
///   otherwise [`Error::Http`] with the fault detail (or `"Unknown error"`).
/// * body that is not JSON: [`Error::MalformedResponse`].
pub fn execute<T: Transport + ?Sized>(
    transport: &T,
    request: &SignedRequest,
) -> Result<(u16, ApiEnvelope)> {
    debug!(method = %request.method, url = %request.url, "sending request");
    let response = transport.send(request)?;
    let status = response.status;
    debug!(status, "received response");

    if status >= 400 {
        let envelope = serde_json::from_str(&response.body)
            .map(ApiEnvelope::new)
            .unwrap_or_else(|_| ApiEnvelope::new(serde_json::Value::Null));
        let detail = envelope.fault_detail();
        if status == 409 || envelope.is_stale_object_fault() {
            warn!(status, %detail, "version token rejected");
            return Err(Error::Conflict { status, detail });
        }
        warn!(status, %detail, "request failed");
        return Err(Error::Http { status, detail });
    }

    let value = serde_json::from_str(&response.body).map_err(|e| Error::MalformedResponse {
        status,
        reason: e.to_string(),
    })?;
    Ok((status, ApiEnvelope::new(value)))
}
