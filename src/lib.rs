//! OAuth 1.0a signed requests against the QuickBooks Online accounting API.
//!
//! * [`v1::Signer`] computes the HMAC-SHA1 `Authorization` header for one
//!   method + URL.
//! * [`transport`] sends a [`SignedRequest`] and decodes the JSON envelope.
//! * [`EntityGateway`] creates, fetches and queries entities, and updates or
//!   soft-deletes them with the `SyncToken` from a fetch made in the same call.

pub mod builder;
pub mod client;
pub mod config;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod http;
pub mod parameters;
pub mod transport;
pub mod v1;

mod util;

pub use builder::{OAuthSigner, RequestBuilder};
pub use client::QuickBooksClient;
pub use config::{ClientConfig, Credentials, Environment};
pub use entity::{CustomerFields, LineItem, MergeFields, NewEntity, NewInvoice, NewItem};
pub use envelope::{ApiEnvelope, Fault, FaultError};
pub use error::{Error, Result};
pub use gateway::{EntityGateway, Resource};
pub use http::{HttpResponse, Method, SignedRequest};
pub use parameters::AuthorizationParameters;
pub use transport::Transport;
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use v1::{ParameterOrder, Signer};
