#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use qbsign::{
    v1::{FixedClock, FixedNonce},
    ClientConfig, Credentials, EntityGateway, Environment, HttpResponse, QuickBooksClient, Result,
    SignedRequest, Signer, Transport,
};
use serde_json::Value;

pub const REALM: &str = "4620816365";
pub const NONCE: &str = "0123456789abcdef0123456789abcdef";
pub const TIMESTAMP: i64 = 1_700_000_000;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn credentials() -> Credentials {
    Credentials::new(
        "qyprd-consumer-key",
        "consumer secret/+=",
        "access token~1",
        "token&secret",
        REALM,
        Environment::Sandbox,
    )
}

/// Transport double: replays queued responses in order and records every
/// request it sees. Clones share state.
#[derive(Clone, Default)]
pub struct StubTransport {
    responses: Arc<Mutex<VecDeque<HttpResponse>>>,
    requests: Arc<Mutex<Vec<SignedRequest>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        StubTransport::default()
    }

    pub fn respond_json(self, status: u16, body: Value) -> Self {
        self.respond_raw(status, body.to_string())
    }

    pub fn respond_raw(self, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body));
        self
    }

    pub fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn writes(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method != qbsign::Method::Get)
            .count()
    }
}

impl Transport for StubTransport {
    fn send(&self, request: &SignedRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| HttpResponse::new(599, "stub transport exhausted")))
    }
}

pub type TestClient = QuickBooksClient<StubTransport, Signer<FixedClock, FixedNonce>>;

/// Client with a pinned clock and nonce so signatures are reproducible.
pub fn client(transport: StubTransport) -> TestClient {
    let credentials = credentials();
    let company_url = ClientConfig::default().company_url(&credentials).unwrap();
    let signer =
        Signer::new(credentials).with_sources(FixedClock(TIMESTAMP), FixedNonce::new(NONCE));
    QuickBooksClient::from_gateway(EntityGateway::new(signer, transport, company_url))
}
