use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::v1::{percent_encode, OAUTH_HEADER_SCHEME};

/// Ordered `oauth_*` parameters of one request, values kept unencoded.
///
/// Insertion order is preserved; it is the order the `Authorization`
/// header is rendered in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationParameters {
    params: Vec<(Cow<'static, str>, String)>,
}

impl AuthorizationParameters {
    pub fn new() -> Self {
        AuthorizationParameters { params: Vec::new() }
    }

    pub fn push(&mut self, key: impl Into<Cow<'static, str>>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Pairs with key and value percent-encoded, in insertion order.
    pub fn encoded(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(k, v)| (percent_encode(k).to_string(), percent_encode(v).to_string()))
            .collect()
    }

    /// `OAuth k1="v1", k2="v2"` with every value percent-encoded.
    pub fn to_header(&self) -> String {
        let rendered = self
            .encoded()
            .into_iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, v))
            .collect::<Vec<String>>()
            .join(", ");
        format!("{} {}", OAUTH_HEADER_SCHEME, rendered)
    }

    /// Inverse of [`to_header`](Self::to_header). Returns `None` when the
    /// value is not an `OAuth` header or a pair is not `key="value"`.
    pub fn parse_header(header: &str) -> Option<Self> {
        let rest = header.strip_prefix(OAUTH_HEADER_SCHEME)?.trim_start();
        let mut parsed = AuthorizationParameters::new();
        for item in rest.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (k, v) = item.split_once('=')?;
            let v = v.strip_prefix('"')?.strip_suffix('"')?;
            let k = percent_decode_str(k).decode_utf8().ok()?.into_owned();
            let v = percent_decode_str(v).decode_utf8().ok()?.into_owned();
            parsed.push(k, v);
        }
        Some(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_keeps_insertion_order_and_encodes_values() {
        let mut params = AuthorizationParameters::new();
        params.push("oauth_token", "a b&c");
        params.push("oauth_consumer_key", "key~1");
        assert_eq!(
            params.to_header(),
            r#"OAuth oauth_token="a%20b%26c", oauth_consumer_key="key~1""#
        );
    }

    #[test]
    fn parse_header_recovers_raw_values() {
        let mut params = AuthorizationParameters::new();
        params.push("oauth_token", "tok/with=odd, chars\"");
        params.push("oauth_signature", "ab+c/d==");
        let parsed = AuthorizationParameters::parse_header(&params.to_header()).unwrap();
        assert_eq!(parsed, params);
        assert_eq!(parsed.get("oauth_signature"), Some("ab+c/d=="));
    }

    #[test]
    fn parse_header_rejects_other_schemes() {
        assert!(AuthorizationParameters::parse_header("Bearer abc").is_none());
        assert!(AuthorizationParameters::parse_header("OAuth oauth_token=unquoted").is_none());
    }
}
