pub const OAUTH_VALUE_VERSION: &str = "1.0";

pub const OAUTH_VALUE_SIGMETHOD_HMACSHA1: &str = "HMAC-SHA1";

pub const OAUTH_HEADER_SCHEME: &str = "OAuth";

pub const OAUTH_PARAM_KEY_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_PARAM_KEY_NONCE: &str = "oauth_nonce";
pub const OAUTH_PARAM_KEY_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_PARAM_KEY_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_PARAM_KEY_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_PARAM_KEY_TOKEN: &str = "oauth_token";
pub const OAUTH_PARAM_KEY_VERSION: &str = "oauth_version";

/// How the parameter string of the signature base string is assembled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParameterOrder {
    /// RFC 5849 §3.4.1: the base-string URI drops the query, the decoded
    /// query pairs join the oauth parameters, and everything is sorted by
    /// encoded key then encoded value.
    #[default]
    Sorted,
    /// The full URL (query included) is the base-string URI and only the
    /// oauth parameters are signed, in the order they were added.
    /// Matches older integrations that never normalized the request.
    Insertion,
}
