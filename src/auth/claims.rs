use serde::{Deserialize, Serialize};

/// JWT payload issued on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
}

/// What verification reads back out of a token. `sub` stays optional so a
/// token without a subject decodes and is rejected by the resolver.
#[derive(Debug, Deserialize)]
pub(crate) struct DecodedClaims {
    #[serde(default)]
    pub sub: Option<String>,
}

/// Identity extracted from a verified token, alive for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub username: Option<String>,
}

impl From<DecodedClaims> for TokenData {
    fn from(c: DecodedClaims) -> Self {
        Self { username: c.sub }
    }
}
