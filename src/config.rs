use std::str::FromStr;

use anyhow::Context;
use jsonwebtoken::Algorithm;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("SECRET_KEY").context("SECRET_KEY is not set")?,
            algorithm: parse_algorithm(
                &std::env::var("ALGORITHM").unwrap_or_else(|_| "HS256".into()),
            )?,
            ttl_minutes: match std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
                Ok(v) => parse_ttl_minutes(&v).context("invalid ACCESS_TOKEN_EXPIRE_MINUTES")?,
                Err(_) => DEFAULT_TTL_MINUTES,
            },
        };
        Ok(Self { database_url, jwt })
    }
}

pub const DEFAULT_TTL_MINUTES: i64 = 30;
/// One year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

pub fn parse_ttl_minutes(raw: &str) -> anyhow::Result<i64> {
    let minutes = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("{raw:?} is not a number of minutes"))?;
    if !(1..=MAX_TTL_MINUTES).contains(&minutes) {
        anyhow::bail!("{minutes} minutes is outside 1..={MAX_TTL_MINUTES}");
    }
    Ok(minutes)
}

/// Tokens are signed with a shared secret, so only the HMAC family is usable.
pub fn parse_algorithm(name: &str) -> anyhow::Result<Algorithm> {
    let algorithm = Algorithm::from_str(name.trim())
        .map_err(|e| anyhow::anyhow!("unknown ALGORITHM {name:?}: {e}"))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => anyhow::bail!("ALGORITHM {other:?} needs a key pair, not SECRET_KEY"),
    }
}
