//! Claims carried by every access and refresh token.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use super::error::TokenError;

/// Payload embedded in a signed token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject the token was issued for (e.g. a user id).
    pub sub: String,
    /// Optional role; absent from the encoded payload when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issued-at (seconds since epoch)
    #[serde(deserialize_with = "numeric_date")]
    pub iat: i64,
    /// Expiry (seconds since epoch)
    #[serde(deserialize_with = "numeric_date")]
    pub exp: i64,
    /// Not-before (seconds since epoch); never set on tokens minted here.
    #[serde(
        default,
        deserialize_with = "optional_numeric_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub nbf: Option<i64>,
}

impl Claims {
    /// Build claims for `sub` valid for `ttl` starting at `iat`.
    ///
    /// An empty role is treated as no role.
    pub fn new(sub: &str, role: Option<&str>, iat: i64, ttl: Duration) -> Result<Self, TokenError> {
        if sub.is_empty() {
            return Err(TokenError::EmptySubject);
        }

        let ttl_secs = i64::try_from(ttl.as_secs()).map_err(|_| TokenError::Clock)?;
        let exp = iat.checked_add(ttl_secs).ok_or(TokenError::Clock)?;

        Ok(Self {
            sub: sub.to_string(),
            role: role.filter(|r| !r.is_empty()).map(str::to_string),
            iat,
            exp,
            nbf: None,
        })
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn issued_at(&self) -> SystemTime {
        from_unix_secs(self.iat)
    }

    pub fn expires_at(&self) -> SystemTime {
        from_unix_secs(self.exp)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.exp.saturating_sub(self.iat).max(0) as u64)
    }

    /// Check structural sanity, `nbf` and expiry against `now` (seconds since epoch).
    ///
    /// A token is usable from its `nbf` second and expired from its `exp`
    /// second onwards.
    pub fn validate_window(&self, now: i64) -> Result<(), TokenError> {
        if self.sub.is_empty() || self.exp <= self.iat {
            return Err(TokenError::Malformed);
        }
        if let Some(nbf) = self.nbf {
            if now < nbf {
                return Err(TokenError::NotYetValid { not_before: nbf });
            }
        }
        if now >= self.exp {
            return Err(TokenError::Expired {
                expired_at: self.exp,
            });
        }
        Ok(())
    }

    /// Collapse an explicitly empty role into "no role".
    pub(crate) fn normalized(mut self) -> Self {
        if self.role.as_deref() == Some("") {
            self.role = None;
        }
        self
    }
}

/// Seconds since the Unix epoch for `time`.
pub fn unix_secs(time: SystemTime) -> Result<i64, TokenError> {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TokenError::Clock)?
        .as_secs();
    i64::try_from(secs).map_err(|_| TokenError::Clock)
}

fn from_unix_secs(secs: i64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

/// RFC 7519 NumericDate: integer or fractional seconds, floored to whole seconds.
struct NumericDate(i64);

impl<'de> Deserialize<'de> for NumericDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NumericDateVisitor;

        impl Visitor<'_> for NumericDateVisitor {
            type Value = NumericDate;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a NumericDate (seconds since epoch)")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(NumericDate(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(NumericDate)
                    .map_err(|_| E::custom("NumericDate out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                let floored = v.floor();
                if !floored.is_finite() || floored < i64::MIN as f64 || floored >= i64::MAX as f64 {
                    return Err(E::custom("NumericDate out of range"));
                }
                Ok(NumericDate(floored as i64))
            }
        }

        deserializer.deserialize_any(NumericDateVisitor)
    }
}

fn numeric_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    NumericDate::deserialize(deserializer).map(|d| d.0)
}

fn optional_numeric_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Option::<NumericDate>::deserialize(deserializer).map(|d| d.map(|d| d.0))
}
