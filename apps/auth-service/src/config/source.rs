//! Key/value configuration sources with fallback lookups.

use std::collections::HashMap;
use std::env;

/// Outcome of a lookup that may fall back to a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// Present and parsed.
    Configured(T),
    /// Unset or empty; the fallback was substituted.
    Defaulted(T),
    /// Present but unparsable; the fallback was substituted.
    Degraded { value: T, raw: String },
}

impl<T> Lookup<T> {
    pub fn value(&self) -> &T {
        match self {
            Lookup::Configured(v) | Lookup::Defaulted(v) | Lookup::Degraded { value: v, .. } => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Lookup::Configured(v) | Lookup::Defaulted(v) | Lookup::Degraded { value: v, .. } => v,
        }
    }
}

/// A read-only source of configuration values.
pub trait ConfigSource: Send + Sync {
    /// Raw value for `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// String lookup; unset and empty values both fall back.
    fn string_or(&self, key: &str, fallback: &str) -> Lookup<String> {
        match self.get(key) {
            Some(v) if !v.is_empty() => Lookup::Configured(v),
            _ => Lookup::Defaulted(fallback.to_string()),
        }
    }

    /// Integer lookup; unset/empty falls back, unparsable degrades to the fallback.
    fn int_or(&self, key: &str, fallback: i64) -> Lookup<i64> {
        match self.get(key) {
            None => Lookup::Defaulted(fallback),
            Some(raw) if raw.trim().is_empty() => Lookup::Defaulted(fallback),
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(v) => Lookup::Configured(v),
                Err(_) => Lookup::Degraded {
                    value: fallback,
                    raw,
                },
            },
        }
    }
}

/// Process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// In-memory source, handy for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
