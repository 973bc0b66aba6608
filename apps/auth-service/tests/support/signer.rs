//! Signer fixtures for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use auth_service::config::{ConfigSource, MapSource};
use auth_service::{Signer, TokenConfig};

use crate::common::{days, minutes};

pub const ACCESS_SECRET: &str = "integration-access-secret";
pub const REFRESH_SECRET: &str = "integration-refresh-secret";

/// Signer with the default lifetimes (15 minutes / 7 days).
pub fn test_signer() -> Arc<Signer> {
    signer_with_ttls(minutes(15), days(7))
}

pub fn signer_with_ttls(access_ttl: Duration, refresh_ttl: Duration) -> Arc<Signer> {
    let config = TokenConfig::new(ACCESS_SECRET, REFRESH_SECRET, access_ttl, refresh_ttl);
    Arc::new(Signer::new(&config).expect("test signer config should be valid"))
}

/// Config source that counts how many lookups it served.
#[derive(Debug)]
pub struct CountingSource {
    inner: MapSource,
    reads: AtomicUsize,
}

impl CountingSource {
    pub fn new(inner: MapSource) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl ConfigSource for CountingSource {
    fn get(&self, key: &str) -> Option<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }
}
