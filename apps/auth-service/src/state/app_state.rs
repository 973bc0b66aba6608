use std::sync::Arc;

use super::signer::Signer;
use crate::auth::clock::{Clock, SystemClock};

/// Application state shared with request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential signer used to verify presented tokens
    pub signer: Arc<Signer>,
    /// Time source for expiry checks
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new AppState reading the wall clock
    pub fn new(signer: Arc<Signer>) -> Self {
        Self::with_clock(signer, Arc::new(SystemClock))
    }

    /// Create a new AppState with an explicit clock
    pub fn with_clock(signer: Arc<Signer>, clock: Arc<dyn Clock>) -> Self {
        Self { signer, clock }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}
