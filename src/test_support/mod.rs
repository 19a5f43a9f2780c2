//! Test utilities and mocks for mixlink unit tests.
//!
//! Fixtures build package descriptions and external maps without touching
//! the filesystem; [`CountingIdentity`] records how often ids are requested.

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::configure::{HashedIdentity, IdentityRequest, IdentityService};
use crate::core::ComponentId;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Identity service that counts its calls and delegates to
/// [`HashedIdentity`].
#[derive(Debug, Default)]
pub struct CountingIdentity {
    inner: HashedIdentity,
    calls: AtomicUsize,
}

impl CountingIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids computed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdentityService for CountingIdentity {
    fn compute_identity(&self, request: &IdentityRequest<'_>) -> ComponentId {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.compute_identity(request)
    }
}

/// Identity service that returns the same id for every request.
#[derive(Debug, Clone, Copy)]
pub struct FixedIdentity(pub &'static str);

impl IdentityService for FixedIdentity {
    fn compute_identity(&self, _request: &IdentityRequest<'_>) -> ComponentId {
        ComponentId::new(self.0)
    }
}
