//! Component id computation.
//!
//! The resolver never decides how ids are made; it hands an
//! [`IdentityRequest`] to whatever [`IdentityService`] the caller supplies.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{ComponentId, ComponentName, PackageId};
use crate::util::hash::Fingerprint;
use crate::util::InternedString;

/// Build-time flag assignment, e.g. `debug = true`.
pub type FlagAssignment = BTreeMap<InternedString, bool>;

/// Everything an identity service may base an id on.
#[derive(Debug, Clone)]
pub struct IdentityRequest<'a> {
    /// Reproducible ids rather than fresh ones per configuration
    pub deterministic: bool,
    /// Explicit installed-package id to use as the id base
    pub override_id: Option<&'a str>,
    /// Explicit component id, used verbatim
    pub override_computed_id: Option<ComponentId>,
    pub package_id: PackageId,
    pub component_name: ComponentName,
    /// Sorted, deduplicated dependency ids plus the flag assignment
    pub deps_and_flags: Option<(&'a [ComponentId], &'a FlagAssignment)>,
}

/// Assigns the id of a configured component.
///
/// Must give distinct ids to distinct `(package, component, deps, flags)`
/// inputs, and the same id for the same inputs when `deterministic` is set.
pub trait IdentityService {
    fn compute_identity(&self, request: &IdentityRequest<'_>) -> ComponentId;
}

impl<T: IdentityService + ?Sized> IdentityService for &T {
    fn compute_identity(&self, request: &IdentityRequest<'_>) -> ComponentId {
        (**self).compute_identity(request)
    }
}

/// Content-addressed ids of the form `<pkg>-<version>-<hash>[-<component>]`.
#[derive(Debug, Default)]
pub struct HashedIdentity {
    counter: AtomicU64,
}

impl HashedIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    fn nonce(&self) -> String {
        let count = self.counter.fetch_add(1, Ordering::Relaxed);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        let mut fp = Fingerprint::new();
        fp.update_str(&nanos.to_string())
            .update_str(&count.to_string())
            .update_str(&std::process::id().to_string());
        let mut nonce = fp.finish();
        nonce.truncate(8);
        nonce
    }
}

impl IdentityService for HashedIdentity {
    fn compute_identity(&self, request: &IdentityRequest<'_>) -> ComponentId {
        if let Some(id) = request.override_computed_id {
            return id;
        }

        let mut base = match request.override_id {
            Some(id) => id.to_string(),
            None => {
                let mut base = request.package_id.to_string();
                if let Some((deps, flags)) = request.deps_and_flags {
                    let mut fp = Fingerprint::new();
                    fp.update_str(&request.component_name.to_string())
                        .update_strs(deps.iter().map(|d| d.as_str()));
                    for (name, value) in flags {
                        fp.update_str(name).update_bool(*value);
                    }
                    base.push('-');
                    base.push_str(&fp.finish_short());
                }
                base
            }
        };

        if !request.deterministic && request.override_id.is_none() {
            base.push('-');
            base.push_str(&self.nonce());
        }

        if let Some(name) = request.component_name.unqualified() {
            base.push('-');
            base.push_str(&name);
        }

        ComponentId::new(base)
    }
}
