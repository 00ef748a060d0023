use crate::core::policy::{PolicyMap, ResolvedHeader};
use crate::error::CspError;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Shared CSP configuration: the current default [`PolicyMap`] for every
/// handler that does not carry its own override.
///
/// The defaults live behind an [`ArcSwap`], so request handlers resolve
/// headers from a consistent snapshot without locking while
/// [`set_defaults`](Self::set_defaults) atomically swaps in a replacement.
/// Updates are wholesale: the new map fully replaces the old one, nothing is
/// merged.
#[derive(Clone)]
pub struct CspConfig {
    defaults: Arc<ArcSwap<PolicyMap>>,
}

impl CspConfig {
    #[inline]
    pub fn new(defaults: PolicyMap) -> Self {
        Self {
            defaults: Arc::new(ArcSwap::from_pointee(defaults)),
        }
    }

    /// Replaces the current defaults. Takes effect for every subsequent
    /// resolution, including routes registered before the call.
    #[inline]
    pub fn set_defaults(&self, defaults: PolicyMap) {
        self.defaults.store(Arc::new(defaults));
    }

    /// A snapshot of the current defaults.
    #[inline]
    pub fn defaults(&self) -> Arc<PolicyMap> {
        self.defaults.load_full()
    }

    /// Resolves the header from `override_map` when given, else from the
    /// current defaults.
    pub fn resolve(&self, override_map: Option<&PolicyMap>) -> Result<ResolvedHeader, CspError> {
        match override_map {
            Some(map) => map.resolve(),
            None => self.defaults.load().resolve(),
        }
    }
}

impl Default for CspConfig {
    /// Starts from [`PolicyMap::builtin_default`].
    fn default() -> Self {
        Self::new(PolicyMap::builtin_default())
    }
}

impl std::fmt::Debug for CspConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CspConfig")
            .field("defaults", &self.defaults.load())
            .finish()
    }
}
