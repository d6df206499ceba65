use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use crate::{JitBackend, TestError};

/// Compiled artifacts keyed by mangled function name.
///
/// Entries are never evicted, so a reference handed out by
/// [`JitCache::get_or_compile`] always names the one artifact compiled for
/// that name.
pub struct JitCache<A> {
    artifacts: FxHashMap<String, A>,
}

impl<A> JitCache<A> {
    pub fn new() -> Self {
        JitCache {
            artifacts: FxHashMap::default(),
        }
    }

    /// Return the artifact for `name`, compiling `function` on first use.
    ///
    /// A compile error is returned unchanged and nothing is cached.
    pub fn get_or_compile<B>(
        &mut self,
        name: &str,
        function: &B::Function,
        backend: &B,
    ) -> Result<&A, TestError>
    where
        B: JitBackend<Artifact = A> + ?Sized,
    {
        match self.artifacts.entry(name.to_owned()) {
            Entry::Occupied(entry) => {
                tracing::trace!(function = name, "JIT cache hit");
                Ok(&*entry.into_mut())
            }
            Entry::Vacant(entry) => {
                tracing::debug!(function = name, "compiling for JIT comparison");
                let artifact = backend.compile(function)?;
                Ok(&*entry.insert(artifact))
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.artifacts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl<A> Default for JitCache<A> {
    fn default() -> Self {
        Self::new()
    }
}
