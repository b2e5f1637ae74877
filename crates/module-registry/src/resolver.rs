//! Module component resolver — tries candidate locations in a fixed order
//! and memoizes the first component found, per module id.
//!
//! The cache has no expiry and no size bound; entries leave only through
//! [`invalidate`](ModuleComponentResolver::invalidate) or
//! [`clear`](ModuleComponentResolver::clear). Concurrent cold resolutions of
//! the same id are not deduplicated: each searches on its own and the last
//! writer wins with an identical handle.

use crate::component::ComponentHandle;
use crate::loader::{CandidateLayout, ComponentLoader};
use dashmap::DashMap;
use std::sync::Arc;
use talent_core::ModuleId;
use tracing::{debug, info, warn};

pub struct ModuleComponentResolver {
    loader: Arc<dyn ComponentLoader>,
    layout: CandidateLayout,
    cache: DashMap<ModuleId, ComponentHandle>,
}

impl ModuleComponentResolver {
    pub fn new(loader: Arc<dyn ComponentLoader>, layout: CandidateLayout) -> Self {
        Self {
            loader,
            layout,
            cache: DashMap::new(),
        }
    }

    pub fn layout(&self) -> &CandidateLayout {
        &self.layout
    }

    /// Resolve a module id to its component.
    ///
    /// Returns the cached handle without touching the loader when present.
    /// Otherwise tries every candidate location in order; the first one that
    /// loads and exposes a component is cached and returned. `None` means the
    /// module has no UI component, which is a valid state.
    pub async fn resolve(&self, module_id: &ModuleId) -> Option<ComponentHandle> {
        if let Some(handle) = self.get_cached(module_id) {
            metrics::counter!("modules.cache.hit").increment(1);
            debug!(module_id = %module_id, "Module component served from cache");
            return Some(handle);
        }
        metrics::counter!("modules.cache.miss").increment(1);

        for candidate in self.layout.candidates(module_id) {
            metrics::counter!("modules.lookup.attempt").increment(1);
            debug!(module_id = %module_id, location = %candidate, "Trying module location");

            match self.loader.load(&candidate).await {
                Ok(exports) => match exports.component_for(module_id) {
                    Some(handle) => {
                        info!(
                            module_id = %module_id,
                            location = %candidate,
                            component = handle.name(),
                            "Module component resolved"
                        );
                        self.cache.insert(module_id.clone(), handle.clone());
                        return Some(handle);
                    }
                    None => {
                        metrics::counter!("modules.lookup.miss").increment(1);
                        debug!(
                            module_id = %module_id,
                            location = %candidate,
                            "No component export at location"
                        );
                    }
                },
                Err(e) => {
                    metrics::counter!("modules.lookup.miss").increment(1);
                    debug!(
                        module_id = %module_id,
                        location = %candidate,
                        error = %e,
                        "Module location failed to load"
                    );
                }
            }
        }

        metrics::counter!("modules.resolve.not_found").increment(1);
        warn!(module_id = %module_id, "No component found for module");
        None
    }

    /// Resolve raw, possibly empty input. Empty input is not-found and
    /// never reaches the loader.
    pub async fn resolve_str(&self, raw: &str) -> Option<ComponentHandle> {
        let module_id = ModuleId::parse_opt(Some(raw))?;
        self.resolve(&module_id).await
    }

    /// Resolve each id in turn, returning how many produced a component.
    pub async fn preload<I, S>(&self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = 0;
        for raw in ids {
            if self.resolve_str(raw.as_ref()).await.is_some() {
                resolved += 1;
            }
        }
        info!(resolved, "Module components preloaded");
        resolved
    }

    /// Cache lookup only; never touches the loader.
    pub fn get_cached(&self, module_id: &ModuleId) -> Option<ComponentHandle> {
        self.cache.get(module_id).map(|e| e.value().clone())
    }

    /// Insert or overwrite a cache entry, bypassing the loader.
    pub fn put(&self, module_id: ModuleId, handle: ComponentHandle) {
        debug!(module_id = %module_id, component = handle.name(), "Module component cached");
        self.cache.insert(module_id, handle);
    }

    pub fn invalidate(&self, module_id: &ModuleId) {
        if self.cache.remove(module_id).is_some() {
            debug!(module_id = %module_id, "Module component evicted");
        }
    }

    pub fn clear(&self) {
        let evicted = self.cache.len();
        self.cache.clear();
        info!(evicted, "Module component cache cleared");
    }

    /// Cached module ids, sorted.
    pub fn cached_ids(&self) -> Vec<ModuleId> {
        let mut ids: Vec<_> = self.cache.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ModuleComponent, RenderContext, RenderOutput};
    use crate::loader::{Convention, PathBase};
    use crate::registry::ComponentRegistry;

    struct Panel;

    impl ModuleComponent for Panel {
        fn name(&self) -> &str {
            "Panel"
        }

        fn render(&self, ctx: &RenderContext) -> RenderOutput {
            RenderOutput {
                module_id: ctx.module_id.clone(),
                title: "Panel".into(),
                body: serde_json::Value::Null,
            }
        }
    }

    fn id(s: &str) -> ModuleId {
        ModuleId::new(s).unwrap()
    }

    fn resolver_with(registry: ComponentRegistry) -> ModuleComponentResolver {
        let layout = registry.layout().clone();
        ModuleComponentResolver::new(Arc::new(registry), layout)
    }

    #[tokio::test]
    async fn test_resolve_caches_hit() {
        let registry = ComponentRegistry::default();
        let handle = ComponentHandle::new(Panel);
        registry.register_component(
            &id("people"),
            PathBase::Absolute,
            Convention::SelfNamed,
            handle.clone(),
        );
        let resolver = resolver_with(registry);

        assert!(resolver.get_cached(&id("people")).is_none());
        let found = resolver.resolve(&id("people")).await.unwrap();
        assert!(ComponentHandle::ptr_eq(&found, &handle));
        assert_eq!(resolver.cached_ids(), vec![id("people")]);
    }

    #[tokio::test]
    async fn test_miss_leaves_cache_empty() {
        let resolver = resolver_with(ComponentRegistry::default());
        assert!(resolver.resolve(&id("nonexistent_module")).await.is_none());
        assert!(resolver.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_str_rejects_empty() {
        let resolver = resolver_with(ComponentRegistry::default());
        resolver.put(id("people"), ComponentHandle::new(Panel));
        assert!(resolver.resolve_str("").await.is_none());
        assert!(resolver.resolve_str("people").await.is_some());
    }

    #[tokio::test]
    async fn test_broken_location_does_not_abort() {
        let registry = ComponentRegistry::default();
        registry.register_broken(
            &id("people"),
            PathBase::Absolute,
            Convention::Index,
            "syntax error",
        );
        let handle = ComponentHandle::new(Panel);
        registry.register_component(
            &id("people"),
            PathBase::Relative,
            Convention::Index,
            handle.clone(),
        );
        let resolver = resolver_with(registry);

        let found = resolver.resolve(&id("people")).await.unwrap();
        assert!(ComponentHandle::ptr_eq(&found, &handle));
    }

    #[tokio::test]
    async fn test_preload_counts_hits() {
        let registry = ComponentRegistry::default();
        registry.register_component(
            &id("people"),
            PathBase::Absolute,
            Convention::Index,
            ComponentHandle::new(Panel),
        );
        let resolver = resolver_with(registry);

        assert_eq!(resolver.preload(["people", "companies", ""]).await, 1);
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_put_invalidate_clear() {
        let resolver = resolver_with(ComponentRegistry::default());
        let h = ComponentHandle::new(Panel);
        resolver.put(id("a"), h.clone());
        resolver.put(id("b"), h);
        assert_eq!(resolver.len(), 2);

        resolver.invalidate(&id("a"));
        resolver.invalidate(&id("missing"));
        assert!(resolver.get_cached(&id("a")).is_none());
        assert!(resolver.get_cached(&id("b")).is_some());

        resolver.clear();
        assert!(resolver.get_cached(&id("b")).is_none());
        assert!(resolver.is_empty());
    }
}
