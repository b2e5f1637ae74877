//! Component registry — location → factory map populated at startup.
//!
//! Stands in for a filesystem of module sources: each entry says "if the
//! resolver tries this location, here is what loads". Locations that were
//! never registered fail with [`LoadError::NotFound`].

use crate::component::ComponentHandle;
use crate::loader::{
    CandidateLayout, CandidateLocation, ComponentLoader, Convention, LoadError, ModuleExports,
    PathBase,
};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use talent_core::ModuleId;
use tracing::{debug, info};

type ExportsFactory = Arc<dyn Fn() -> Result<ModuleExports, LoadError> + Send + Sync>;

pub struct ComponentRegistry {
    layout: CandidateLayout,
    factories: DashMap<String, ExportsFactory>,
}

impl ComponentRegistry {
    pub fn new(layout: CandidateLayout) -> Self {
        Self {
            layout,
            factories: DashMap::new(),
        }
    }

    pub fn layout(&self) -> &CandidateLayout {
        &self.layout
    }

    /// Register a factory at a raw location path, replacing any previous one.
    pub fn register_location<F>(&self, path: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<ModuleExports, LoadError> + Send + Sync + 'static,
    {
        let path = path.into();
        debug!(location = %path, "Module location registered");
        self.factories.insert(path, Arc::new(factory));
    }

    /// Register fixed exports for a module under one base and convention.
    pub fn register_exports(
        &self,
        module_id: &ModuleId,
        base: PathBase,
        convention: Convention,
        exports: ModuleExports,
    ) -> CandidateLocation {
        let location = self.layout.location(module_id, base, convention);
        self.register_location(location.path.clone(), move || Ok(exports.clone()));
        info!(
            module_id = %module_id,
            location = %location,
            "Module exports registered"
        );
        location
    }

    /// Register a component as the module's default export.
    pub fn register_component(
        &self,
        module_id: &ModuleId,
        base: PathBase,
        convention: Convention,
        handle: ComponentHandle,
    ) -> CandidateLocation {
        self.register_exports(
            module_id,
            base,
            convention,
            ModuleExports::new().with_default(handle),
        )
    }

    /// Register a location whose module fails to load.
    pub fn register_broken(
        &self,
        module_id: &ModuleId,
        base: PathBase,
        convention: Convention,
        reason: impl Into<String>,
    ) -> CandidateLocation {
        let location = self.layout.location(module_id, base, convention);
        let path = location.path.clone();
        let reason = reason.into();
        self.register_location(location.path.clone(), move || {
            Err(LoadError::Malformed {
                location: path.clone(),
                reason: reason.clone(),
            })
        });
        location
    }

    pub fn unregister(&self, path: &str) -> bool {
        self.factories.remove(path).is_some()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.factories.contains_key(path)
    }

    /// All registered location paths, sorted.
    pub fn locations(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.factories.iter().map(|e| e.key().clone()).collect();
        paths.sort();
        paths
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new(CandidateLayout::default())
    }
}

#[async_trait]
impl ComponentLoader for ComponentRegistry {
    async fn load(&self, location: &CandidateLocation) -> Result<ModuleExports, LoadError> {
        // Clone the factory out so no map guard is held while it runs.
        let factory = self
            .factories
            .get(&location.path)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| LoadError::NotFound {
                location: location.path.clone(),
            })?;
        factory()
    }
}
