//! Candidate locations and the loader seam the resolver searches through.

use crate::component::ComponentHandle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use talent_core::config::ModuleConfig;
use talent_core::ModuleId;
use thiserror::Error;

/// Export name checked before the module-named export.
pub const DEFAULT_EXPORT: &str = "default";

/// Failure to load a single candidate location.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("nothing registered at {location}")]
    NotFound { location: String },

    #[error("module at {location} failed to load: {reason}")]
    Malformed { location: String, reason: String },
}

/// Which root a candidate location hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathBase {
    Absolute,
    Relative,
}

/// File naming convention a module author may have followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    /// `<module>/index`
    Index,
    /// `<module>/Component`
    Component,
    /// `<module>/<module>`
    SelfNamed,
}

impl PathBase {
    pub const SEARCH_ORDER: [PathBase; 2] = [PathBase::Absolute, PathBase::Relative];
}

impl Convention {
    pub const SEARCH_ORDER: [Convention; 3] = [
        Convention::Index,
        Convention::Component,
        Convention::SelfNamed,
    ];

    fn file_stem<'a>(&self, module_id: &'a str) -> &'a str {
        match self {
            Convention::Index => "index",
            Convention::Component => "Component",
            Convention::SelfNamed => module_id,
        }
    }
}

/// One place a module's component may live.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateLocation {
    pub base: PathBase,
    pub convention: Convention,
    pub path: String,
}

impl fmt::Display for CandidateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Base prefixes used to build candidate locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLayout {
    pub absolute_base: String,
    pub relative_base: String,
}

impl Default for CandidateLayout {
    fn default() -> Self {
        Self::from_config(&ModuleConfig::default())
    }
}

impl CandidateLayout {
    pub fn from_config(config: &ModuleConfig) -> Self {
        Self {
            absolute_base: config.absolute_base.trim_end_matches('/').to_string(),
            relative_base: config.relative_base.trim_end_matches('/').to_string(),
        }
    }

    fn prefix(&self, base: PathBase) -> &str {
        match base {
            PathBase::Absolute => &self.absolute_base,
            PathBase::Relative => &self.relative_base,
        }
    }

    /// Location of `module_id` under a single base and convention.
    pub fn location(
        &self,
        module_id: &ModuleId,
        base: PathBase,
        convention: Convention,
    ) -> CandidateLocation {
        let id = module_id.as_str();
        CandidateLocation {
            base,
            convention,
            path: format!("{}/{}/{}", self.prefix(base), id, convention.file_stem(id)),
        }
    }

    /// Every candidate for `module_id`, in search order: all conventions under
    /// the absolute base, then all conventions under the relative base.
    pub fn candidates(&self, module_id: &ModuleId) -> Vec<CandidateLocation> {
        PathBase::SEARCH_ORDER
            .iter()
            .flat_map(|base| {
                Convention::SEARCH_ORDER
                    .iter()
                    .map(move |convention| self.location(module_id, *base, *convention))
            })
            .collect()
    }
}

/// A binding exported by a loaded module.
#[derive(Debug, Clone)]
pub enum ExportValue {
    Component(ComponentHandle),
    /// Plain data; never satisfies the component check.
    Value(serde_json::Value),
}

impl ExportValue {
    /// Null, `false`, zero or an empty string. A blank default export is
    /// treated as absent so the module-named export gets a chance.
    pub fn is_blank(&self) -> bool {
        match self {
            ExportValue::Component(_) => false,
            ExportValue::Value(value) => match value {
                serde_json::Value::Null => true,
                serde_json::Value::Bool(flag) => !*flag,
                serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
                serde_json::Value::String(s) => s.is_empty(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => false,
            },
        }
    }
}

/// Named bindings a module exposes once loaded.
#[derive(Debug, Clone, Default)]
pub struct ModuleExports {
    bindings: BTreeMap<String, ExportValue>,
}

impl ModuleExports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(self, handle: ComponentHandle) -> Self {
        self.with_component(DEFAULT_EXPORT, handle)
    }

    pub fn with_component(mut self, name: impl Into<String>, handle: ComponentHandle) -> Self {
        let export = ExportValue::Component(handle);
        self.bindings.insert(name.into(), export);
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        let export = ExportValue::Value(value);
        self.bindings.insert(name.into(), export);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ExportValue> {
        self.bindings.get(name)
    }

    /// The component this module exposes for `module_id`, if any.
    ///
    /// The `default` export wins whenever it is present and not blank; the
    /// module-named export is consulted otherwise. Whichever is picked must
    /// be a component, otherwise the module has nothing to mount.
    pub fn component_for(&self, module_id: &ModuleId) -> Option<ComponentHandle> {
        let export = match self.bindings.get(DEFAULT_EXPORT) {
            Some(default) if !default.is_blank() => default,
            _ => self.bindings.get(module_id.as_str())?,
        };
        match export {
            ExportValue::Component(handle) => Some(handle.clone()),
            ExportValue::Value(_) => None,
        }
    }
}

/// Loads the exports found at a candidate location.
#[async_trait]
pub trait ComponentLoader: Send + Sync {
    async fn load(&self, location: &CandidateLocation) -> Result<ModuleExports, LoadError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ModuleComponent, RenderContext, RenderOutput};

    struct Blank;

    impl ModuleComponent for Blank {
        fn name(&self) -> &str {
            "Blank"
        }

        fn render(&self, ctx: &RenderContext) -> RenderOutput {
            RenderOutput {
                module_id: ctx.module_id.clone(),
                title: String::new(),
                body: serde_json::Value::Null,
            }
        }
    }

    fn id(s: &str) -> ModuleId {
        ModuleId::new(s).unwrap()
    }

    #[test]
    fn test_candidate_order() {
        let layout = CandidateLayout::default();
        let paths: Vec<_> = layout
            .candidates(&id("people"))
            .into_iter()
            .map(|c| c.path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "/src/modules/people/index",
                "/src/modules/people/Component",
                "/src/modules/people/people",
                "../../modules/people/index",
                "../../modules/people/Component",
                "../../modules/people/people",
            ]
        );
    }

    #[test]
    fn test_layout_trims_trailing_slash() {
        let layout = CandidateLayout::from_config(&ModuleConfig {
            absolute_base: "/app/modules/".into(),
            relative_base: "./modules".into(),
            preload: Vec::new(),
        });
        let ats = id("ats_core");
        let loc = layout.location(&ats, PathBase::Absolute, Convention::SelfNamed);
        assert_eq!(loc.path, "/app/modules/ats_core/ats_core");
        assert_eq!(loc.to_string(), loc.path);
    }

    #[test]
    fn test_default_export_preferred() {
        let default = ComponentHandle::new(Blank);
        let named = ComponentHandle::new(Blank);
        let exports = ModuleExports::new()
            .with_default(default.clone())
            .with_component("people", named);
        let found = exports.component_for(&id("people")).unwrap();
        assert!(ComponentHandle::ptr_eq(&found, &default));
    }

    #[test]
    fn test_named_export_fallback() {
        let named = ComponentHandle::new(Blank);
        let exports = ModuleExports::new()
            .with_component("people", named.clone())
            .with_value("version", serde_json::json!(2));
        let found = exports.component_for(&id("people")).unwrap();
        assert!(ComponentHandle::ptr_eq(&found, &named));
        assert!(exports.component_for(&id("companies")).is_none());
    }

    #[test]
    fn test_non_component_default_is_a_miss() {
        let data = serde_json::json!({ "tables": ["sync_jobs"] });
        let exports = ModuleExports::new()
            .with_value(DEFAULT_EXPORT, data)
            .with_component("people", ComponentHandle::new(Blank));
        assert!(exports.component_for(&id("people")).is_none());

        let empty = ModuleExports::new();
        assert!(empty.component_for(&id("people")).is_none());
    }

    #[test]
    fn test_blank_default_falls_through_to_named() {
        let blanks = [
            serde_json::Value::Null,
            serde_json::json!(false),
            serde_json::json!(0),
            serde_json::json!(""),
        ];
        for blank in blanks {
            let named = ComponentHandle::new(Blank);
            let exports = ModuleExports::new()
                .with_value(DEFAULT_EXPORT, blank.clone())
                .with_component("people", named.clone());
            let found = exports.component_for(&id("people"));
            assert!(
                found.is_some_and(|h| ComponentHandle::ptr_eq(&h, &named)),
                "default {blank} should fall through"
            );
        }
    }
}
