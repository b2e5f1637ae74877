//! Built-in module catalog — the UI components shipped with the console,
//! registered at startup under whichever convention each module uses.

use std::sync::Arc;
use talent_core::config::ModuleConfig;
use talent_core::ModuleId;
use talent_module_registry::loader::{CandidateLayout, Convention, ModuleExports, PathBase};
use talent_module_registry::naming::display_name;
use talent_module_registry::{
    ComponentHandle, ComponentRegistry, ModuleComponent, RenderContext, RenderOutput,
};
use tracing::info;

/// Section-based panel used by the built-in modules.
#[derive(Debug, Clone, Copy)]
pub struct CatalogPanel {
    name: &'static str,
    sections: &'static [&'static str],
}

impl ModuleComponent for CatalogPanel {
    fn name(&self) -> &str {
        self.name
    }

    fn render(&self, ctx: &RenderContext) -> RenderOutput {
        RenderOutput {
            module_id: ctx.module_id.clone(),
            title: display_name(ctx.module_id.as_str()),
            body: serde_json::json!({
                "component": self.name,
                "tenant_id": ctx.tenant_id,
                "user_id": ctx.user_id,
                "sections": self.sections,
            }),
        }
    }
}

struct BuiltinModule {
    id: &'static str,
    base: PathBase,
    convention: Convention,
    /// Export under the module's own name instead of `default`.
    named_export: bool,
    panel: CatalogPanel,
}

const BUILTIN_MODULES: &[BuiltinModule] = &[
    BuiltinModule {
        id: "people",
        base: PathBase::Absolute,
        convention: Convention::Index,
        named_export: false,
        panel: CatalogPanel {
            name: "PeoplePanel",
            sections: &["directory", "profiles", "bulk_upload"],
        },
    },
    BuiltinModule {
        id: "companies",
        base: PathBase::Absolute,
        convention: Convention::Component,
        named_export: false,
        panel: CatalogPanel {
            name: "CompanyDatabase",
            sections: &["accounts", "contacts"],
        },
    },
    BuiltinModule {
        id: "ats_core",
        base: PathBase::Absolute,
        convention: Convention::SelfNamed,
        named_export: false,
        panel: CatalogPanel {
            name: "AtsBoard",
            sections: &["pipelines", "candidates", "interviews"],
        },
    },
    BuiltinModule {
        id: "user_management",
        base: PathBase::Relative,
        convention: Convention::Index,
        named_export: false,
        panel: CatalogPanel {
            name: "UserDirectory",
            sections: &["users", "roles", "invitations"],
        },
    },
    BuiltinModule {
        id: "custom_field_management",
        base: PathBase::Relative,
        convention: Convention::Component,
        named_export: true,
        panel: CatalogPanel {
            name: "CustomFieldEditor",
            sections: &["fields", "forms"],
        },
    },
    BuiltinModule {
        id: "reporting_analytics",
        base: PathBase::Relative,
        convention: Convention::SelfNamed,
        named_export: false,
        panel: CatalogPanel {
            name: "ReportBuilder",
            sections: &["reports", "results"],
        },
    },
];

/// Modules that ship data but no UI component.
pub const DATA_ONLY_MODULES: &[&str] = &["data_sync_services"];

/// Build the component registry for every built-in module.
pub fn builtin_registry(config: &ModuleConfig) -> anyhow::Result<Arc<ComponentRegistry>> {
    let registry = ComponentRegistry::new(CandidateLayout::from_config(config));

    for module in BUILTIN_MODULES {
        let module_id = ModuleId::new(module.id)?;
        let handle = ComponentHandle::new(module.panel);
        let exports = if module.named_export {
            ModuleExports::new().with_component(module.id, handle)
        } else {
            ModuleExports::new().with_default(handle)
        };
        registry.register_exports(&module_id, module.base, module.convention, exports);
    }

    for id in DATA_ONLY_MODULES {
        let module_id = ModuleId::new(*id)?;
        let data = serde_json::json!({
            "module": id,
            "kind": "data",
            "tables": ["sync_jobs", "sync_runs"],
        });
        registry.register_exports(
            &module_id,
            PathBase::Absolute,
            Convention::Index,
            ModuleExports::new().with_value("default", data),
        );
    }

    info!(locations = registry.len(), "Built-in module registry ready");
    Ok(Arc::new(registry))
}

/// Ids of every module the catalog knows about, UI or not.
pub fn builtin_module_ids() -> Vec<&'static str> {
    let mut ids: Vec<_> = BUILTIN_MODULES
        .iter()
        .map(|m| m.id)
        .chain(DATA_ONLY_MODULES.iter().copied())
        .collect();
    ids.sort();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use talent_module_registry::{ComponentLoader, ModuleComponentResolver};
    use uuid::Uuid;

    fn resolver() -> ModuleComponentResolver {
        let config = ModuleConfig::default();
        let registry = builtin_registry(&config).unwrap();
        ModuleComponentResolver::new(registry, CandidateLayout::from_config(&config))
    }

    #[tokio::test]
    async fn test_every_ui_module_resolves() {
        let resolver = resolver();
        for module in BUILTIN_MODULES {
            let module_id = ModuleId::new(module.id).unwrap();
            let handle = resolver.resolve(&module_id).await.unwrap();
            assert_eq!(handle.name(), module.panel.name);
        }
        assert_eq!(resolver.len(), BUILTIN_MODULES.len());
    }

    #[tokio::test]
    async fn test_data_only_module_has_no_component() {
        let resolver = resolver();
        let module_id = ModuleId::new("data_sync_services").unwrap();
        assert!(resolver.resolve(&module_id).await.is_none());
    }

    #[tokio::test]
    async fn test_named_export_registered() {
        let registry = builtin_registry(&ModuleConfig::default()).unwrap();
        let module_id = ModuleId::new("custom_field_management").unwrap();
        let loc = registry
            .layout()
            .location(&module_id, PathBase::Relative, Convention::Component);
        let exports = registry.load(&loc).await.unwrap();
        assert!(exports.get("default").is_none());
        assert!(exports.component_for(&module_id).is_some());
    }

    #[test]
    fn test_panel_render() {
        let panel = CatalogPanel {
            name: "PeoplePanel",
            sections: &["directory"],
        };
        let tenant_id = Uuid::new_v4();
        let out = panel.render(&RenderContext {
            tenant_id,
            user_id: None,
            module_id: ModuleId::new("people").unwrap(),
        });
        assert_eq!(out.title, "People Management");
        assert_eq!(out.body["component"], "PeoplePanel");
        assert_eq!(out.body["sections"], serde_json::json!(["directory"]));
    }

    #[test]
    fn test_module_ids_sorted() {
        let ids = builtin_module_ids();
        assert_eq!(ids.len(), 7);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
