//! Module shell — mounts a tenant's module into the console, falling back
//! to a placeholder when the module has no UI component.

use serde::Serialize;
use std::sync::Arc;
use talent_core::ModuleId;
use talent_module_registry::naming::display_name;
use talent_module_registry::{ModuleComponentResolver, RenderContext, RenderOutput};
use tracing::debug;
use uuid::Uuid;

use crate::module_access::TenantModuleManager;

/// What the shell shows in a module slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MountedView {
    Rendered(RenderOutput),
    /// The tenant does not have this module enabled.
    Disabled { module_id: ModuleId },
    /// Enabled, but the module has no UI component.
    Placeholder { module_id: ModuleId, title: String },
}

pub struct ModuleShell {
    resolver: Arc<ModuleComponentResolver>,
    access: Arc<TenantModuleManager>,
}

impl ModuleShell {
    pub fn new(resolver: Arc<ModuleComponentResolver>, access: Arc<TenantModuleManager>) -> Self {
        Self { resolver, access }
    }

    pub fn resolver(&self) -> &ModuleComponentResolver {
        &self.resolver
    }

    pub fn access(&self) -> &TenantModuleManager {
        &self.access
    }

    pub async fn mount(
        &self,
        tenant_id: Uuid,
        user_id: Option<Uuid>,
        module_id: &ModuleId,
    ) -> MountedView {
        if !self.access.is_enabled(tenant_id, module_id) {
            debug!(
                tenant_id = %tenant_id,
                module_id = %module_id,
                "Module not enabled for tenant"
            );
            return MountedView::Disabled {
                module_id: module_id.clone(),
            };
        }

        match self.resolver.resolve(module_id).await {
            Some(component) => {
                let ctx = RenderContext {
                    tenant_id,
                    user_id,
                    module_id: module_id.clone(),
                };
                MountedView::Rendered(component.render(&ctx))
            }
            None => MountedView::Placeholder {
                module_id: module_id.clone(),
                title: display_name(module_id.as_str()),
            },
        }
    }

    /// Mount every module the tenant has enabled, in id order.
    pub async fn mount_all(&self, tenant_id: Uuid, user_id: Option<Uuid>) -> Vec<MountedView> {
        let mut views = Vec::new();
        for module_id in self.access.modules_for(tenant_id) {
            let view = self.mount(tenant_id, user_id, &module_id).await;
            views.push(view);
        }
        views
    }
}
