//! Per-tenant module enablement — which platform modules each tenant may
//! mount, with an audit trail of who toggled what.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use talent_core::ModuleId;
use talent_module_registry::naming::normalize_module_name;
use tracing::info;
use uuid::Uuid;

/// One enable/disable action on a tenant's module set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleAssignmentChange {
    pub tenant_id: Uuid,
    pub module_id: ModuleId,
    pub enabled: bool,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
}

/// Tenant → enabled modules.
pub struct TenantModuleManager {
    assignments: DashMap<Uuid, BTreeSet<ModuleId>>,
    change_log: DashMap<Uuid, Vec<ModuleAssignmentChange>>,
}

impl Default for TenantModuleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TenantModuleManager {
    pub fn new() -> Self {
        Self {
            assignments: DashMap::new(),
            change_log: DashMap::new(),
        }
    }

    /// Enable a module for a tenant. Returns false if it was already enabled.
    pub fn enable_module(&self, tenant_id: Uuid, module_id: ModuleId, actor: &str) -> bool {
        let inserted = self
            .assignments
            .entry(tenant_id)
            .or_default()
            .insert(module_id.clone());
        if inserted {
            info!(
                tenant_id = %tenant_id,
                module_id = %module_id,
                actor,
                "Module enabled for tenant"
            );
            self.log_change(tenant_id, module_id, true, actor);
        }
        inserted
    }

    /// Disable a module for a tenant. Returns false if it was not enabled.
    pub fn disable_module(&self, tenant_id: Uuid, module_id: &ModuleId, actor: &str) -> bool {
        let removed = self
            .assignments
            .get_mut(&tenant_id)
            .map(|mut set| set.remove(module_id))
            .unwrap_or(false);
        if removed {
            info!(
                tenant_id = %tenant_id,
                module_id = %module_id,
                actor,
                "Module disabled for tenant"
            );
            self.log_change(tenant_id, module_id.clone(), false, actor);
        }
        removed
    }

    /// Enable a module given a display or loosely formatted name.
    pub fn enable_by_name(
        &self,
        tenant_id: Uuid,
        name: &str,
        actor: &str,
    ) -> anyhow::Result<ModuleId> {
        let module_id = ModuleId::new(normalize_module_name(name))
            .map_err(|_| anyhow::anyhow!("Module name has no usable characters: {name:?}"))?;
        self.enable_module(tenant_id, module_id.clone(), actor);
        Ok(module_id)
    }

    pub fn is_enabled(&self, tenant_id: Uuid, module_id: &ModuleId) -> bool {
        self.assignments
            .get(&tenant_id)
            .map(|set| set.contains(module_id))
            .unwrap_or(false)
    }

    /// Modules enabled for a tenant, sorted.
    pub fn modules_for(&self, tenant_id: Uuid) -> Vec<ModuleId> {
        self.assignments
            .get(&tenant_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Tenants that have a module enabled.
    pub fn tenants_with(&self, module_id: &ModuleId) -> Vec<Uuid> {
        let mut tenants: Vec<_> = self
            .assignments
            .iter()
            .filter(|e| e.value().contains(module_id))
            .map(|e| *e.key())
            .collect();
        tenants.sort();
        tenants
    }

    /// Change history for a tenant, oldest first.
    pub fn change_log(&self, tenant_id: Uuid) -> Vec<ModuleAssignmentChange> {
        self.change_log
            .get(&tenant_id)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    fn log_change(&self, tenant_id: Uuid, module_id: ModuleId, enabled: bool, actor: &str) {
        let change = ModuleAssignmentChange {
            tenant_id,
            module_id,
            enabled,
            changed_by: actor.to_string(),
            changed_at: Utc::now(),
        };
        self.change_log.entry(tenant_id).or_default().push(change);
    }
}
