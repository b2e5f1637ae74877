//! Render contract shared by every module UI component.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use talent_core::ModuleId;
use uuid::Uuid;

/// Inputs handed to a component when the shell mounts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderContext {
    pub tenant_id: Uuid,
    pub user_id: Option<Uuid>,
    pub module_id: ModuleId,
}

/// What a component produces for the shell to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOutput {
    pub module_id: ModuleId,
    pub title: String,
    pub body: serde_json::Value,
}

/// A renderable UI unit for a platform module.
pub trait ModuleComponent: Send + Sync {
    /// Human-readable component name, used in logs.
    fn name(&self) -> &str;

    fn render(&self, ctx: &RenderContext) -> RenderOutput;
}

/// Shared, read-only reference to a resolved component.
///
/// Cloning is cheap and every clone points at the same component, so a
/// handle returned from the cache can be compared with [`ptr_eq`](Self::ptr_eq).
#[derive(Clone)]
pub struct ComponentHandle(Arc<dyn ModuleComponent>);

impl ComponentHandle {
    pub fn new<C: ModuleComponent + 'static>(component: C) -> Self {
        Self(Arc::new(component))
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for ComponentHandle {
    type Target = dyn ModuleComponent;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentHandle")
            .field(&self.0.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl ModuleComponent for Echo {
        fn name(&self) -> &str {
            "Echo"
        }

        fn render(&self, ctx: &RenderContext) -> RenderOutput {
            RenderOutput {
                module_id: ctx.module_id.clone(),
                title: "echo".into(),
                body: serde_json::json!({ "tenant": ctx.tenant_id }),
            }
        }
    }

    #[test]
    fn test_clones_share_identity() {
        let a = ComponentHandle::new(Echo);
        let b = a.clone();
        let c = ComponentHandle::new(Echo);
        assert!(ComponentHandle::ptr_eq(&a, &b));
        assert!(!ComponentHandle::ptr_eq(&a, &c));
        assert_eq!(format!("{a:?}"), "ComponentHandle(\"Echo\")");
    }

    #[test]
    fn test_render_through_handle() {
        let handle = ComponentHandle::new(Echo);
        let tenant_id = Uuid::new_v4();
        let out = handle.render(&RenderContext {
            tenant_id,
            user_id: None,
            module_id: ModuleId::new("people").unwrap(),
        });
        assert_eq!(out.title, "echo");
        assert_eq!(out.body["tenant"], serde_json::json!(tenant_id));
    }
}
