//! Superadmin console — module management for the talent platform.
//! Wires the module component resolver to tenant-level module enablement
//! and the shell that mounts modules into the console.
//!
//! # Modules
//!
//! - [`catalog`] — Built-in module components and their registry
//! - [`module_access`] — Per-tenant module enablement with change history
//! - [`shell`] — Mounts a tenant's modules, with placeholders for data-only ones

pub mod catalog;
pub mod module_access;
pub mod shell;

pub use catalog::builtin_registry;
pub use module_access::TenantModuleManager;
pub use shell::{ModuleShell, MountedView};
